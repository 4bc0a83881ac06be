//! Authorization gate for staff-only prospect operations.
//!
//! Authentication is the transport's job; by the time a request reaches this
//! service the caller id in the `x-user-id` header is assumed verified. This
//! module only decides what that caller may do: it must resolve to exactly
//! one advisor, and that advisor's role must be `admin` or `advisor`.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use sqlx::FromRow;

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::Store;

pub const CALLER_ID_HEADER: &str = "x-user-id";

/// Advisor role, parsed from the stored `user_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Advisor,
    Other,
}

impl Role {
    pub fn parse(user_type: &str) -> Self {
        match user_type {
            "admin" => Role::Admin,
            "advisor" => Role::Advisor,
            _ => Role::Other,
        }
    }

    /// The privileged set for gated prospect operations.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Advisor)
    }
}

/// Staff account row. Read-only from this service; created by the startup
/// seed or externally.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Advisor {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub user_type: String,
}

impl Advisor {
    pub fn role(&self) -> Role {
        Role::parse(&self.user_type)
    }
}

/// Resolves a caller id to an advisor and checks the privileged role set.
///
/// Unknown callers map to `InvalidCaller` (400), known callers outside
/// `{admin, advisor}` to `Forbidden` (403).
pub async fn authorize_staff(store: &dyn Store, caller_id: i64) -> Result<Advisor, AppError> {
    let advisor = store
        .find_advisor_by_id(caller_id)
        .await?
        .ok_or(AppError::InvalidCaller)?;

    if !advisor.role().is_staff() {
        return Err(AppError::Forbidden);
    }

    Ok(advisor)
}

/// Extractor applying the gate. Staff-only handlers take `Staff` as an
/// argument; the public intake routes never ask for it.
pub struct Staff(pub Advisor);

#[axum::async_trait]
impl FromRequestParts<AppState> for Staff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A missing or non-numeric header cannot resolve to an advisor, so it
        // gets the same answer as an unknown caller.
        let caller_id = parts
            .headers
            .get(CALLER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or(AppError::InvalidCaller)?;

        let advisor = authorize_staff(state.store.as_ref(), caller_id).await?;
        Ok(Staff(advisor))
    }
}
