//! Persistent-store collaborator. Everything the service knows about the
//! database goes through the `Store` trait; `PgStore` is the real backend
//! and `mem::MemStore` the test double.

#[cfg(test)]
pub mod mem;
pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::auth::Advisor;
use crate::prospects::models::{NewProspect, Prospect, ProspectPatch};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The unique index on prospect email rejected an insert.
    #[error("duplicate prospect email")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store operations consumed by the workflow and the gated CRUD handlers.
///
/// Carried in `AppState` as `Arc<dyn Store>`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_advisor_by_id(&self, id: i64) -> Result<Option<Advisor>, StoreError>;

    /// Zero-or-one lookup; when legacy duplicates exist, the first row by id
    /// is the canonical one.
    async fn find_prospect_by_email(&self, email: &str) -> Result<Option<Prospect>, StoreError>;

    /// Inserts a new prospect and returns the generated id.
    /// Fails with `DuplicateEmail` when the email is already taken.
    async fn insert_prospect(
        &self,
        fields: &NewProspect,
        date: NaiveDate,
    ) -> Result<i64, StoreError>;

    /// Touches the last-seen date of every row with this email, leaving all
    /// other fields alone. Returns the affected-row count.
    async fn update_prospect_date(&self, email: &str, date: NaiveDate)
        -> Result<u64, StoreError>;

    async fn list_prospects(&self) -> Result<Vec<Prospect>, StoreError>;

    async fn find_prospect_by_id(&self, id: i64) -> Result<Option<Prospect>, StoreError>;

    /// Partial update: absent patch fields keep their stored value.
    /// Returns the affected-row count.
    async fn update_prospect_fields(
        &self,
        id: i64,
        patch: &ProspectPatch,
    ) -> Result<u64, StoreError>;

    /// Returns the affected-row count.
    async fn delete_prospect(&self, id: i64) -> Result<u64, StoreError>;

    /// Seed support. Returns the new id, or `None` when an advisor with this
    /// email already exists.
    async fn insert_advisor_if_absent(
        &self,
        name: &str,
        email: &str,
        user_type: &str,
    ) -> Result<Option<i64>, StoreError>;
}
