//! The create-or-refresh workflow behind both intake routes.
//!
//! One email address maps to at most one canonical prospect row. A submission
//! for a known email only touches that row's date; a submission for a new
//! email inserts a row and triggers the back-office notification.

use anyhow::anyhow;
use chrono::NaiveDate;
use tracing::{info, warn};

use super::models::{IntakeOutcome, NewProspect, Prospect};
use crate::errors::AppError;
use crate::mailer::Notifier;
use crate::store::{Store, StoreError};

const NOTIFY_SUBJECT: &str = "Nuevo prospecto creado";

fn notification_body(id: i64) -> String {
    format!("<strong>Se ha creado un nuevo prospecto:</strong><br>Id: {id}")
}

/// Runs the create-or-refresh decision for a validated submission.
///
/// Exactly one store mutation happens: a date touch when the email is already
/// known, an insert when it is not. The notification goes out only on a true
/// creation, and its failure never fails the intake.
pub async fn intake(
    store: &dyn Store,
    notifier: &dyn Notifier,
    submission: NewProspect,
    today: NaiveDate,
) -> Result<IntakeOutcome, AppError> {
    if let Some(existing) = store.find_prospect_by_email(&submission.email).await? {
        return refresh(store, existing, today).await;
    }

    let id = match store.insert_prospect(&submission, today).await {
        Ok(id) => id,
        // Lost the insert race against a concurrent submission for the same
        // email; the unique index turned it into a refresh.
        Err(StoreError::DuplicateEmail) => {
            let existing = store
                .find_prospect_by_email(&submission.email)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(anyhow!(
                        "prospect {} vanished after duplicate-email conflict",
                        submission.email
                    ))
                })?;
            return refresh(store, existing, today).await;
        }
        Err(e) => return Err(e.into()),
    };

    let prospect = Prospect {
        id,
        name: submission.name,
        lastname: submission.lastname,
        email: submission.email,
        phone_number: submission.phone_number,
        age: submission.age,
        address: submission.address,
        date: today,
    };

    let message_id = match notifier
        .send(NOTIFY_SUBJECT, &notification_body(prospect.id))
        .await
    {
        Ok(message_id) => Some(message_id),
        Err(e) => {
            warn!("Notification for prospect {} failed: {e}", prospect.id);
            None
        }
    };

    info!("Created prospect {} ({})", prospect.id, prospect.email);
    Ok(IntakeOutcome::Created {
        prospect,
        message_id,
    })
}

async fn refresh(
    store: &dyn Store,
    existing: Prospect,
    today: NaiveDate,
) -> Result<IntakeOutcome, AppError> {
    store.update_prospect_date(&existing.email, today).await?;
    Ok(IntakeOutcome::Refreshed {
        prospect: Prospect {
            date: today,
            ..existing
        },
    })
}
