use super::models::{NewProspect, ProspectSubmission};
use crate::errors::AppError;

/// The thirteen locations a prospect may register from: the twelve
/// municipalities served plus the catch-all "Otro lugar".
pub const VALID_ADDRESSES: &[&str] = &[
    "Apodaca",
    "Cadereyta Jiménez",
    "García",
    "San Pedro Garza García",
    "General Escobedo",
    "Guadalupe",
    "Juárez",
    "Monterrey",
    "Salinas Victoria",
    "San Nicolás de los Garza",
    "Santa Catarina",
    "Santiago",
    "Otro lugar",
];

pub fn is_valid_address(address: &str) -> bool {
    VALID_ADDRESSES.contains(&address)
}

fn present(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Checks that all six fields are present and non-empty. Shared by intake and
/// update; update skips the address enum, as only intake constrains it.
pub fn validate_presence(submission: &ProspectSubmission) -> Result<(), AppError> {
    let strings = [
        &submission.name,
        &submission.lastname,
        &submission.email,
        &submission.phone_number,
        &submission.address,
    ];
    let filled = strings
        .iter()
        .all(|f| matches!(f.as_deref(), Some(v) if !v.is_empty()));

    if filled && submission.age.is_some() {
        Ok(())
    } else {
        Err(AppError::MissingFields)
    }
}

/// Full intake validation: presence plus the address enum.
/// Pure; runs before any store access.
pub fn validate_submission(submission: ProspectSubmission) -> Result<NewProspect, AppError> {
    let name = present(&submission.name).ok_or(AppError::MissingFields)?;
    let lastname = present(&submission.lastname).ok_or(AppError::MissingFields)?;
    let email = present(&submission.email).ok_or(AppError::MissingFields)?;
    let phone_number = present(&submission.phone_number).ok_or(AppError::MissingFields)?;
    let age = submission.age.ok_or(AppError::MissingFields)?;
    let address = present(&submission.address).ok_or(AppError::MissingFields)?;

    if !is_valid_address(&address) {
        return Err(AppError::InvalidAddress);
    }

    Ok(NewProspect {
        name,
        lastname,
        email,
        phone_number,
        age,
        address,
    })
}
