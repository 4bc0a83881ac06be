use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored prospect row. `date` is the last-touched calendar date, not the
/// creation date: refreshing an existing email rewrites it in place.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Prospect {
    pub id: i64,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub phone_number: String,
    pub age: i32,
    pub address: String,
    pub date: NaiveDate,
}

/// Raw intake body. Every field is optional at the edge so presence
/// validation can answer `MissingFields` instead of a decode error.
#[derive(Debug, Deserialize)]
pub struct ProspectSubmission {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub age: Option<i32>,
    pub address: Option<String>,
}

/// A validated submission, ready to insert.
#[derive(Debug, Clone)]
pub struct NewProspect {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub phone_number: String,
    pub age: i32,
    pub address: String,
}

/// Field-by-field update; absent fields keep their stored value.
#[derive(Debug)]
pub struct ProspectPatch {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub age: Option<i32>,
    pub address: Option<String>,
}

impl From<ProspectSubmission> for ProspectPatch {
    fn from(s: ProspectSubmission) -> Self {
        ProspectPatch {
            name: s.name,
            lastname: s.lastname,
            email: s.email,
            phone_number: s.phone_number,
            age: s.age,
            address: s.address,
        }
    }
}

/// Outcome of the create-or-refresh decision.
#[derive(Debug)]
pub enum IntakeOutcome {
    /// First submission for this email. `message_id` is the notification's
    /// provider id, absent when the send failed.
    Created {
        prospect: Prospect,
        message_id: Option<String>,
    },
    /// The email was already known; only its date was touched. `prospect`
    /// carries the stored fields, not the resubmitted ones.
    Refreshed { prospect: Prospect },
}

impl IntakeOutcome {
    pub fn prospect(&self) -> &Prospect {
        match self {
            IntakeOutcome::Created { prospect, .. } | IntakeOutcome::Refreshed { prospect } => {
                prospect
            }
        }
    }

    /// Full-row projection for the form intake route.
    pub fn into_prospect(self) -> Prospect {
        match self {
            IntakeOutcome::Created { prospect, .. } | IntakeOutcome::Refreshed { prospect } => {
                prospect
            }
        }
    }

    /// Minimal projection for the notification-coupled intake route:
    /// `{id, name, emailId}` on creation, `{id, name, email}` on refresh.
    pub fn to_minimal(&self) -> IntakeResponse {
        match self {
            IntakeOutcome::Created {
                prospect,
                message_id,
            } => IntakeResponse {
                id: prospect.id,
                name: prospect.name.clone(),
                email: None,
                email_id: message_id.clone(),
            },
            IntakeOutcome::Refreshed { prospect } => IntakeResponse {
                id: prospect.id,
                name: prospect.name.clone(),
                email: Some(prospect.email.clone()),
                email_id: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "emailId", skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana(id: i64) -> Prospect {
        Prospect {
            id,
            name: "Ana".to_string(),
            lastname: "Ruiz".to_string(),
            email: "ana@x.com".to_string(),
            phone_number: "555".to_string(),
            age: 30,
            address: "Monterrey".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    #[test]
    fn created_projection_carries_the_message_id() {
        let outcome = IntakeOutcome::Created {
            prospect: ana(7),
            message_id: Some("msg-1".to_string()),
        };
        let value = serde_json::to_value(outcome.to_minimal()).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["name"], "Ana");
        assert_eq!(value["emailId"], "msg-1");
        assert!(value.get("email").is_none());
    }

    #[test]
    fn created_projection_tolerates_a_missing_message_id() {
        let outcome = IntakeOutcome::Created {
            prospect: ana(7),
            message_id: None,
        };
        let value = serde_json::to_value(outcome.to_minimal()).unwrap();
        assert_eq!(value["id"], 7);
        assert!(value.get("emailId").is_none());
    }

    #[test]
    fn refreshed_projection_exposes_the_stored_email() {
        let outcome = IntakeOutcome::Refreshed { prospect: ana(3) };
        let value = serde_json::to_value(outcome.to_minimal()).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["email"], "ana@x.com");
        assert!(value.get("emailId").is_none());
    }
}
