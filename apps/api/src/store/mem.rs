use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{Store, StoreError};
use crate::auth::Advisor;
use crate::prospects::models::{NewProspect, Prospect, ProspectPatch};

/// In-memory store double for workflow and handler tests. Mirrors the
/// Postgres behavior callers can observe, including the unique index on
/// prospect email.
#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
    hide_next_prospect_lookup: AtomicBool,
}

#[derive(Default)]
struct Inner {
    advisors: Vec<Advisor>,
    prospects: Vec<Prospect>,
    next_prospect_id: i64,
    next_advisor_id: i64,
}

impl MemStore {
    pub fn add_advisor(&self, id: i64, user_type: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.advisors.push(Advisor {
            id,
            name: format!("advisor-{id}"),
            email: format!("advisor-{id}@example.com"),
            user_type: user_type.to_string(),
        });
    }

    pub fn prospect_count(&self) -> usize {
        self.inner.lock().unwrap().prospects.len()
    }

    pub fn get_prospect(&self, id: i64) -> Option<Prospect> {
        self.inner
            .lock()
            .unwrap()
            .prospects
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Makes the next email lookup miss, simulating a submission that races
    /// a concurrent insert for the same address.
    pub fn hide_next_prospect_lookup(&self) {
        self.hide_next_prospect_lookup.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Store for MemStore {
    async fn find_advisor_by_id(&self, id: i64) -> Result<Option<Advisor>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .advisors
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_prospect_by_email(&self, email: &str) -> Result<Option<Prospect>, StoreError> {
        if self.hide_next_prospect_lookup.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .inner
            .lock()
            .unwrap()
            .prospects
            .iter()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn insert_prospect(
        &self,
        fields: &NewProspect,
        date: NaiveDate,
    ) -> Result<i64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.prospects.iter().any(|p| p.email == fields.email) {
            return Err(StoreError::DuplicateEmail);
        }
        inner.next_prospect_id += 1;
        let id = inner.next_prospect_id;
        inner.prospects.push(Prospect {
            id,
            name: fields.name.clone(),
            lastname: fields.lastname.clone(),
            email: fields.email.clone(),
            phone_number: fields.phone_number.clone(),
            age: fields.age,
            address: fields.address.clone(),
            date,
        });
        Ok(id)
    }

    async fn update_prospect_date(
        &self,
        email: &str,
        date: NaiveDate,
    ) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let mut affected = 0;
        for p in inner.prospects.iter_mut().filter(|p| p.email == email) {
            p.date = date;
            affected += 1;
        }
        Ok(affected)
    }

    async fn list_prospects(&self) -> Result<Vec<Prospect>, StoreError> {
        Ok(self.inner.lock().unwrap().prospects.clone())
    }

    async fn find_prospect_by_id(&self, id: i64) -> Result<Option<Prospect>, StoreError> {
        Ok(self.get_prospect(id))
    }

    async fn update_prospect_fields(
        &self,
        id: i64,
        patch: &ProspectPatch,
    ) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(p) = inner.prospects.iter_mut().find(|p| p.id == id) else {
            return Ok(0);
        };
        if let Some(v) = &patch.name {
            p.name = v.clone();
        }
        if let Some(v) = &patch.lastname {
            p.lastname = v.clone();
        }
        if let Some(v) = &patch.email {
            p.email = v.clone();
        }
        if let Some(v) = &patch.phone_number {
            p.phone_number = v.clone();
        }
        if let Some(v) = patch.age {
            p.age = v;
        }
        if let Some(v) = &patch.address {
            p.address = v.clone();
        }
        Ok(1)
    }

    async fn delete_prospect(&self, id: i64) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.prospects.len();
        inner.prospects.retain(|p| p.id != id);
        Ok((before - inner.prospects.len()) as u64)
    }

    async fn insert_advisor_if_absent(
        &self,
        name: &str,
        email: &str,
        user_type: &str,
    ) -> Result<Option<i64>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.advisors.iter().any(|a| a.email == email) {
            return Ok(None);
        }
        inner.next_advisor_id += 1;
        let id = inner.next_advisor_id;
        inner.advisors.push(Advisor {
            id,
            name: name.to_string(),
            email: email.to_string(),
            user_type: user_type.to_string(),
        });
        Ok(Some(id))
    }
}
