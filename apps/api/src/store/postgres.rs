use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::{Store, StoreError};
use crate::auth::Advisor;
use crate::prospects::models::{NewProspect, Prospect, ProspectPatch};

/// PostgreSQL-backed store.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const UNIQUE_VIOLATION: &str = "23505";

fn map_insert_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db) = e {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::DuplicateEmail;
        }
    }
    StoreError::Database(e)
}

#[async_trait]
impl Store for PgStore {
    async fn find_advisor_by_id(&self, id: i64) -> Result<Option<Advisor>, StoreError> {
        let advisor = sqlx::query_as("SELECT * FROM advisors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(advisor)
    }

    async fn find_prospect_by_email(&self, email: &str) -> Result<Option<Prospect>, StoreError> {
        let prospect =
            sqlx::query_as("SELECT * FROM prospects WHERE email = $1 ORDER BY id ASC LIMIT 1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(prospect)
    }

    async fn insert_prospect(
        &self,
        fields: &NewProspect,
        date: NaiveDate,
    ) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO prospects (name, lastname, email, phone_number, age, address, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.lastname)
        .bind(&fields.email)
        .bind(&fields.phone_number)
        .bind(fields.age)
        .bind(&fields.address)
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;
        Ok(id)
    }

    async fn update_prospect_date(
        &self,
        email: &str,
        date: NaiveDate,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE prospects SET date = $1 WHERE email = $2")
            .bind(date)
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_prospects(&self) -> Result<Vec<Prospect>, StoreError> {
        let prospects = sqlx::query_as("SELECT * FROM prospects ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(prospects)
    }

    async fn find_prospect_by_id(&self, id: i64) -> Result<Option<Prospect>, StoreError> {
        let prospect = sqlx::query_as("SELECT * FROM prospects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(prospect)
    }

    async fn update_prospect_fields(
        &self,
        id: i64,
        patch: &ProspectPatch,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE prospects SET
                name = COALESCE($1, name),
                lastname = COALESCE($2, lastname),
                email = COALESCE($3, email),
                phone_number = COALESCE($4, phone_number),
                age = COALESCE($5, age),
                address = COALESCE($6, address)
            WHERE id = $7
            "#,
        )
        .bind(patch.name.as_deref())
        .bind(patch.lastname.as_deref())
        .bind(patch.email.as_deref())
        .bind(patch.phone_number.as_deref())
        .bind(patch.age)
        .bind(patch.address.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_prospect(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM prospects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_advisor_if_absent(
        &self,
        name: &str,
        email: &str,
        user_type: &str,
    ) -> Result<Option<i64>, StoreError> {
        let id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO advisors (name, email, user_type)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(user_type)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }
}
