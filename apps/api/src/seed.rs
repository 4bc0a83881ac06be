use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::store::Store;

/// Ensures the admin advisor account exists before the service starts taking
/// requests. Safe to run on every boot: the insert is keyed by email and does
/// nothing when the account is already there.
pub async fn seed_admin(store: &dyn Store, config: &Config) -> Result<()> {
    match store
        .insert_advisor_if_absent(&config.admin_name, &config.admin_email, "admin")
        .await?
    {
        Some(id) => info!("Seeded admin advisor {} ({})", id, config.admin_email),
        None => info!("Admin advisor already present ({})", config.admin_email),
    }
    Ok(())
}
