use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue};

use crate::{ResultEngine, UserRole, credentials, users};

use super::Engine;

/// Reserved username of the elevated principal created at bootstrap.
pub const ADMIN_USERNAME: &str = "admin";

impl Engine {
    /// Guarantees a usable admin account. Part of the awaited startup
    /// phase, after migrations; safe to run on every start.
    ///
    /// Creates the account with `default_password` when absent. When
    /// present it is re-activated and given the admin role if either
    /// was lost, and missing contact fields are filled with empty
    /// defaults; set values (including the password) are never
    /// overwritten.
    pub async fn ensure_admin(&self, default_password: &str) -> ResultEngine<()> {
        match self.find_by_username(ADMIN_USERNAME).await? {
            None => {
                let hashed = credentials::hash_password(default_password)?;
                let model = users::ActiveModel {
                    username: ActiveValue::Set(ADMIN_USERNAME.to_string()),
                    password: ActiveValue::Set(hashed),
                    role: ActiveValue::Set(UserRole::Admin.as_str().to_string()),
                    address: ActiveValue::Set(Some(String::new())),
                    tel: ActiveValue::Set(Some(String::new())),
                    fac: ActiveValue::Set(Some(String::new())),
                    is_active: ActiveValue::Set(true),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                };
                model.insert(&self.database).await?;
                tracing::info!("created default admin account");
            }
            Some(existing) => {
                let mut model: users::ActiveModel = existing.clone().into();
                if !existing.is_active {
                    model.is_active = ActiveValue::Set(true);
                }
                if existing.role() != UserRole::Admin {
                    model.role = ActiveValue::Set(UserRole::Admin.as_str().to_string());
                }
                if existing.address.is_none() {
                    model.address = ActiveValue::Set(Some(String::new()));
                }
                if existing.tel.is_none() {
                    model.tel = ActiveValue::Set(Some(String::new()));
                }
                if existing.fac.is_none() {
                    model.fac = ActiveValue::Set(Some(String::new()));
                }
                if model.is_changed() {
                    model.update(&self.database).await?;
                    tracing::info!("repaired admin account state");
                }
            }
        }
        Ok(())
    }
}
