use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, UserRole, credentials, orders, users};

use super::{Engine, normalize_required_name, with_tx};

/// Minimum accepted password length for registration and resets.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Full replacement state for the mutable user fields.
///
/// `update_user` overwrites every field listed here, so callers must
/// supply the complete current state or they will clear columns.
#[derive(Clone, Debug, Default)]
pub struct UserUpdate {
    pub username: String,
    pub logo_data: Option<Vec<u8>>,
    pub logo_content_type: Option<String>,
    pub address: Option<String>,
    pub tel: Option<String>,
    pub fac: Option<String>,
    pub is_active: bool,
}

fn map_unique_violation(err: DbErr, username: &str) -> EngineError {
    // sqlite reports constraint violations only through the message.
    if err.to_string().contains("UNIQUE") {
        EngineError::ExistingKey(username.to_string())
    } else {
        EngineError::Database(err)
    }
}

impl Engine {
    /// Registers a new account: hashed password, role `user`, inactive
    /// until an admin approves it.
    pub async fn create_user(&self, username: &str, password: &str) -> ResultEngine<users::Model> {
        let username = normalize_required_name(username, "username")?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(EngineError::InvalidInput(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let exists = users::Entity::find()
            .filter(users::Column::Username.eq(username.clone()))
            .one(&self.database)
            .await?
            .is_some();
        if exists {
            return Err(EngineError::ExistingKey(username));
        }

        let hashed = credentials::hash_password(password)?;
        let model = users::ActiveModel {
            username: ActiveValue::Set(username.clone()),
            password: ActiveValue::Set(hashed),
            role: ActiveValue::Set(UserRole::User.as_str().to_string()),
            is_active: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };

        model
            .insert(&self.database)
            .await
            .map_err(|err| map_unique_violation(err, &username))
    }

    pub async fn find_by_username(&self, username: &str) -> ResultEngine<Option<users::Model>> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.database)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(&self, user_id: i32) -> ResultEngine<Option<users::Model>> {
        users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await
            .map_err(Into::into)
    }

    /// One-way comparison against the stored hash; fails closed.
    pub fn verify_password(&self, user: &users::Model, password: &str) -> bool {
        credentials::verify_password(&user.password, password)
    }

    /// Resolves a caller from credentials.
    ///
    /// Bad username and bad password are indistinguishable; an inactive
    /// account is reported separately so the client can explain the
    /// pending-approval state.
    pub async fn authenticate(&self, username: &str, password: &str) -> ResultEngine<users::Model> {
        let Some(user) = self.find_by_username(username).await? else {
            return Err(EngineError::InvalidCredentials);
        };
        if !credentials::verify_password(&user.password, password) {
            return Err(EngineError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(EngineError::InactiveAccount);
        }
        Ok(user)
    }

    /// Full overwrite of the mutable user fields. See [`UserUpdate`].
    pub async fn update_user(&self, user_id: i32, update: UserUpdate) -> ResultEngine<users::Model> {
        let username = normalize_required_name(&update.username, "username")?;
        let existing = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;

        let mut model: users::ActiveModel = existing.into();
        model.username = ActiveValue::Set(username.clone());
        model.logo_data = ActiveValue::Set(update.logo_data);
        model.logo_content_type = ActiveValue::Set(update.logo_content_type);
        model.address = ActiveValue::Set(update.address);
        model.tel = ActiveValue::Set(update.tel);
        model.fac = ActiveValue::Set(update.fac);
        model.is_active = ActiveValue::Set(update.is_active);

        model
            .update(&self.database)
            .await
            .map_err(|err| map_unique_violation(err, &username))
    }

    /// Replaces the stored hash with one for `password`. Used by the
    /// operator CLI for resets; the old password is not required.
    pub async fn set_password(&self, user_id: i32, password: &str) -> ResultEngine<()> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(EngineError::InvalidInput(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;

        let mut model: users::ActiveModel = user.into();
        model.password = ActiveValue::Set(credentials::hash_password(password)?);
        model.update(&self.database).await?;
        Ok(())
    }

    pub async fn activate_user(&self, user_id: i32) -> ResultEngine<()> {
        self.set_active(user_id, true).await
    }

    pub async fn deactivate_user(&self, user_id: i32) -> ResultEngine<()> {
        self.set_active(user_id, false).await
    }

    /// Targeted flag flip; no other field is touched.
    async fn set_active(&self, user_id: i32, active: bool) -> ResultEngine<()> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;

        let mut model: users::ActiveModel = user.into();
        model.is_active = ActiveValue::Set(active);
        model.update(&self.database).await?;
        Ok(())
    }

    /// Accounts awaiting activation, oldest first (FIFO admin review).
    pub async fn inactive_users(&self) -> ResultEngine<Vec<users::Model>> {
        users::Entity::find()
            .filter(users::Column::IsActive.eq(false))
            .order_by_asc(users::Column::CreatedAt)
            .order_by_asc(users::Column::Id)
            .all(&self.database)
            .await
            .map_err(Into::into)
    }

    /// Removes an account and all of its orders in one DB transaction.
    pub async fn delete_user(&self, user_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            orders::Entity::delete_many()
                .filter(orders::Column::UserId.eq(user_id))
                .exec(&db_tx)
                .await?;

            let res = users::Entity::delete_by_id(user_id).exec(&db_tx).await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("user not exists".to_string()));
            }
            Ok(())
        })
    }
}
