//! Users table.
//!
//! `password` holds the argon2 hash, never plaintext. `role` is the
//! canonical string of [`UserRole`]; `is_active` gates login and is
//! false for fresh registrations until an admin approves them.
//!
//! [`UserRole`]: crate::UserRole

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub role: String,
    pub logo_data: Option<Vec<u8>>,
    pub logo_content_type: Option<String>,
    pub address: Option<String>,
    pub tel: Option<String>,
    pub fac: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn role(&self) -> crate::UserRole {
        crate::UserRole::try_from(self.role.as_str()).unwrap_or(crate::UserRole::User)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == crate::UserRole::Admin
    }
}
