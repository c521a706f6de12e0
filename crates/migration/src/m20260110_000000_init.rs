//! Initial schema migration - creates the base tables from scratch.
//!
//! It creates the core schema for Bengkel:
//!
//! - `users`: accounts with role, activation flag and optional logo
//! - `orders`: manufacturing job tickets owned by users
//!
//! The later business columns (`order_name`, `order_amount`, `status`,
//! `description`) arrive in the follow-up additive migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Password,
    Role,
    LogoData,
    LogoContentType,
    Address,
    Tel,
    Fac,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    UserId,
    No,
    Nama,
    TerimaTgl,
    Telpon,
    SelesalTgl,
    Alamat,
    Kode,
    BramKarat1,
    BramKarat2,
    BramKarat3,
    BramKarat4,
    BramKarat5,
    BramKarat6,
    BramKarat7,
    BramKarat8,
    BramKarat9,
    BramKarat10,
    Toko,
    SplQc,
    PesananTibaDikirimTanggal,
    ImageData,
    ImageContentType,
    CreatedAt,
    UpdatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("user"),
                    )
                    .col(ColumnDef::new(Users::LogoData).blob())
                    .col(ColumnDef::new(Users::LogoContentType).string())
                    .col(ColumnDef::new(Users::Address).string())
                    .col(ColumnDef::new(Users::Tel).string())
                    .col(ColumnDef::new(Users::Fac).string())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-username-unique")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Orders
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Orders::No)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Orders::Nama)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Orders::TerimaTgl).date())
                    .col(ColumnDef::new(Orders::Telpon).string())
                    .col(ColumnDef::new(Orders::SelesalTgl).date())
                    .col(ColumnDef::new(Orders::Alamat).string())
                    .col(ColumnDef::new(Orders::Kode).string())
                    .col(
                        ColumnDef::new(Orders::BramKarat1)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Orders::BramKarat2)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Orders::BramKarat3)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Orders::BramKarat4)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Orders::BramKarat5)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Orders::BramKarat6)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Orders::BramKarat7)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Orders::BramKarat8)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Orders::BramKarat9)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Orders::BramKarat10)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Orders::Toko).string())
                    .col(ColumnDef::new(Orders::SplQc).string())
                    .col(ColumnDef::new(Orders::PesananTibaDikirimTanggal).date())
                    .col(ColumnDef::new(Orders::ImageData).blob())
                    .col(ColumnDef::new(Orders::ImageContentType).string())
                    .col(ColumnDef::new(Orders::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Orders::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-orders-user_id")
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-orders-user_id")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-orders-user_id-created_at")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
