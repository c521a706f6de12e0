//! Orders table (manufacturing job tickets).
//!
//! Column names follow the historical schema: `no` is the order
//! number, `nama` the customer name, `terima_tgl`/`selesal_tgl` the
//! received/finish dates, `kode` the production code, `toko` the
//! store, `spl_qc` the QC notes and `bram_karat1`..`bram_karat10` the
//! free-text process-stage fields. The process-stage fields plus
//! `no`/`nama` are non-null and default to the empty string; date and
//! amount columns stay NULL when absent.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub no: String,
    pub nama: String,
    pub terima_tgl: Option<Date>,
    pub telpon: Option<String>,
    pub selesal_tgl: Option<Date>,
    pub alamat: Option<String>,
    pub kode: Option<String>,
    pub bram_karat1: String,
    pub bram_karat2: String,
    pub bram_karat3: String,
    pub bram_karat4: String,
    pub bram_karat5: String,
    pub bram_karat6: String,
    pub bram_karat7: String,
    pub bram_karat8: String,
    pub bram_karat9: String,
    pub bram_karat10: String,
    pub toko: Option<String>,
    pub spl_qc: Option<String>,
    pub pesanan_tiba_dikirim_tanggal: Option<Date>,
    pub order_name: Option<String>,
    pub order_amount: Option<i64>,
    pub status: String,
    pub description: Option<String>,
    pub image_data: Option<Vec<u8>>,
    pub image_content_type: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
