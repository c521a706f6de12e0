use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    /// Registration request; rejected before any row is inserted when
    /// the password is too short or the confirmation differs.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterUser {
        pub username: String,
        pub password: String,
        pub confirm_password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i32,
        pub username: String,
        pub role: String,
        pub is_active: bool,
        pub created_at: DateTime<Utc>,
    }

    /// Profile replacement state. The caller supplies the complete
    /// current profile; omitted optional fields are cleared.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileUpdate {
        pub username: String,
        pub address: Option<String>,
        pub tel: Option<String>,
        pub fac: Option<String>,
        /// Base64-encoded logo bytes.
        pub logo_data: Option<String>,
        pub logo_content_type: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileView {
        pub id: i32,
        pub username: String,
        pub address: Option<String>,
        pub tel: Option<String>,
        pub fac: Option<String>,
        pub has_logo: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InactiveUsersResponse {
        pub users: Vec<UserView>,
    }
}

pub mod order {
    use super::*;

    /// Order lifecycle status as exposed on the wire.
    ///
    /// `deleted` is accepted on status updates only and removes the
    /// order; it never appears in responses.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum OrderStatus {
        Received,
        Processing,
        Paused,
        Shipped,
        Deleted,
    }

    impl OrderStatus {
        /// Returns the canonical status string used by the engine/database.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Received => "received",
                Self::Processing => "processing",
                Self::Paused => "paused",
                Self::Shipped => "shipped",
                Self::Deleted => "deleted",
            }
        }
    }

    /// Create/update body carrying the full business field map.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct OrderPayload {
        pub no: Option<String>,
        pub nama: Option<String>,
        pub terima_tgl: Option<NaiveDate>,
        pub telpon: Option<String>,
        pub selesal_tgl: Option<NaiveDate>,
        pub alamat: Option<String>,
        pub kode: Option<String>,
        pub bram_karat1: Option<String>,
        pub bram_karat2: Option<String>,
        pub bram_karat3: Option<String>,
        pub bram_karat4: Option<String>,
        pub bram_karat5: Option<String>,
        pub bram_karat6: Option<String>,
        pub bram_karat7: Option<String>,
        pub bram_karat8: Option<String>,
        pub bram_karat9: Option<String>,
        pub bram_karat10: Option<String>,
        pub toko: Option<String>,
        pub spl_qc: Option<String>,
        pub pesanan_tiba_dikirim_tanggal: Option<NaiveDate>,
        pub order_name: Option<String>,
        pub order_amount: Option<i64>,
        pub status: Option<OrderStatus>,
        pub description: Option<String>,
        /// Base64-encoded image bytes.
        pub image_data: Option<String>,
        pub image_content_type: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderView {
        pub id: i32,
        pub user_id: i32,
        pub no: String,
        pub nama: String,
        pub terima_tgl: Option<NaiveDate>,
        pub telpon: Option<String>,
        pub selesal_tgl: Option<NaiveDate>,
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
        pub pesanan_tiba_dikirim_tanggal: Option<NaiveDate>,
        pub order_name: Option<String>,
        pub order_amount: Option<i64>,
        pub status: OrderStatus,
        pub description: Option<String>,
        pub has_image: bool,
        pub owner_username: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// Owner context rendered alongside an order detail.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct OwnerView {
        pub user_id: i32,
        pub username: String,
        pub address: Option<String>,
        pub tel: Option<String>,
        pub fac: Option<String>,
        pub has_logo: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderDetailResponse {
        pub order: OrderView,
        pub owner: Option<OwnerView>,
    }

    /// Query string for order listing.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct OrderListQuery {
        pub page: Option<u64>,
        pub page_size: Option<u64>,
        pub search: Option<String>,
        pub status: Option<OrderStatus>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderListResponse {
        pub orders: Vec<OrderView>,
        pub page: u64,
        pub total: u64,
        pub total_pages: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatusUpdate {
        pub status: OrderStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderCreated {
        pub id: i32,
    }
}
