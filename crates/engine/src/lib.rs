pub use error::EngineError;
pub use ops::{
    AccessScope, Engine, EngineBuilder, OrderDetail, OrderDraft, OrderListFilter, OwnerProfile,
    UserUpdate, ADMIN_USERNAME, MIN_PASSWORD_LEN,
};
pub use role::UserRole;
pub use sea_orm;
pub use status::OrderStatus;

mod credentials;
mod error;
mod ops;
mod role;
mod status;

pub mod orders;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;
