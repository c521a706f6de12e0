use sea_orm::{ColumnTrait, QueryFilter};

use crate::{orders, users};

/// Authorization scope for order operations.
///
/// Passed explicitly into every order operation; which variant a
/// caller selects *is* the authorization boundary. `Owned` adds a
/// `user_id` filter to every statement, `Unrestricted` adds nothing.
/// A scoped caller probing a foreign row gets the same `KeyNotFound`
/// as for a missing row, so existence never leaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessScope {
    /// Only rows owned by this user are visible.
    Owned(i32),
    /// No ownership filter (admin).
    Unrestricted,
}

impl AccessScope {
    /// Derives the scope from the caller's role attribute.
    pub fn for_user(user: &users::Model) -> Self {
        if user.is_admin() {
            Self::Unrestricted
        } else {
            Self::Owned(user.id)
        }
    }

    pub(super) fn apply<Q>(self, query: Q) -> Q
    where
        Q: QueryFilter + Sized,
    {
        match self {
            Self::Owned(user_id) => query.filter(orders::Column::UserId.eq(user_id)),
            Self::Unrestricted => query,
        }
    }
}
