use chrono::Utc;
use sea_orm::{
    ActiveValue, Condition, QueryFilter, QueryOrder, QuerySelect, prelude::*,
};

use crate::{AccessScope, EngineError, OrderStatus, ResultEngine, orders, users};

use super::Engine;

/// Field map for creating or overwriting an order.
///
/// `create_order` and `update_order` replace every business column
/// from this struct: absent text among `no`, `nama` and the ten
/// process-stage fields becomes the empty string (never NULL), while
/// absent dates and `order_amount` stay NULL.
#[derive(Clone, Debug, Default)]
pub struct OrderDraft {
    pub no: Option<String>,
    pub nama: Option<String>,
    pub terima_tgl: Option<Date>,
    pub telpon: Option<String>,
    pub selesal_tgl: Option<Date>,
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
    pub pesanan_tiba_dikirim_tanggal: Option<Date>,
    pub order_name: Option<String>,
    pub order_amount: Option<i64>,
    pub status: Option<OrderStatus>,
    pub description: Option<String>,
    pub image_data: Option<Vec<u8>>,
    pub image_content_type: Option<String>,
}

/// Public owner fields joined into order reads, so detail views render
/// owner context without a second lookup. Never carries the hash.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnerProfile {
    pub user_id: i32,
    pub username: String,
    pub logo_data: Option<Vec<u8>>,
    pub logo_content_type: Option<String>,
    pub address: Option<String>,
    pub tel: Option<String>,
    pub fac: Option<String>,
}

impl From<users::Model> for OwnerProfile {
    fn from(user: users::Model) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            logo_data: user.logo_data,
            logo_content_type: user.logo_content_type,
            address: user.address,
            tel: user.tel,
            fac: user.fac,
        }
    }
}

/// An order together with its owner's public profile.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderDetail {
    pub order: orders::Model,
    pub owner: Option<OwnerProfile>,
}

/// Filters for listing and counting orders.
#[derive(Clone, Debug)]
pub struct OrderListFilter {
    /// 1-based page number.
    pub page: u64,
    pub page_size: u64,
    /// Substring match across order number, customer name, store and
    /// production code (backend LIKE semantics).
    pub search: Option<String>,
    /// Exact status match.
    pub status: Option<OrderStatus>,
}

impl Default for OrderListFilter {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            search: None,
            status: None,
        }
    }
}

fn validate_list_filter(filter: &OrderListFilter) -> ResultEngine<()> {
    if filter.page == 0 {
        return Err(EngineError::InvalidInput(
            "page must be >= 1".to_string(),
        ));
    }
    if filter.page_size == 0 {
        return Err(EngineError::InvalidInput(
            "page_size must be >= 1".to_string(),
        ));
    }
    Ok(())
}

trait ApplyOrderFilters: QueryFilter + Sized {
    fn apply_order_filters(self, filter: &OrderListFilter) -> Self;
}

impl<T> ApplyOrderFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_order_filters(mut self, filter: &OrderListFilter) -> Self {
        if let Some(term) = filter.search.as_deref().map(str::trim)
            && !term.is_empty()
        {
            self = self.filter(
                Condition::any()
                    .add(orders::Column::No.contains(term))
                    .add(orders::Column::Nama.contains(term))
                    .add(orders::Column::Toko.contains(term))
                    .add(orders::Column::Kode.contains(term)),
            );
        }
        if let Some(status) = filter.status {
            self = self.filter(orders::Column::Status.eq(status.as_str()));
        }
        self
    }
}

fn not_exists() -> EngineError {
    EngineError::KeyNotFound("order not exists".to_string())
}

impl Engine {
    /// Inserts a new order for `owner_id`.
    ///
    /// Absent status defaults to `received`; `deleted` is not a
    /// storable status and is rejected.
    pub async fn create_order(&self, owner_id: i32, draft: OrderDraft) -> ResultEngine<orders::Model> {
        let status = draft.status.unwrap_or(OrderStatus::Received);
        if status == OrderStatus::Deleted {
            return Err(EngineError::InvalidInput(
                "cannot create an order with status deleted".to_string(),
            ));
        }

        let now = Utc::now();
        let model = orders::ActiveModel {
            user_id: ActiveValue::Set(owner_id),
            no: ActiveValue::Set(draft.no.unwrap_or_default()),
            nama: ActiveValue::Set(draft.nama.unwrap_or_default()),
            terima_tgl: ActiveValue::Set(draft.terima_tgl),
            telpon: ActiveValue::Set(draft.telpon),
            selesal_tgl: ActiveValue::Set(draft.selesal_tgl),
            alamat: ActiveValue::Set(draft.alamat),
            kode: ActiveValue::Set(draft.kode),
            bram_karat1: ActiveValue::Set(draft.bram_karat1.unwrap_or_default()),
            bram_karat2: ActiveValue::Set(draft.bram_karat2.unwrap_or_default()),
            bram_karat3: ActiveValue::Set(draft.bram_karat3.unwrap_or_default()),
            bram_karat4: ActiveValue::Set(draft.bram_karat4.unwrap_or_default()),
            bram_karat5: ActiveValue::Set(draft.bram_karat5.unwrap_or_default()),
            bram_karat6: ActiveValue::Set(draft.bram_karat6.unwrap_or_default()),
            bram_karat7: ActiveValue::Set(draft.bram_karat7.unwrap_or_default()),
            bram_karat8: ActiveValue::Set(draft.bram_karat8.unwrap_or_default()),
            bram_karat9: ActiveValue::Set(draft.bram_karat9.unwrap_or_default()),
            bram_karat10: ActiveValue::Set(draft.bram_karat10.unwrap_or_default()),
            toko: ActiveValue::Set(draft.toko),
            spl_qc: ActiveValue::Set(draft.spl_qc),
            pesanan_tiba_dikirim_tanggal: ActiveValue::Set(draft.pesanan_tiba_dikirim_tanggal),
            order_name: ActiveValue::Set(draft.order_name),
            order_amount: ActiveValue::Set(draft.order_amount),
            status: ActiveValue::Set(status.as_str().to_string()),
            description: ActiveValue::Set(draft.description),
            image_data: ActiveValue::Set(draft.image_data),
            image_content_type: ActiveValue::Set(draft.image_content_type),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        model.insert(&self.database).await.map_err(Into::into)
    }

    /// An order joined with its owner's public profile.
    pub async fn order_detail(&self, scope: AccessScope, order_id: i32) -> ResultEngine<OrderDetail> {
        let row = scope
            .apply(orders::Entity::find_by_id(order_id))
            .find_also_related(users::Entity)
            .one(&self.database)
            .await?;

        let (order, owner) = row.ok_or_else(not_exists)?;
        Ok(OrderDetail {
            order,
            owner: owner.map(Into::into),
        })
    }

    /// One page of orders, newest first.
    pub async fn list_orders(
        &self,
        scope: AccessScope,
        filter: &OrderListFilter,
    ) -> ResultEngine<Vec<OrderDetail>> {
        validate_list_filter(filter)?;
        let offset = (filter.page - 1) * filter.page_size;

        let rows: Vec<(orders::Model, Option<users::Model>)> = scope
            .apply(orders::Entity::find())
            .apply_order_filters(filter)
            .find_also_related(users::Entity)
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .offset(offset)
            .limit(filter.page_size)
            .all(&self.database)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(order, owner)| OrderDetail {
                order,
                owner: owner.map(Into::into),
            })
            .collect())
    }

    /// Total rows matching the filter, for page-count computation.
    pub async fn count_orders(
        &self,
        scope: AccessScope,
        filter: &OrderListFilter,
    ) -> ResultEngine<u64> {
        scope
            .apply(orders::Entity::find())
            .apply_order_filters(filter)
            .count(&self.database)
            .await
            .map_err(Into::into)
    }

    /// Full overwrite of the business fields plus image; bumps
    /// `updated_at`. Absent status keeps the stored one.
    pub async fn update_order(
        &self,
        scope: AccessScope,
        order_id: i32,
        draft: OrderDraft,
    ) -> ResultEngine<orders::Model> {
        let existing = scope
            .apply(orders::Entity::find_by_id(order_id))
            .one(&self.database)
            .await?
            .ok_or_else(not_exists)?;

        let status = match draft.status {
            Some(OrderStatus::Deleted) => {
                return Err(EngineError::InvalidInput(
                    "status deleted must go through a status update".to_string(),
                ));
            }
            Some(status) => status.as_str().to_string(),
            None => existing.status.clone(),
        };

        let mut model: orders::ActiveModel = existing.into();
        model.no = ActiveValue::Set(draft.no.unwrap_or_default());
        model.nama = ActiveValue::Set(draft.nama.unwrap_or_default());
        model.terima_tgl = ActiveValue::Set(draft.terima_tgl);
        model.telpon = ActiveValue::Set(draft.telpon);
        model.selesal_tgl = ActiveValue::Set(draft.selesal_tgl);
        model.alamat = ActiveValue::Set(draft.alamat);
        model.kode = ActiveValue::Set(draft.kode);
        model.bram_karat1 = ActiveValue::Set(draft.bram_karat1.unwrap_or_default());
        model.bram_karat2 = ActiveValue::Set(draft.bram_karat2.unwrap_or_default());
        model.bram_karat3 = ActiveValue::Set(draft.bram_karat3.unwrap_or_default());
        model.bram_karat4 = ActiveValue::Set(draft.bram_karat4.unwrap_or_default());
        model.bram_karat5 = ActiveValue::Set(draft.bram_karat5.unwrap_or_default());
        model.bram_karat6 = ActiveValue::Set(draft.bram_karat6.unwrap_or_default());
        model.bram_karat7 = ActiveValue::Set(draft.bram_karat7.unwrap_or_default());
        model.bram_karat8 = ActiveValue::Set(draft.bram_karat8.unwrap_or_default());
        model.bram_karat9 = ActiveValue::Set(draft.bram_karat9.unwrap_or_default());
        model.bram_karat10 = ActiveValue::Set(draft.bram_karat10.unwrap_or_default());
        model.toko = ActiveValue::Set(draft.toko);
        model.spl_qc = ActiveValue::Set(draft.spl_qc);
        model.pesanan_tiba_dikirim_tanggal = ActiveValue::Set(draft.pesanan_tiba_dikirim_tanggal);
        model.order_name = ActiveValue::Set(draft.order_name);
        model.order_amount = ActiveValue::Set(draft.order_amount);
        model.status = ActiveValue::Set(status);
        model.description = ActiveValue::Set(draft.description);
        model.image_data = ActiveValue::Set(draft.image_data);
        model.image_content_type = ActiveValue::Set(draft.image_content_type);
        model.updated_at = ActiveValue::Set(Utc::now());

        model.update(&self.database).await.map_err(Into::into)
    }

    /// Updates only status and `updated_at`.
    ///
    /// Requesting `deleted` removes the row instead: the value is a
    /// delete trigger, never stored state.
    pub async fn update_order_status(
        &self,
        scope: AccessScope,
        order_id: i32,
        status: OrderStatus,
    ) -> ResultEngine<()> {
        if status == OrderStatus::Deleted {
            return self.delete_order(scope, order_id).await;
        }

        let existing = scope
            .apply(orders::Entity::find_by_id(order_id))
            .one(&self.database)
            .await?
            .ok_or_else(not_exists)?;

        let mut model: orders::ActiveModel = existing.into();
        model.status = ActiveValue::Set(status.as_str().to_string());
        model.updated_at = ActiveValue::Set(Utc::now());
        model.update(&self.database).await?;
        Ok(())
    }

    /// Hard row removal.
    pub async fn delete_order(&self, scope: AccessScope, order_id: i32) -> ResultEngine<()> {
        let res = scope
            .apply(orders::Entity::delete_many().filter(orders::Column::Id.eq(order_id)))
            .exec(&self.database)
            .await?;

        if res.rows_affected == 0 {
            return Err(not_exists());
        }
        Ok(())
    }
}
