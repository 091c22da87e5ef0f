use certhub_error::StorageResult;
use certhub_models::{
    domain::PageResult,
    entities::prelude::{
        NameRequest, NameRequestActiveModel, NameRequestColumn, NameRequestModel,
    },
    enums::NameRequestStatus,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct NameRequestRepository;

impl NameRequestRepository {
    pub async fn create<C>(
        request: NameRequestActiveModel,
        db: &C,
    ) -> StorageResult<NameRequestModel>
    where
        C: ConnectionTrait,
    {
        Ok(request.insert(db).await?)
    }

    pub async fn update<C>(
        request: NameRequestActiveModel,
        db: &C,
    ) -> StorageResult<NameRequestModel>
    where
        C: ConnectionTrait,
    {
        Ok(request.update(db).await?)
    }

    pub async fn find_by_id<C>(id: Uuid, db: &C) -> StorageResult<Option<NameRequestModel>>
    where
        C: ConnectionTrait,
    {
        Ok(NameRequest::find_by_id(id).one(db).await?)
    }

    /// Open request for the (seminar, email) pair, if any. Prevents stacking
    /// duplicate correction requests for the same certificate.
    pub async fn find_pending_by_seminar_and_email<C>(
        seminar_id: Uuid,
        email: &str,
        db: &C,
    ) -> StorageResult<Option<NameRequestModel>>
    where
        C: ConnectionTrait,
    {
        Ok(NameRequest::find()
            .filter(NameRequestColumn::SeminarId.eq(seminar_id))
            .filter(NameRequestColumn::Email.eq(email))
            .filter(NameRequestColumn::Status.eq(NameRequestStatus::Pending))
            .one(db)
            .await?)
    }

    pub async fn page<C>(
        status: Option<NameRequestStatus>,
        page: u64,
        page_size: u64,
        db: &C,
    ) -> StorageResult<PageResult<NameRequestModel>>
    where
        C: ConnectionTrait,
    {
        let mut query = NameRequest::find().order_by(NameRequestColumn::CreatedAt, Order::Desc);
        if let Some(status) = status {
            query = query.filter(NameRequestColumn::Status.eq(status));
        }
        let total = query.clone().count(db).await?;
        let records = query
            .paginate(db, page_size)
            .fetch_page(page.saturating_sub(1))
            .await?;

        Ok(PageResult {
            records,
            total,
            pages: total.div_ceil(page_size),
            page,
            page_size,
        })
    }

    /// Terminal-state requests older than the cutoff, removed by cleanup.
    pub async fn delete_resolved_before<C>(cutoff: DateTime<Utc>, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(NameRequest::delete_many()
            .filter(NameRequestColumn::Status.ne(NameRequestStatus::Pending))
            .filter(NameRequestColumn::CreatedAt.lt(cutoff))
            .exec(db)
            .await?
            .rows_affected)
    }
}
