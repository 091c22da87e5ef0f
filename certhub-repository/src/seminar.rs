use certhub_error::StorageResult;
use certhub_models::{
    domain::PageResult,
    entities::prelude::{Seminar, SeminarActiveModel, SeminarColumn, SeminarModel},
    enums::SeminarStatus,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct SeminarRepository;

impl SeminarRepository {
    pub async fn create<C>(seminar: SeminarActiveModel, db: &C) -> StorageResult<SeminarModel>
    where
        C: ConnectionTrait,
    {
        Ok(seminar.insert(db).await?)
    }

    pub async fn update<C>(seminar: SeminarActiveModel, db: &C) -> StorageResult<SeminarModel>
    where
        C: ConnectionTrait,
    {
        Ok(seminar.update(db).await?)
    }

    pub async fn find_by_id<C>(id: Uuid, db: &C) -> StorageResult<Option<SeminarModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Seminar::find_by_id(id).one(db).await?)
    }

    pub async fn find_by_status<C>(
        status: SeminarStatus,
        db: &C,
    ) -> StorageResult<Vec<SeminarModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Seminar::find()
            .filter(SeminarColumn::Status.eq(status))
            .order_by(SeminarColumn::Date, Order::Desc)
            .all(db)
            .await?)
    }

    pub async fn page<C>(
        page: u64,
        page_size: u64,
        status: Option<SeminarStatus>,
        db: &C,
    ) -> StorageResult<PageResult<SeminarModel>>
    where
        C: ConnectionTrait,
    {
        let mut query = Seminar::find().order_by(SeminarColumn::CreatedAt, Order::Desc);
        if let Some(status) = status {
            query = query.filter(SeminarColumn::Status.eq(status));
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

    pub async fn delete<C>(id: Uuid, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(Seminar::delete_by_id(id).exec(db).await?.rows_affected)
    }
}
