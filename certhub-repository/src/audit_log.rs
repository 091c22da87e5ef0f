use certhub_error::StorageResult;
use certhub_models::{
    domain::{AuditQuery, PageResult},
    entities::prelude::{AuditLog, AuditLogActiveModel, AuditLogColumn, AuditLogModel},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QueryTrait,
};

pub struct AuditLogRepository;

impl AuditLogRepository {
    pub async fn create<C>(entry: AuditLogActiveModel, db: &C) -> StorageResult<AuditLogModel>
    where
        C: ConnectionTrait,
    {
        Ok(entry.insert(db).await?)
    }

    pub async fn page<C>(params: &AuditQuery, db: &C) -> StorageResult<PageResult<AuditLogModel>>
    where
        C: ConnectionTrait,
    {
        let query = AuditLog::find()
            .apply_if(params.admin_id, |q, admin_id| {
                q.filter(AuditLogColumn::AdminId.eq(admin_id))
            })
            .apply_if(params.action, |q, action| {
                q.filter(AuditLogColumn::Action.eq(action))
            })
            .apply_if(params.resource.as_ref(), |q, resource| {
                q.filter(AuditLogColumn::Resource.eq(resource.as_str()))
            })
            .apply_if(params.start_date, |q, start| {
                q.filter(AuditLogColumn::CreatedAt.gte(start))
            })
            .apply_if(params.end_date, |q, end| {
                q.filter(AuditLogColumn::CreatedAt.lte(end))
            })
            .order_by(AuditLogColumn::CreatedAt, Order::Desc);
        let (page, page_size) = (params.page(), params.page_size());
        let total = query.clone().count(db).await?;
        let records = query
            .paginate(db, page_size)
            .fetch_page(page - 1)
            .await?;

        Ok(PageResult {
            records,
            total,
            pages: total.div_ceil(page_size),
            page,
            page_size,
        })
    }

    pub async fn delete_created_before<C>(cutoff: DateTime<Utc>, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(AuditLog::delete_many()
            .filter(AuditLogColumn::CreatedAt.lt(cutoff))
            .exec(db)
            .await?
            .rows_affected)
    }
}
