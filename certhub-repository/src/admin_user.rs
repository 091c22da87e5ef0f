use certhub_error::StorageResult;
use certhub_models::entities::prelude::{
    AdminUser, AdminUserActiveModel, AdminUserColumn, AdminUserModel,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct AdminUserRepository;

impl AdminUserRepository {
    pub async fn create<C>(admin: AdminUserActiveModel, db: &C) -> StorageResult<AdminUserModel>
    where
        C: ConnectionTrait,
    {
        Ok(admin.insert(db).await?)
    }

    pub async fn update<C>(admin: AdminUserActiveModel, db: &C) -> StorageResult<AdminUserModel>
    where
        C: ConnectionTrait,
    {
        Ok(admin.update(db).await?)
    }

    pub async fn find_by_id<C>(id: Uuid, db: &C) -> StorageResult<Option<AdminUserModel>>
    where
        C: ConnectionTrait,
    {
        Ok(AdminUser::find_by_id(id).one(db).await?)
    }

    /// Email must already be normalized (lowercased).
    pub async fn find_by_email<C>(email: &str, db: &C) -> StorageResult<Option<AdminUserModel>>
    where
        C: ConnectionTrait,
    {
        Ok(AdminUser::find()
            .filter(AdminUserColumn::Email.eq(email))
            .one(db)
            .await?)
    }

    pub async fn find_active_by_email<C>(
        email: &str,
        db: &C,
    ) -> StorageResult<Option<AdminUserModel>>
    where
        C: ConnectionTrait,
    {
        Ok(AdminUser::find()
            .filter(AdminUserColumn::Email.eq(email))
            .filter(AdminUserColumn::IsActive.eq(true))
            .one(db)
            .await?)
    }

    pub async fn find_all<C>(db: &C) -> StorageResult<Vec<AdminUserModel>>
    where
        C: ConnectionTrait,
    {
        Ok(AdminUser::find()
            .order_by(AdminUserColumn::CreatedAt, Order::Asc)
            .all(db)
            .await?)
    }
}
