use certhub_error::StorageResult;
use certhub_models::{
    domain::PageResult,
    entities::prelude::{
        Registration, RegistrationActiveModel, RegistrationColumn, RegistrationModel,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct RegistrationRepository;

impl RegistrationRepository {
    pub async fn create<C>(
        registration: RegistrationActiveModel,
        db: &C,
    ) -> StorageResult<RegistrationModel>
    where
        C: ConnectionTrait,
    {
        Ok(registration.insert(db).await?)
    }

    pub async fn update<C>(
        registration: RegistrationActiveModel,
        db: &C,
    ) -> StorageResult<RegistrationModel>
    where
        C: ConnectionTrait,
    {
        Ok(registration.update(db).await?)
    }

    /// Lookup by the (seminar, email) pair that the unique index guards.
    /// Email must already be normalized (lowercased).
    pub async fn find_by_seminar_and_email<C>(
        seminar_id: Uuid,
        email: &str,
        db: &C,
    ) -> StorageResult<Option<RegistrationModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Registration::find()
            .filter(RegistrationColumn::SeminarId.eq(seminar_id))
            .filter(RegistrationColumn::Email.eq(email))
            .one(db)
            .await?)
    }

    pub async fn find_by_id<C>(id: Uuid, db: &C) -> StorageResult<Option<RegistrationModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Registration::find_by_id(id).one(db).await?)
    }

    /// Most recent verified registration for an email, any seminar. Used by
    /// the certificate flow when the caller did not scope to a seminar.
    pub async fn find_latest_verified_by_email<C>(
        email: &str,
        db: &C,
    ) -> StorageResult<Option<RegistrationModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Registration::find()
            .filter(RegistrationColumn::Email.eq(email))
            .filter(RegistrationColumn::EmailVerified.eq(true))
            .order_by(RegistrationColumn::RegisteredAt, Order::Desc)
            .one(db)
            .await?)
    }

    /// All verified registrations for a seminar, for notification fan-out.
    pub async fn find_verified_by_seminar<C>(
        seminar_id: Uuid,
        db: &C,
    ) -> StorageResult<Vec<RegistrationModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Registration::find()
            .filter(RegistrationColumn::SeminarId.eq(seminar_id))
            .filter(RegistrationColumn::EmailVerified.eq(true))
            .order_by(RegistrationColumn::RegisteredAt, Order::Asc)
            .all(db)
            .await?)
    }

    pub async fn page_by_seminar<C>(
        seminar_id: Uuid,
        page: u64,
        page_size: u64,
        db: &C,
    ) -> StorageResult<PageResult<RegistrationModel>>
    where
        C: ConnectionTrait,
    {
        let query = Registration::find()
            .filter(RegistrationColumn::SeminarId.eq(seminar_id))
            .order_by(RegistrationColumn::RegisteredAt, Order::Desc);
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

    pub async fn count_by_seminar<C>(seminar_id: Uuid, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(Registration::find()
            .filter(RegistrationColumn::SeminarId.eq(seminar_id))
            .count(db)
            .await?)
    }
}
