use certhub_error::StorageResult;
use certhub_models::{
    domain::PageResult,
    entities::prelude::{
        Certificate, CertificateActiveModel, CertificateColumn, CertificateModel,
    },
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct CertificateRepository;

impl CertificateRepository {
    /// Insert a new certificate. The (seminar_id, recipient_email) unique
    /// index makes this the authoritative duplicate guard; callers map the
    /// unique-violation error to their conflict handling.
    pub async fn create<C>(
        certificate: CertificateActiveModel,
        db: &C,
    ) -> StorageResult<CertificateModel>
    where
        C: ConnectionTrait,
    {
        Ok(certificate.insert(db).await?)
    }

    pub async fn find_by_id<C>(id: Uuid, db: &C) -> StorageResult<Option<CertificateModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Certificate::find_by_id(id).one(db).await?)
    }

    /// Lookup by the public certificate number (`ZX-...`).
    pub async fn find_by_certificate_id<C>(
        certificate_id: &str,
        db: &C,
    ) -> StorageResult<Option<CertificateModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Certificate::find()
            .filter(CertificateColumn::CertificateId.eq(certificate_id))
            .one(db)
            .await?)
    }

    pub async fn find_by_seminar_and_email<C>(
        seminar_id: Uuid,
        email: &str,
        db: &C,
    ) -> StorageResult<Option<CertificateModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Certificate::find()
            .filter(CertificateColumn::SeminarId.eq(seminar_id))
            .filter(CertificateColumn::RecipientEmail.eq(email))
            .one(db)
            .await?)
    }

    /// Most recent certificate for an email across seminars.
    pub async fn find_latest_by_email<C>(
        email: &str,
        db: &C,
    ) -> StorageResult<Option<CertificateModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Certificate::find()
            .filter(CertificateColumn::RecipientEmail.eq(email))
            .order_by(CertificateColumn::GeneratedAt, Order::Desc)
            .one(db)
            .await?)
    }

    pub async fn page_by_seminar<C>(
        seminar_id: Uuid,
        page: u64,
        page_size: u64,
        db: &C,
    ) -> StorageResult<PageResult<CertificateModel>>
    where
        C: ConnectionTrait,
    {
        let query = Certificate::find()
            .filter(CertificateColumn::SeminarId.eq(seminar_id))
            .order_by(CertificateColumn::GeneratedAt, Order::Desc);
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

    /// Bump the download counter and stamp the access time.
    pub async fn record_download<C>(model: CertificateModel, db: &C) -> StorageResult<CertificateModel>
    where
        C: ConnectionTrait,
    {
        let count = model.download_count + 1;
        let mut active: CertificateActiveModel = model.into();
        active.download_count = Set(count);
        active.last_downloaded_at = Set(Some(Utc::now()));
        Ok(active.update(db).await?)
    }

    /// Certificates older than the retention cutoff, for the cleanup job.
    pub async fn find_generated_before<C>(
        cutoff: DateTime<Utc>,
        db: &C,
    ) -> StorageResult<Vec<CertificateModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Certificate::find()
            .filter(CertificateColumn::GeneratedAt.lt(cutoff))
            .all(db)
            .await?)
    }

    pub async fn delete<C>(id: Uuid, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(Certificate::delete_by_id(id).exec(db).await?.rows_affected)
    }
}
