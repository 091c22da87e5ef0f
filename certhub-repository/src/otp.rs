use certhub_error::StorageResult;
use certhub_models::{
    entities::prelude::{
        OtpVerification, OtpVerificationActiveModel, OtpVerificationColumn, OtpVerificationModel,
    },
    enums::OtpPurpose,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

pub struct OtpRepository;

impl OtpRepository {
    pub async fn create<C>(
        otp: OtpVerificationActiveModel,
        db: &C,
    ) -> StorageResult<OtpVerificationModel>
    where
        C: ConnectionTrait,
    {
        Ok(otp.insert(db).await?)
    }

    pub async fn update<C>(
        otp: OtpVerificationActiveModel,
        db: &C,
    ) -> StorageResult<OtpVerificationModel>
    where
        C: ConnectionTrait,
    {
        Ok(otp.update(db).await?)
    }

    /// Active (unverified) code for the scoping key, if any. Email must
    /// already be normalized.
    pub async fn find_active<C>(
        email: &str,
        purpose: OtpPurpose,
        seminar_id: Option<Uuid>,
        db: &C,
    ) -> StorageResult<Option<OtpVerificationModel>>
    where
        C: ConnectionTrait,
    {
        let mut query = OtpVerification::find()
            .filter(OtpVerificationColumn::Email.eq(email))
            .filter(OtpVerificationColumn::Purpose.eq(purpose))
            .filter(OtpVerificationColumn::Verified.eq(false));
        query = match seminar_id {
            Some(id) => query.filter(OtpVerificationColumn::SeminarId.eq(id)),
            None => query.filter(OtpVerificationColumn::SeminarId.is_null()),
        };
        Ok(query.one(db).await?)
    }

    /// Drop any existing rows for the scoping key. Called before issuing a
    /// new code so the one-active-code rule holds.
    pub async fn delete_for_key<C>(
        email: &str,
        purpose: OtpPurpose,
        seminar_id: Option<Uuid>,
        db: &C,
    ) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        let mut query = OtpVerification::delete_many()
            .filter(OtpVerificationColumn::Email.eq(email))
            .filter(OtpVerificationColumn::Purpose.eq(purpose));
        query = match seminar_id {
            Some(id) => query.filter(OtpVerificationColumn::SeminarId.eq(id)),
            None => query.filter(OtpVerificationColumn::SeminarId.is_null()),
        };
        Ok(query.exec(db).await?.rows_affected)
    }

    pub async fn delete_by_id<C>(id: Uuid, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(OtpVerification::delete_by_id(id)
            .exec(db)
            .await?
            .rows_affected)
    }

    /// Remove every row that expired before the cutoff, verified or not.
    pub async fn delete_expired_before<C>(cutoff: DateTime<Utc>, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(OtpVerification::delete_many()
            .filter(OtpVerificationColumn::ExpiresAt.lt(cutoff))
            .exec(db)
            .await?
            .rows_affected)
    }
}
