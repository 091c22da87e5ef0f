use certhub_error::StorageResult;
use certhub_models::entities::prelude::{
    Feedback, FeedbackActiveModel, FeedbackColumn, FeedbackModel,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

pub struct FeedbackRepository;

impl FeedbackRepository {
    pub async fn create<C>(feedback: FeedbackActiveModel, db: &C) -> StorageResult<FeedbackModel>
    where
        C: ConnectionTrait,
    {
        Ok(feedback.insert(db).await?)
    }

    pub async fn find_by_id<C>(id: Uuid, db: &C) -> StorageResult<Option<FeedbackModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Feedback::find_by_id(id).one(db).await?)
    }

    pub async fn find_by_seminar_and_email<C>(
        seminar_id: Uuid,
        email: &str,
        db: &C,
    ) -> StorageResult<Option<FeedbackModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Feedback::find()
            .filter(FeedbackColumn::SeminarId.eq(seminar_id))
            .filter(FeedbackColumn::Email.eq(email))
            .one(db)
            .await?)
    }

    pub async fn find_by_seminar<C>(seminar_id: Uuid, db: &C) -> StorageResult<Vec<FeedbackModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Feedback::find()
            .filter(FeedbackColumn::SeminarId.eq(seminar_id))
            .all(db)
            .await?)
    }

    pub async fn delete_submitted_before<C>(cutoff: DateTime<Utc>, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(Feedback::delete_many()
            .filter(FeedbackColumn::SubmittedAt.lt(cutoff))
            .exec(db)
            .await?
            .rows_affected)
    }
}
