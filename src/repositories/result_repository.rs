use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::ExamResult};

/// Append-only ledger of graded attempts. There is deliberately no update or
/// delete operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn append(&self, result: ExamResult) -> AppResult<ExamResult>;
    async fn count_for_taker_and_exam(&self, user_id: &str, exam_id: &str) -> AppResult<u64>;
    /// Newest first. An unknown taker yields an empty list.
    async fn find_by_taker(&self, user_id: &str) -> AppResult<Vec<ExamResult>>;
    /// Newest first. Matches on the creator id copied onto each result.
    async fn find_by_exam_creator(&self, creator_id: &str) -> AppResult<Vec<ExamResult>>;
    async fn count(&self) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoResultRepository {
    collection: Collection<ExamResult>,
}

impl MongoResultRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("results");
        Self { collection }
    }
}

#[async_trait]
impl ResultRepository for MongoResultRepository {
    async fn append(&self, result: ExamResult) -> AppResult<ExamResult> {
        self.collection.insert_one(&result).await?;
        Ok(result)
    }

    async fn count_for_taker_and_exam(&self, user_id: &str, exam_id: &str) -> AppResult<u64> {
        let count = self
            .collection
            .count_documents(doc! {
                "user_id": user_id,
                "exam_id": exam_id
            })
            .await?;
        Ok(count)
    }

    async fn find_by_taker(&self, user_id: &str) -> AppResult<Vec<ExamResult>> {
        let results = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "timestamp": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }

    async fn find_by_exam_creator(&self, creator_id: &str) -> AppResult<Vec<ExamResult>> {
        let results = self
            .collection
            .find(doc! { "exam_creator_id": creator_id })
            .sort(doc! { "timestamp": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for results collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let taker_exam_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "exam_id": 1 })
            .options(IndexOptions::builder().name("taker_exam".to_string()).build())
            .build();

        let creator_index = IndexModel::builder()
            .keys(doc! { "exam_creator_id": 1, "timestamp": -1 })
            .options(
                IndexOptions::builder()
                    .name("creator_timestamp".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(taker_exam_index).await?;
        self.collection.create_index(creator_index).await?;

        log::info!("Successfully created indexes for results collection");
        Ok(())
    }
}
