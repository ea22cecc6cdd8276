use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};
use tokio::sync::RwLock;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{links::unique_ids, Quiz, QuizQuestionLink},
    repositories::table::{MemoryTable, MongoTable},
};

/// Quizzes plus the `quiz_questions` edge set. Deleting a quiz drops its
/// edges and never the referenced questions.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quiz>>;
    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Quiz>>;
    async fn find_all(&self) -> AppResult<Vec<Quiz>>;
    async fn find_by_folders(&self, folder_ids: &[i64]) -> AppResult<Vec<Quiz>>;
    async fn update(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64>;
    async fn set_questions(&self, quiz_id: i64, question_ids: &[i64]) -> AppResult<()>;
    async fn question_ids(&self, quiz_id: i64) -> AppResult<Vec<i64>>;
    async fn quiz_ids_for_question(&self, question_id: i64) -> AppResult<Vec<i64>>;
    async fn remove_question_links(&self, question_id: i64) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    table: MongoTable<Quiz>,
    links: Collection<QuizQuestionLink>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            table: MongoTable::new(db),
            links: db.collection("quiz_questions"),
        }
    }

    async fn linked(&self, filter: Document) -> AppResult<Vec<QuizQuestionLink>> {
        let cursor = self.links.find(filter).await?;
        let links: Vec<QuizQuestionLink> = cursor.try_collect().await?;
        Ok(links)
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.table.insert(quiz).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quiz>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Quiz>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Quiz>> {
        self.table.find_many(doc! {}).await
    }

    async fn find_by_folders(&self, folder_ids: &[i64]) -> AppResult<Vec<Quiz>> {
        self.table.find_in("folder_id", folder_ids).await
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.table.replace(quiz).await
    }

    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64> {
        let deleted = self.table.delete_ids(ids).await?;
        if !ids.is_empty() {
            self.links
                .delete_many(doc! { "quiz_id": { "$in": ids.to_vec() } })
                .await?;
        }
        Ok(deleted)
    }

    async fn set_questions(&self, quiz_id: i64, question_ids: &[i64]) -> AppResult<()> {
        self.links.delete_many(doc! { "quiz_id": quiz_id }).await?;

        let links: Vec<QuizQuestionLink> = unique_ids(question_ids)
            .into_iter()
            .map(|question_id| QuizQuestionLink {
                quiz_id,
                question_id,
            })
            .collect();
        if !links.is_empty() {
            self.links.insert_many(links).await?;
        }
        Ok(())
    }

    async fn question_ids(&self, quiz_id: i64) -> AppResult<Vec<i64>> {
        let mut ids: Vec<i64> = self
            .linked(doc! { "quiz_id": quiz_id })
            .await?
            .into_iter()
            .map(|link| link.question_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn quiz_ids_for_question(&self, question_id: i64) -> AppResult<Vec<i64>> {
        let mut ids: Vec<i64> = self
            .linked(doc! { "question_id": question_id })
            .await?
            .into_iter()
            .map(|link| link.quiz_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn remove_question_links(&self, question_id: i64) -> AppResult<u64> {
        let result = self
            .links
            .delete_many(doc! { "question_id": question_id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        self.table.ensure_key_indexes().await?;
        self.table.ensure_index("folder_id").await?;

        let edge_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "question_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_question_unique".to_string())
                    .build(),
            )
            .build();
        self.links.create_index(edge_index).await?;
        self.links
            .create_index(IndexModel::builder().keys(doc! { "question_id": 1 }).build())
            .await?;
        log::info!("Created indexes for quiz_questions collection");
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    table: MemoryTable<Quiz>,
    links: Arc<RwLock<HashSet<QuizQuestionLink>>>,
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.table.insert(quiz).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quiz>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Quiz>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Quiz>> {
        Ok(self.table.find_many(|_| true).await)
    }

    async fn find_by_folders(&self, folder_ids: &[i64]) -> AppResult<Vec<Quiz>> {
        Ok(self
            .table
            .find_many(|q| folder_ids.contains(&q.folder_id))
            .await)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.table.replace(quiz).await
    }

    async fn delete_many(&self, ids: &[i64]) -> AppResult<u64> {
        let deleted = self.table.delete_ids(ids).await;
        self.links
            .write()
            .await
            .retain(|link| !ids.contains(&link.quiz_id));
        Ok(deleted)
    }

    async fn set_questions(&self, quiz_id: i64, question_ids: &[i64]) -> AppResult<()> {
        let mut links = self.links.write().await;
        links.retain(|link| link.quiz_id != quiz_id);
        links.extend(question_ids.iter().map(|&question_id| QuizQuestionLink {
            quiz_id,
            question_id,
        }));
        Ok(())
    }

    async fn question_ids(&self, quiz_id: i64) -> AppResult<Vec<i64>> {
        let mut ids: Vec<i64> = self
            .links
            .read()
            .await
            .iter()
            .filter(|link| link.quiz_id == quiz_id)
            .map(|link| link.question_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn quiz_ids_for_question(&self, question_id: i64) -> AppResult<Vec<i64>> {
        let mut ids: Vec<i64> = self
            .links
            .read()
            .await
            .iter()
            .filter(|link| link.question_id == question_id)
            .map(|link| link.quiz_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn remove_question_links(&self, question_id: i64) -> AppResult<u64> {
        let mut links = self.links.write().await;
        let before = links.len();
        links.retain(|link| link.question_id != question_id);
        Ok((before - links.len()) as u64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
