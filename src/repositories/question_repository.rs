use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};
use tokio::sync::RwLock;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{links::unique_ids, Question, QuestionChoiceLink},
    repositories::table::{MemoryTable, MongoTable},
};

/// Questions plus the `question_choices` edge set. Edges belong to neither
/// side: removing a question or a choice only removes the edges touching it.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: Question) -> AppResult<Question>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>>;
    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Question>>;
    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Question>>;
    async fn find_all(&self) -> AppResult<Vec<Question>>;
    async fn update(&self, question: Question) -> AppResult<Question>;
    async fn delete(&self, id: i64) -> AppResult<()>;
    async fn set_choices(&self, question_id: i64, choice_ids: &[i64]) -> AppResult<()>;
    async fn choice_ids(&self, question_id: i64) -> AppResult<Vec<i64>>;
    async fn question_ids_for_choice(&self, choice_id: i64) -> AppResult<Vec<i64>>;
    async fn remove_choice_links(&self, choice_id: i64) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Question with id '{}' not found", id))
}

pub struct MongoQuestionRepository {
    table: MongoTable<Question>,
    links: Collection<QuestionChoiceLink>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            table: MongoTable::new(db),
            links: db.collection("question_choices"),
        }
    }

    async fn linked(&self, filter: mongodb::bson::Document) -> AppResult<Vec<QuestionChoiceLink>> {
        let cursor = self.links.find(filter).await?;
        let links: Vec<QuestionChoiceLink> = cursor.try_collect().await?;
        Ok(links)
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn create(&self, question: Question) -> AppResult<Question> {
        self.table.insert(question).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Question>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Question>> {
        self.table.find_in("id", ids).await
    }

    async fn find_all(&self) -> AppResult<Vec<Question>> {
        self.table.find_many(doc! {}).await
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        self.table.replace(question).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if self.table.delete_ids(&[id]).await? == 0 {
            return Err(not_found(id));
        }
        self.links.delete_many(doc! { "question_id": id }).await?;
        Ok(())
    }

    async fn set_choices(&self, question_id: i64, choice_ids: &[i64]) -> AppResult<()> {
        self.links
            .delete_many(doc! { "question_id": question_id })
            .await?;

        let links: Vec<QuestionChoiceLink> = unique_ids(choice_ids)
            .into_iter()
            .map(|choice_id| QuestionChoiceLink {
                question_id,
                choice_id,
            })
            .collect();
        if !links.is_empty() {
            self.links.insert_many(links).await?;
        }
        Ok(())
    }

    async fn choice_ids(&self, question_id: i64) -> AppResult<Vec<i64>> {
        let mut ids: Vec<i64> = self
            .linked(doc! { "question_id": question_id })
            .await?
            .into_iter()
            .map(|link| link.choice_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn question_ids_for_choice(&self, choice_id: i64) -> AppResult<Vec<i64>> {
        let mut ids: Vec<i64> = self
            .linked(doc! { "choice_id": choice_id })
            .await?
            .into_iter()
            .map(|link| link.question_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn remove_choice_links(&self, choice_id: i64) -> AppResult<u64> {
        let result = self
            .links
            .delete_many(doc! { "choice_id": choice_id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        self.table.ensure_key_indexes().await?;

        let edge_index = IndexModel::builder()
            .keys(doc! { "question_id": 1, "choice_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("question_choice_unique".to_string())
                    .build(),
            )
            .build();
        self.links.create_index(edge_index).await?;
        self.links
            .create_index(IndexModel::builder().keys(doc! { "choice_id": 1 }).build())
            .await?;
        log::info!("Created indexes for question_choices collection");
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    table: MemoryTable<Question>,
    links: Arc<RwLock<HashSet<QuestionChoiceLink>>>,
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn create(&self, question: Question) -> AppResult<Question> {
        self.table.insert(question).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> AppResult<Option<Question>> {
        self.table.find_by_public_id(public_id).await
    }

    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Question>> {
        Ok(self.table.find_many(|q| ids.contains(&q.id)).await)
    }

    async fn find_all(&self) -> AppResult<Vec<Question>> {
        Ok(self.table.find_many(|_| true).await)
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        self.table.replace(question).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if self.table.delete_ids(&[id]).await == 0 {
            return Err(not_found(id));
        }
        self.links.write().await.retain(|link| link.question_id != id);
        Ok(())
    }

    async fn set_choices(&self, question_id: i64, choice_ids: &[i64]) -> AppResult<()> {
        let mut links = self.links.write().await;
        links.retain(|link| link.question_id != question_id);
        links.extend(choice_ids.iter().map(|&choice_id| QuestionChoiceLink {
            question_id,
            choice_id,
        }));
        Ok(())
    }

    async fn choice_ids(&self, question_id: i64) -> AppResult<Vec<i64>> {
        let mut ids: Vec<i64> = self
            .links
            .read()
            .await
            .iter()
            .filter(|link| link.question_id == question_id)
            .map(|link| link.choice_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn question_ids_for_choice(&self, choice_id: i64) -> AppResult<Vec<i64>> {
        let mut ids: Vec<i64> = self
            .links
            .read()
            .await
            .iter()
            .filter(|link| link.choice_id == choice_id)
            .map(|link| link.question_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn remove_choice_links(&self, choice_id: i64) -> AppResult<u64> {
        let mut links = self.links.write().await;
        let before = links.len();
        links.retain(|link| link.choice_id != choice_id);
        Ok((before - links.len()) as u64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
