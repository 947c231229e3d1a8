use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use sqlx::SqlitePool;

use super::queries::{categories, questions};
use super::{Category, NewQuestion, Question};

/// Storage seen by the question bank. Every listing is ordered by id.
#[async_trait]
pub trait TriviaRepository: Send + Sync + 'static {
    async fn categories(&self) -> anyhow::Result<Vec<Category>>;
    async fn questions(&self) -> anyhow::Result<Vec<Question>>;
    async fn questions_in_category(&self, category: i64) -> anyhow::Result<Vec<Question>>;
    /// Case-insensitive substring match on the question text.
    async fn search_questions(&self, term: &str) -> anyhow::Result<Vec<Question>>;
    async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<i64>;
    /// Returns `false` when nothing was deleted.
    async fn delete_question(&self, id: i64) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TriviaRepository for SqliteRepository {
    async fn categories(&self) -> anyhow::Result<Vec<Category>> {
        Ok(categories::get_all_categories(&self.pool).await?)
    }

    async fn questions(&self) -> anyhow::Result<Vec<Question>> {
        Ok(questions::get_all_questions(&self.pool).await?)
    }

    async fn questions_in_category(&self, category: i64) -> anyhow::Result<Vec<Question>> {
        Ok(questions::get_questions_for_category(&self.pool, category).await?)
    }

    async fn search_questions(&self, term: &str) -> anyhow::Result<Vec<Question>> {
        Ok(questions::search_questions(&self.pool, term).await?)
    }

    async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<i64> {
        Ok(questions::create_question(&self.pool, &question).await?)
    }

    async fn delete_question(&self, id: i64) -> anyhow::Result<bool> {
        Ok(questions::delete_question(&self.pool, id).await?)
    }
}

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i64, Category>,
    questions: BTreeMap<i64, Question>,
}

/// In-process store with the same contract as [`SqliteRepository`], including the
/// category foreign key check on insert.
#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let tables = Tables {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            questions: questions.into_iter().map(|q| (q.id, q)).collect(),
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    fn read(&self) -> anyhow::Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| anyhow!("memory repository lock is poisoned"))
    }

    fn write(&self) -> anyhow::Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| anyhow!("memory repository lock is poisoned"))
    }

    fn filtered(&self, predicate: impl Fn(&Question) -> bool) -> anyhow::Result<Vec<Question>> {
        Ok(self
            .read()?
            .questions
            .values()
            .filter(|q| predicate(*q))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TriviaRepository for MemoryRepository {
    async fn categories(&self) -> anyhow::Result<Vec<Category>> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    async fn questions(&self) -> anyhow::Result<Vec<Question>> {
        self.filtered(|_| true)
    }

    async fn questions_in_category(&self, category: i64) -> anyhow::Result<Vec<Question>> {
        self.filtered(|q| q.category == category)
    }

    async fn search_questions(&self, term: &str) -> anyhow::Result<Vec<Question>> {
        self.filtered(questions::search_filter(term))
    }

    async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<i64> {
        let mut tables = self.write()?;
        if !tables.categories.contains_key(&question.category) {
            bail!("category {} does not exist", question.category);
        }
        let id = match tables.questions.keys().next_back() {
            None => 1,
            Some(last) => last
                .checked_add(1)
                .ok_or_else(|| anyhow!("question ids are exhausted"))?,
        };
        tables.questions.insert(
            id,
            Question {
                id,
                question: question.question,
                answer: question.answer,
                category: question.category,
                difficulty: question.difficulty,
            },
        );
        Ok(id)
    }

    async fn delete_question(&self, id: i64) -> anyhow::Result<bool> {
        Ok(self.write()?.questions.remove(&id).is_some())
    }
}
