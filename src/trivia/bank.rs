//! The question bank operations served over HTTP.
//!
//! Each operation loads what it needs through a [`TriviaRepository`] and runs the pagination,
//! aggregation and quiz components over the result.

use std::collections::BTreeMap;

use serde::Serialize;

use super::aggregation::categories_on_page;
use super::error::{TriviaError, TriviaResult};
use super::pagination::Page;
use super::quiz::{require_selector, CategorySelector, QuizPool};
use crate::db::{NewQuestion, Question, TriviaRepository};

#[derive(Debug, Serialize)]
pub struct CategoryListing {
    pub categories: BTreeMap<i64, String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionListing {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: BTreeMap<i64, String>,
    pub current_category: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct Deletion {
    pub deleted: i64,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct Creation {
    pub created: i64,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<Vec<i64>>,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestions {
    pub current_category: i64,
    pub total_questions: usize,
    pub questions: Vec<Question>,
}

/// Question fields as submitted; any of them may be absent.
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<i64>,
    pub category: Option<i64>,
}

impl QuestionDraft {
    pub fn validate(self) -> TriviaResult<NewQuestion> {
        let (question, answer, difficulty, category) =
            match (self.question, self.answer, self.difficulty, self.category) {
                (Some(question), Some(answer), Some(difficulty), Some(category)) => {
                    (question, answer, difficulty, category)
                }
                (question, answer, difficulty, category) => {
                    let missing: Vec<&str> = [
                        ("question", question.is_none()),
                        ("answer", answer.is_none()),
                        ("difficulty", difficulty.is_none()),
                        ("category", category.is_none()),
                    ]
                    .into_iter()
                    .filter_map(|(field, absent)| absent.then_some(field))
                    .collect();
                    return Err(TriviaError::Validation(format!(
                        "missing fields: {}",
                        missing.join(", ")
                    )));
                }
            };

        if question.trim().is_empty() || answer.trim().is_empty() {
            return Err(TriviaError::Validation(
                "question and answer must not be blank".to_owned(),
            ));
        }
        if difficulty < 1 {
            return Err(TriviaError::Validation(format!(
                "difficulty must be positive, got {difficulty}"
            )));
        }

        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

async fn category_map(repo: &dyn TriviaRepository) -> TriviaResult<BTreeMap<i64, String>> {
    Ok(repo
        .categories()
        .await?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect())
}

pub async fn list_categories(repo: &dyn TriviaRepository) -> TriviaResult<CategoryListing> {
    let categories = category_map(repo).await?;
    if categories.is_empty() {
        return Err(TriviaError::NotFound("no categories".to_owned()));
    }
    Ok(CategoryListing { categories })
}

pub async fn list_questions(
    repo: &dyn TriviaRepository,
    page: Page,
) -> TriviaResult<QuestionListing> {
    let selection = repo.questions().await?;
    let questions = page.paginate(&selection);
    if questions.is_empty() {
        return Err(TriviaError::NotFound(format!(
            "page {} of questions",
            page.number()
        )));
    }

    Ok(QuestionListing {
        current_category: categories_on_page(&questions),
        total_questions: selection.len(),
        categories: category_map(repo).await?,
        questions,
    })
}

pub async fn delete_question(
    repo: &dyn TriviaRepository,
    id: i64,
    page: Page,
) -> TriviaResult<Deletion> {
    if !repo.delete_question(id).await? {
        return Err(TriviaError::NotFound(format!("question {id}")));
    }
    tracing::info!("Deleted question {id}");

    let selection = repo.questions().await?;
    Ok(Deletion {
        deleted: id,
        questions: page.paginate(&selection),
        total_questions: selection.len(),
    })
}

/// Validation happens before the repository is touched.
pub async fn create_question(
    repo: &dyn TriviaRepository,
    draft: QuestionDraft,
) -> TriviaResult<Creation> {
    let question = draft.validate()?;
    let created = repo.insert_question(question).await?;
    tracing::info!("Created question {created}");
    Ok(Creation { created })
}

pub async fn search_questions(
    repo: &dyn TriviaRepository,
    term: &str,
    page: Page,
) -> TriviaResult<SearchResults> {
    let selection = repo.search_questions(term).await?;
    let questions = page.paginate(&selection);
    let current_category = (!questions.is_empty()).then(|| categories_on_page(&questions));

    Ok(SearchResults {
        questions,
        total_questions: selection.len(),
        current_category,
    })
}

pub async fn questions_by_category(
    repo: &dyn TriviaRepository,
    category: i64,
    page: Page,
) -> TriviaResult<CategoryQuestions> {
    let selection = repo.questions_in_category(category).await?;
    if selection.is_empty() {
        return Err(TriviaError::NotFound(format!(
            "questions in category {category}"
        )));
    }

    Ok(CategoryQuestions {
        current_category: category,
        total_questions: selection.len(),
        questions: page.paginate(&selection),
    })
}

/// Loads the candidates for the next quiz question. Draw from the result with
/// [`QuizPool::draw`].
pub async fn quiz_pool(
    repo: &dyn TriviaRepository,
    selector: Option<CategorySelector>,
) -> TriviaResult<QuizPool> {
    let selector = require_selector(selector)?;
    let questions = match selector {
        CategorySelector::Any => repo.questions().await?,
        CategorySelector::Only(category) => repo.questions_in_category(category).await?,
    };
    Ok(QuizPool {
        selector,
        questions,
    })
}
