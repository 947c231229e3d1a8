use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;

use crate::{
    server::app::{AppState, Repo},
    telemetry::{CREATED_QUESTIONS_CNTR, DELETED_QUESTIONS_CNTR},
    trivia::{
        bank::{self, Creation, Deletion, QuestionDraft, QuestionListing, SearchResults},
        TriviaError,
    },
};

use super::{success, ApiError, ApiResponse, PageQuery};

// One body shape serves both creation and search; a non-empty `searchTerm` selects search.
#[derive(Deserialize)]
struct QuestionSubmission {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum SubmissionOutcome {
    Created(Creation),
    Searched(SearchResults),
}

async fn get_questions(
    State(repo): State<Repo>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<QuestionListing> {
    let listing = bank::list_questions(repo.as_ref(), query.page()).await?;
    Ok(success(listing))
}

async fn delete_question(
    State(repo): State<Repo>,
    path: Result<Path<i64>, PathRejection>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<Deletion> {
    let Path(id) = path.map_err(|rejection| {
        tracing::warn!("Unprocessable request: {}", rejection.body_text());
        ApiError::Unprocessable
    })?;
    let deletion = bank::delete_question(repo.as_ref(), id, query.page())
        .await
        .map_err(ApiError::unprocessable)?;
    DELETED_QUESTIONS_CNTR.inc();
    Ok(success(deletion))
}

async fn submit_question(
    State(repo): State<Repo>,
    Query(query): Query<PageQuery>,
    body: Result<Json<QuestionSubmission>, JsonRejection>,
) -> ApiResponse<SubmissionOutcome> {
    let Json(submission) = body?;

    if let Some(term) = submission.search_term.filter(|term| !term.is_empty()) {
        let results = bank::search_questions(repo.as_ref(), &term, query.page()).await?;
        return Ok(success(SubmissionOutcome::Searched(results)));
    }

    let draft = QuestionDraft {
        question: submission.question,
        answer: submission.answer,
        difficulty: submission.difficulty,
        category: submission.category,
    };
    let creation = bank::create_question(repo.as_ref(), draft)
        .await
        .map_err(|error| match error {
            TriviaError::Storage(_) => {
                tracing::error!("Insert failed: {error}");
                ApiError::MethodNotAllowed
            }
            other => ApiError::from(other),
        })?;
    CREATED_QUESTIONS_CNTR.inc();
    Ok(success(SubmissionOutcome::Created(creation)))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(submit_question))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
