use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::{
    server::{
        app::{AppState, Repo},
        deserializers::deserialize_ids,
    },
    telemetry::QUIZ_QUESTIONS_CNTR,
    trivia::{
        bank,
        quiz::{CategorySelector, QuizTurn},
    },
};

use super::{success, ApiError, ApiResponse};

// `type` is sent along with the id but only the id matters
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default, deserialize_with = "deserialize_ids")]
    previous_questions: Vec<i64>,
    #[serde(default)]
    quiz_category: Option<QuizCategory>,
}

async fn play_quiz(
    State(repo): State<Repo>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<QuizTurn> {
    let Json(request) = body.map_err(|rejection| {
        tracing::warn!("Unprocessable request: {}", rejection.body_text());
        ApiError::Unprocessable
    })?;
    let selector = request
        .quiz_category
        .map(|category| CategorySelector::from_id(category.id));

    let pool = bank::quiz_pool(repo.as_ref(), selector)
        .await
        .map_err(ApiError::unprocessable)?;
    let label = pool.selector.label();
    let turn = pool.draw(&request.previous_questions, &mut rand::thread_rng());

    if turn.is_finished() {
        tracing::debug!(category = %label, "Quiz pool exhausted");
    } else {
        QUIZ_QUESTIONS_CNTR
            .with_label_values(&[label.as_str()])
            .inc();
    }
    Ok(success(turn))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
