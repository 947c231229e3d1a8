use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    routing::get,
    Router,
};

use crate::{
    server::app::{AppState, Repo},
    trivia::bank::{self, CategoryListing, CategoryQuestions},
};

use super::{success, ApiResponse, PageQuery};

async fn get_categories(State(repo): State<Repo>) -> ApiResponse<CategoryListing> {
    let listing = bank::list_categories(repo.as_ref()).await?;
    Ok(success(listing))
}

async fn get_category_questions(
    State(repo): State<Repo>,
    path: Result<Path<i64>, PathRejection>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<CategoryQuestions> {
    let Path(id) = path?;
    let questions = bank::questions_by_category(repo.as_ref(), id, query.page()).await?;
    Ok(success(questions))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
        .with_state(state)
}
