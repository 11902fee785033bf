use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, CategoryMap, Page},
    db::{Category, Question},
    server::{app::AppState, deserializers::deserialize_lenient_page, extractors::IdPath},
};

use super::ApiResponse;

#[derive(Deserialize)]
pub(super) struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_page")]
    pub page: Option<i64>,
}

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: CategoryMap,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Category,
}

async fn get_categories(State(catalog): State<Catalog>) -> ApiResponse<Json<CategoriesBody>> {
    let categories = catalog.list_categories().await?;
    Ok(Json(CategoriesBody {
        success: true,
        categories,
    }))
}

async fn get_category_questions(
    State(catalog): State<Catalog>,
    IdPath(category_id): IdPath,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<Json<CategoryQuestionsBody>> {
    let found = catalog
        .questions_by_category(category_id, Page::from(page))
        .await?;
    Ok(Json(CategoryQuestionsBody {
        success: true,
        total_questions: found.page_count,
        questions: found.questions,
        current_category: found.category,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
        .with_state(state)
}
