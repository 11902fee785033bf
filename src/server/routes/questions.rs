use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;

use crate::{
    catalog::{Catalog, CategoryMap, Page, QuestionDraft},
    db::{Category, Question},
    server::{
        app::AppState,
        error::ApiError,
        extractors::{IdPath, JsonBody},
    },
    telemetry::QUESTION_WRITES,
};

use super::{categories::PageQuery, ApiResponse};

#[derive(Deserialize)]
struct NewQuestionBody {
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

impl From<NewQuestionBody> for QuestionDraft {
    fn from(body: NewQuestionBody) -> Self {
        QuestionDraft {
            question: body.question,
            answer: body.answer,
            category: body.category,
            difficulty: body.difficulty,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody {
    search_term: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuestionsBody {
    success: bool,
    questions: Vec<Question>,
    #[serde(rename = "total_questions")]
    total_questions: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<CategoryMap>,
    current_category: Option<Category>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

async fn get_questions(
    State(catalog): State<Catalog>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<Json<QuestionsBody>> {
    let page = catalog.list_questions(Page::from(page)).await?;
    Ok(Json(QuestionsBody {
        success: true,
        questions: page.questions,
        total_questions: page.total_questions,
        categories: Some(page.categories),
        current_category: None,
    }))
}

async fn create_question(
    State(catalog): State<Catalog>,
    JsonBody(body): JsonBody<NewQuestionBody>,
) -> ApiResponse<Json<Created>> {
    let id = catalog
        .add_question(body.into())
        .await
        .map_err(|e| ApiError::storage_as(e, ApiError::BadRequest))?;
    QUESTION_WRITES.with_label_values(&["insert"]).inc();
    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

async fn delete_question(
    State(catalog): State<Catalog>,
    IdPath(id): IdPath,
) -> ApiResponse<Json<Deleted>> {
    catalog
        .delete_question(id)
        .await
        .map_err(|e| ApiError::storage_as(e, ApiError::UnprocessableEntity))?;
    QUESTION_WRITES.with_label_values(&["delete"]).inc();
    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

async fn search_questions(
    State(catalog): State<Catalog>,
    JsonBody(body): JsonBody<SearchBody>,
) -> ApiResponse<Json<QuestionsBody>> {
    let term = body
        .search_term
        .ok_or_else(|| ApiError::NotFound("searchTerm is required".to_owned()))?;
    let results = catalog.search_questions(&term).await?;
    Ok(Json(QuestionsBody {
        success: true,
        total_questions: results.total_questions as i64,
        questions: results.questions,
        categories: None,
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .with_state(state)
}
