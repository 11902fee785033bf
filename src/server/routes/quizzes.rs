use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, QuizCategory, QuizOutcome},
    db::Question,
    server::{
        app::AppState,
        deserializers::{deserialize_ids, deserialize_lenient_quiz_category},
        error::ApiError,
        extractors::JsonBody,
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default, deserialize_with = "deserialize_ids")]
    previous_questions: Vec<i64>,
    #[serde(default, deserialize_with = "deserialize_lenient_quiz_category")]
    quiz_category: Option<QuizCategory>,
}

// `false` stands in for the question once the pool is used up
#[derive(Serialize)]
#[serde(untagged)]
enum NextQuestion {
    Found(Question),
    Exhausted(bool),
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: NextQuestion,
}

async fn next_quiz_question(
    State(catalog): State<Catalog>,
    JsonBody(body): JsonBody<QuizBody>,
) -> ApiResponse<Json<QuizResponse>> {
    let outcome = catalog
        .random_quiz_question(&body.previous_questions, body.quiz_category.as_ref())
        .await
        .map_err(|e| ApiError::storage_as(e, ApiError::NotFound))?;

    let question = match outcome {
        QuizOutcome::Question(question) => {
            let label = body
                .quiz_category
                .as_ref()
                .map(|c| c.id.to_string())
                .unwrap_or_default();
            QUIZ_QUESTIONS_SERVED.with_label_values(&[label.as_str()]).inc();
            NextQuestion::Found(question)
        }
        QuizOutcome::Exhausted => NextQuestion::Exhausted(false),
    };

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_quiz_question))
        .with_state(state)
}
