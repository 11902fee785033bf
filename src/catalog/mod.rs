//! Catalog query service.
//!
//! Every operation is a single pass over the injected SQLite pool; nothing is
//! cached between calls.

mod error;
mod pagination;
mod quiz;

use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::SqlitePool;

pub use error::CatalogError;
pub use pagination::{Page, QUESTIONS_PER_PAGE};
pub use quiz::{draw, QuizCategory, QuizOutcome, ALL_CATEGORIES};

use crate::db::queries::{categories, questions};
use crate::db::{Category, NewQuestion, Question};

/// Category id to display label, ordered by id.
pub type CategoryMap = BTreeMap<i64, String>;

#[derive(Debug, Clone, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: CategoryMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    /// Size of this page, not of the whole category.
    pub page_count: usize,
    pub category: Category,
}

/// A question submission whose fields may be missing.
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

impl QuestionDraft {
    fn complete(self) -> Result<NewQuestion, CatalogError> {
        let missing = |field: &str| CatalogError::InvalidInput(format!("missing field `{field}`"));
        Ok(NewQuestion {
            question: self.question.ok_or_else(|| missing("question"))?,
            answer: self.answer.ok_or_else(|| missing("answer"))?,
            category: self.category.ok_or_else(|| missing("category"))?,
            difficulty: self.difficulty.ok_or_else(|| missing("difficulty"))?,
        })
    }
}

#[derive(Clone)]
pub struct Catalog {
    pool: SqlitePool,
}

impl Catalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn list_categories(&self) -> Result<CategoryMap, CatalogError> {
        let all = categories::get_all_categories(&self.pool).await?;
        if all.is_empty() {
            return Err(CatalogError::not_found("categories", "*"));
        }
        Ok(all.into_iter().map(|c| (c.id, c.kind)).collect())
    }

    pub async fn list_questions(&self, page: Page) -> Result<QuestionPage, CatalogError> {
        let questions = if page.in_range() {
            questions::get_questions_page(&self.pool, page.limit(), page.offset()).await?
        } else {
            Vec::new()
        };
        if questions.is_empty() {
            return Err(CatalogError::EmptyPage {
                page: page.number(),
            });
        }

        let total_questions = questions::count_questions(&self.pool).await?;
        let categories = self.list_categories().await?;
        Ok(QuestionPage {
            questions,
            total_questions,
            categories,
        })
    }

    pub async fn delete_question(&self, id: i64) -> Result<(), CatalogError> {
        if questions::delete_question(&self.pool, id).await? == 0 {
            return Err(CatalogError::not_found("question", id));
        }
        tracing::info!(question_id = id, "question deleted");
        Ok(())
    }

    pub async fn add_question(&self, draft: QuestionDraft) -> Result<i64, CatalogError> {
        let new = draft.complete()?;
        let id = questions::create_question(&self.pool, &new).await?;
        tracing::info!(question_id = id, category = new.category, "question added");
        Ok(id)
    }

    pub async fn search_questions(&self, term: &str) -> Result<SearchResults, CatalogError> {
        let questions = questions::search_questions(&self.pool, term).await?;
        tracing::debug!(term, matches = questions.len(), "search");
        Ok(SearchResults {
            total_questions: questions.len(),
            questions,
        })
    }

    pub async fn questions_by_category(
        &self,
        category_id: i64,
        page: Page,
    ) -> Result<CategoryQuestions, CatalogError> {
        let category = categories::get_category(&self.pool, category_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("category", category_id))?;

        let matching = questions::get_questions_for_category(&self.pool, category.id).await?;
        let questions = page.slice(&matching).to_vec();
        Ok(CategoryQuestions {
            page_count: questions.len(),
            questions,
            category,
        })
    }

    /// Picks a question the player has not seen yet.
    ///
    /// A missing category is reported as `NotFound`, a category without any
    /// questions as `EmptyPool`; running out of unseen questions is not an error.
    pub async fn random_quiz_question(
        &self,
        previous_questions: &[i64],
        quiz_category: Option<&QuizCategory>,
    ) -> Result<QuizOutcome, CatalogError> {
        let quiz_category =
            quiz_category.ok_or_else(|| CatalogError::not_found("quiz category", "none"))?;

        let candidates = if quiz_category.is_all() {
            questions::get_all_questions(&self.pool).await?
        } else {
            questions::get_questions_for_category(&self.pool, quiz_category.id).await?
        };
        if candidates.is_empty() {
            return Err(CatalogError::EmptyPool {
                category: quiz_category.id,
            });
        }

        Ok(draw(
            candidates,
            previous_questions,
            &mut rand::thread_rng(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    async fn seeded(questions_per_category: &[(i64, usize)]) -> Catalog {
        let pool = test_pool().await;
        categories::import_categories(
            &pool,
            vec![
                Category { id: 1, kind: "Science".into() },
                Category { id: 2, kind: "Art".into() },
                Category { id: 3, kind: "Geography".into() },
            ],
        )
        .await
        .unwrap();
        for &(category, count) in questions_per_category {
            for n in 0..count {
                questions::create_question(
                    &pool,
                    &NewQuestion {
                        question: format!("Category {category} question {n}"),
                        answer: format!("answer {n}"),
                        category,
                        difficulty: (n % 5) as i64 + 1,
                    },
                )
                .await
                .unwrap();
            }
        }
        Catalog::new(pool)
    }

    fn full_draft() -> QuestionDraft {
        QuestionDraft {
            question: Some("Who painted the Mona Lisa?".into()),
            answer: Some("Leonardo da Vinci".into()),
            category: Some(2),
            difficulty: Some(2),
        }
    }

    #[tokio::test]
    async fn categories_map_id_to_label() {
        let catalog = seeded(&[]).await;
        let map = catalog.list_categories().await.unwrap();
        assert_eq!(map.get(&1).map(String::as_str), Some("Science"));
        assert_eq!(map.len(), 3);
    }

    #[tokio::test]
    async fn no_categories_is_not_found() {
        let catalog = Catalog::new(test_pool().await);
        assert!(matches!(
            catalog.list_categories().await,
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn second_page_of_fifteen_has_five() {
        let catalog = seeded(&[(1, 15)]).await;

        let first = catalog.list_questions(Page::new(1)).await.unwrap();
        assert_eq!(first.questions.len(), 10);
        assert_eq!(first.total_questions, 15);

        let second = catalog.list_questions(Page::new(2)).await.unwrap();
        assert_eq!(second.questions.len(), 5);
        assert_eq!(second.categories.len(), 3);

        assert!(matches!(
            catalog.list_questions(Page::new(3)).await,
            Err(CatalogError::EmptyPage { page: 3 })
        ));
        assert!(matches!(
            catalog.list_questions(Page::new(0)).await,
            Err(CatalogError::EmptyPage { page: 0 })
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_question_for_good() {
        let catalog = seeded(&[(1, 3)]).await;
        let before = catalog.list_questions(Page::default()).await.unwrap();
        let victim = before.questions[0].id;

        catalog.delete_question(victim).await.unwrap();

        let after = catalog.list_questions(Page::default()).await.unwrap();
        assert_eq!(after.total_questions, 2);
        assert!(after.questions.iter().all(|q| q.id != victim));
        assert!(matches!(
            catalog.delete_question(victim).await,
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn racing_deletes_succeed_once() {
        let catalog = seeded(&[(2, 1)]).await;
        let id = catalog.list_questions(Page::default()).await.unwrap().questions[0].id;

        let (first, second) = tokio::join!(catalog.delete_question(id), catalog.delete_question(id));
        let succeeded = [&first, &second].iter().filter(|r| r.is_ok()).count();
        assert_eq!(succeeded, 1);
        assert!([first, second]
            .into_iter()
            .any(|r| matches!(r, Err(CatalogError::NotFound { .. }))));
    }

    #[tokio::test]
    async fn draft_missing_any_field_is_rejected() {
        let catalog = seeded(&[]).await;
        let drafts = [
            QuestionDraft { question: None, ..full_draft() },
            QuestionDraft { answer: None, ..full_draft() },
            QuestionDraft { category: None, ..full_draft() },
            QuestionDraft { difficulty: None, ..full_draft() },
        ];
        for draft in drafts {
            assert!(matches!(
                catalog.add_question(draft).await,
                Err(CatalogError::InvalidInput(_))
            ));
        }
        assert_eq!(questions::count_questions(catalog.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn added_question_shows_up_in_listing() {
        let catalog = seeded(&[]).await;
        let id = catalog.add_question(full_draft()).await.unwrap();

        let page = catalog.list_questions(Page::default()).await.unwrap();
        assert_eq!(page.questions.len(), 1);
        assert_eq!(page.questions[0].id, id);
        assert_eq!(page.questions[0].answer, "Leonardo da Vinci");
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let catalog = seeded(&[(1, 2)]).await;
        catalog.add_question(full_draft()).await.unwrap();

        let hits = catalog.search_questions("mona lisa").await.unwrap();
        assert_eq!(hits.total_questions, 1);
        assert_eq!(hits.questions[0].question, "Who painted the Mona Lisa?");

        let none = catalog.search_questions("zebra").await.unwrap();
        assert_eq!(none.total_questions, 0);
        assert!(none.questions.is_empty());

        assert_eq!(catalog.search_questions("").await.unwrap().total_questions, 3);
    }

    #[tokio::test]
    async fn category_listing_counts_only_the_page() {
        let catalog = seeded(&[(1, 12), (2, 3)]).await;

        let science = catalog.questions_by_category(1, Page::default()).await.unwrap();
        assert_eq!(science.page_count, 10);
        assert_eq!(science.category.kind, "Science");
        assert!(science.questions.iter().all(|q| q.category == 1));

        let rest = catalog.questions_by_category(1, Page::new(2)).await.unwrap();
        assert_eq!(rest.page_count, 2);

        let empty = catalog.questions_by_category(3, Page::default()).await.unwrap();
        assert_eq!(empty.page_count, 0);

        assert!(matches!(
            catalog.questions_by_category(99, Page::default()).await,
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn quiz_over_all_categories_ignores_category() {
        let catalog = seeded(&[(1, 1), (2, 1)]).await;
        let all = QuizCategory { id: ALL_CATEGORIES, kind: "click".into() };
        let ids: Vec<i64> = questions::get_all_questions(catalog.pool())
            .await
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();

        let outcome = catalog
            .random_quiz_question(&ids[..1], Some(&all))
            .await
            .unwrap();
        match outcome {
            QuizOutcome::Question(q) => assert_eq!(q.id, ids[1]),
            QuizOutcome::Exhausted => panic!("one question left"),
        }

        assert_eq!(
            catalog.random_quiz_question(&ids, Some(&all)).await.unwrap(),
            QuizOutcome::Exhausted
        );
    }

    #[tokio::test]
    async fn quiz_stays_inside_category() {
        let catalog = seeded(&[(1, 5), (2, 5)]).await;
        let art = QuizCategory { id: 2, kind: "Art".into() };
        for _ in 0..20 {
            match catalog.random_quiz_question(&[], Some(&art)).await.unwrap() {
                QuizOutcome::Question(q) => assert_eq!(q.category, 2),
                QuizOutcome::Exhausted => panic!("art has questions"),
            }
        }
    }

    #[tokio::test]
    async fn quiz_failure_kinds() {
        let catalog = seeded(&[(1, 2)]).await;
        assert!(matches!(
            catalog.random_quiz_question(&[], None).await,
            Err(CatalogError::NotFound { .. })
        ));

        let geography = QuizCategory { id: 3, kind: "Geography".into() };
        assert!(matches!(
            catalog.random_quiz_question(&[], Some(&geography)).await,
            Err(CatalogError::EmptyPool { category: 3 })
        ));
    }
}
