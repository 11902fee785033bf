use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::db::Question;

/// Category id that draws from every question.
pub const ALL_CATEGORIES: i64 = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl QuizCategory {
    pub fn is_all(&self) -> bool {
        self.id == ALL_CATEGORIES
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizOutcome {
    Question(Question),
    /// Every candidate was already asked.
    Exhausted,
}

/// Drops previously asked questions and draws one of the rest uniformly.
pub fn draw<R>(candidates: Vec<Question>, previous: &[i64], rng: &mut R) -> QuizOutcome
where
    R: Rng + ?Sized,
{
    let asked: HashSet<i64> = previous.iter().copied().collect();
    let remaining: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !asked.contains(&q.id))
        .collect();

    match remaining.choose(rng) {
        Some(question) => QuizOutcome::Question(question.clone()),
        None => QuizOutcome::Exhausted,
    }
}
