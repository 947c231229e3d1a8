use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::error::{TriviaError, TriviaResult};
use crate::db::Question;

/// Wire id meaning "questions from every category".
pub const ANY_CATEGORY_ID: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySelector {
    Any,
    Only(i64),
}

impl CategorySelector {
    pub fn from_id(id: i64) -> Self {
        if id == ANY_CATEGORY_ID {
            Self::Any
        } else {
            Self::Only(id)
        }
    }

    pub fn admits(&self, question: &Question) -> bool {
        match self {
            Self::Any => true,
            Self::Only(category) => question.category == *category,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Any => "all".to_owned(),
            Self::Only(category) => category.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizTurn {
    pub question: Option<Question>,
    pub question_id: Option<i64>,
}

impl QuizTurn {
    pub fn finished() -> Self {
        Self {
            question: None,
            question_id: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.question.is_none()
    }
}

/// Candidate questions for one quiz draw.
#[derive(Debug, Clone)]
pub struct QuizPool {
    pub selector: CategorySelector,
    pub questions: Vec<Question>,
}

impl QuizPool {
    pub fn draw<R: Rng + ?Sized>(self, previous: &[i64], rng: &mut R) -> QuizTurn {
        next_turn(self.questions, self.selector, previous, rng)
    }
}

pub fn require_selector(selector: Option<CategorySelector>) -> TriviaResult<CategorySelector> {
    selector.ok_or_else(|| TriviaError::Validation("quiz_category is required".to_owned()))
}

/// Uniform pick among questions the selector admits and `previous` does not list.
/// An exhausted pool is a finished quiz, not an error.
pub fn next_turn<R: Rng + ?Sized>(
    pool: Vec<Question>,
    selector: CategorySelector,
    previous: &[i64],
    rng: &mut R,
) -> QuizTurn {
    let asked: HashSet<i64> = previous.iter().copied().collect();
    let unseen: Vec<Question> = pool
        .into_iter()
        .filter(|q| selector.admits(q) && !asked.contains(&q.id))
        .collect();

    match unseen.choose(rng) {
        Some(question) => QuizTurn {
            question_id: Some(question.id),
            question: Some(question.clone()),
        },
        None => QuizTurn::finished(),
    }
}
