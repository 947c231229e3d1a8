use itertools::Itertools;

use crate::db::Question;

/// Distinct category ids on a page, in first-seen order.
pub fn categories_on_page(questions: &[Question]) -> Vec<i64> {
    questions.iter().map(|q| q.category).unique().collect()
}
