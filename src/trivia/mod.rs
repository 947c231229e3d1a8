pub mod aggregation;
pub mod bank;
pub mod error;
pub mod pagination;
pub mod quiz;

pub use error::TriviaError;
pub use pagination::{Page, QUESTIONS_PER_PAGE};
pub use quiz::CategorySelector;
