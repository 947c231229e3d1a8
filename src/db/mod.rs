pub mod queries;
pub mod repository;
pub mod transfer;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Error;

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};
pub use repository::{MemoryRepository, SqliteRepository, TriviaRepository};

pub async fn establish_connection(url: &str, max_connections: u32) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{Category, MemoryRepository, Question};

    pub fn category(id: i64, kind: &str) -> Category {
        Category {
            id,
            kind: kind.to_owned(),
        }
    }

    pub fn question(id: i64, category: i64) -> Question {
        Question {
            id,
            question: format!("Question number {id}?"),
            answer: format!("Answer {id}"),
            category,
            difficulty: 1 + id % 5,
        }
    }

    /// Three categories; questions 1..=20, category cycling 1, 2, 3.
    pub fn repository() -> MemoryRepository {
        MemoryRepository::with_data(
            vec![
                category(1, "Science"),
                category(2, "Art"),
                category(3, "Geography"),
            ],
            (1..=20).map(|id| question(id, (id - 1) % 3 + 1)).collect(),
        )
    }
}
