//! CSV import and export of the whole question bank.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

use super::queries::categories::{get_all_categories, import_categories};
use super::queries::questions::{get_all_questions, import_questions};
use super::{Category, Question};

pub const CATEGORIES_FILE: &str = "categories.csv";
pub const QUESTIONS_FILE: &str = "questions.csv";

pub fn write_to(path: &Path, data: Vec<impl Serialize>) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_from<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record.with_context(|| format!("Malformed row in {}", path.display()))?;
        out.push(record);
    }
    Ok(out)
}

pub async fn export_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<()> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    if !dir.exists() {
        std::fs::create_dir_all(dir)?
    }
    write_to(&dir.join(CATEGORIES_FILE), categories)?;
    write_to(&dir.join(QUESTIONS_FILE), questions)?;
    tracing::info!("Exported question bank to {}", dir.display());
    Ok(())
}

/// Categories go in first so question rows satisfy the foreign key.
pub async fn import_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<()> {
    let categories: Vec<Category> = read_from(&dir.join(CATEGORIES_FILE))?;
    let questions: Vec<Question> = read_from(&dir.join(QUESTIONS_FILE))?;
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "Importing question bank from {}",
        dir.display()
    );
    import_categories(pool, categories).await?;
    import_questions(pool, questions).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures;

    #[test]
    fn csv_files_keep_the_wire_column_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CATEGORIES_FILE);
        write_to(&path, vec![fixtures::category(1, "Science")]).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "id,type\n1,Science\n");

        let back: Vec<Category> = read_from(&path).unwrap();
        assert_eq!(back, vec![fixtures::category(1, "Science")]);
    }

    #[test]
    fn malformed_rows_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(QUESTIONS_FILE);
        std::fs::write(
            &path,
            "id,question,answer,category,difficulty\nx,Why?,Because,1,2\n",
        )
        .unwrap();

        let err = read_from::<Question>(&path).unwrap_err();
        assert!(err.to_string().contains("Malformed row"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_from::<Category>(&dir.path().join("nope.csv")).is_err());
    }
}
