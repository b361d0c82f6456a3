use crate::db::connection::DbPool;
use crate::db::models::{Answer, Survey};
use sqlx::sqlite::SqliteRow;
use sqlx::{Error, Row};
use uuid::Uuid;

use super::parse_uuid;

fn row_to_survey(row: &SqliteRow) -> Result<Survey, Error> {
    let id: String = row.get("id");
    let owner_id: String = row.get("owner_id");
    Ok(Survey {
        id: parse_uuid("id", &id)?,
        owner_id: parse_uuid("owner_id", &owner_id)?,
        question: row.get("question"),
        yes_count: row.get("yes_count"),
        no_count: row.get("no_count"),
    })
}

pub async fn insert_survey(pool: &DbPool, survey: &Survey) -> Result<(), Error> {
    sqlx::query(
        "INSERT INTO surveys (id, owner_id, question, yes_count, no_count) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(survey.id.to_string())
    .bind(survey.owner_id.to_string())
    .bind(&survey.question)
    .bind(survey.yes_count)
    .bind(survey.no_count)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn find_survey_by_id(pool: &DbPool, survey_id: Uuid) -> Result<Option<Survey>, Error> {
    let row = sqlx::query(
        "SELECT id, owner_id, question, yes_count, no_count FROM surveys WHERE id = ?",
    )
    .bind(survey_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(row_to_survey(&row)?)),
        None => Ok(None),
    }
}

/// Bump one counter with a relative update so concurrent answers never
/// overwrite each other. Returns whether the survey still existed.
pub async fn increment_survey_counter(
    pool: &DbPool,
    survey_id: Uuid,
    answer: Answer,
) -> Result<bool, Error> {
    let query = match answer {
        Answer::Yes => "UPDATE surveys SET yes_count = yes_count + 1 WHERE id = ?",
        Answer::No => "UPDATE surveys SET no_count = no_count + 1 WHERE id = ?",
    };

    let result = sqlx::query(query)
        .bind(survey_id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Overwrite question and both counters in one statement, but only when the
/// survey belongs to `owner_id`. Returns whether a row was replaced.
pub async fn replace_survey(
    pool: &DbPool,
    survey_id: Uuid,
    owner_id: Uuid,
    question: &str,
    yes_count: i64,
    no_count: i64,
) -> Result<bool, Error> {
    let result = sqlx::query(
        "UPDATE surveys SET question = ?, yes_count = ?, no_count = ? WHERE id = ? AND owner_id = ?",
    )
    .bind(question)
    .bind(yes_count)
    .bind(no_count)
    .bind(survey_id.to_string())
    .bind(owner_id.to_string())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_survey(pool: &DbPool, survey_id: Uuid, owner_id: Uuid) -> Result<bool, Error> {
    let result = sqlx::query("DELETE FROM surveys WHERE id = ? AND owner_id = ?")
        .bind(survey_id.to_string())
        .bind(owner_id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_surveys_by_owner(pool: &DbPool, owner_id: Uuid) -> Result<u64, Error> {
    let result = sqlx::query("DELETE FROM surveys WHERE owner_id = ?")
        .bind(owner_id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn list_surveys_by_owner(pool: &DbPool, owner_id: Uuid) -> Result<Vec<Survey>, Error> {
    let rows = sqlx::query(
        "SELECT id, owner_id, question, yes_count, no_count FROM surveys WHERE owner_id = ? ORDER BY created_at DESC",
    )
    .bind(owner_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_survey).collect()
}
