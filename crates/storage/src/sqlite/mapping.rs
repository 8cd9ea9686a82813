use quiz_core::model::{QuestionIndex, ResultRecord};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn index_to_i64(index: QuestionIndex) -> i64 {
    i64::from(index.value())
}

pub(crate) fn map_result_row(row: &sqlx::sqlite::SqliteRow) -> Result<ResultRecord, StorageError> {
    let question_index = u32_from_i64(
        "question_index",
        row.try_get::<i64, _>("question_index").map_err(ser)?,
    )?;
    let correct_count = u32_from_i64(
        "correct_count",
        row.try_get::<i64, _>("correct_count").map_err(ser)?,
    )?;
    let incorrect_count = u32_from_i64(
        "incorrect_count",
        row.try_get::<i64, _>("incorrect_count").map_err(ser)?,
    )?;

    Ok(ResultRecord {
        question_index: QuestionIndex::new(question_index),
        correct_count,
        incorrect_count,
    })
}
