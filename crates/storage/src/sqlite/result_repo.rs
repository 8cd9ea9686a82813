use quiz_core::model::{AnswerWrite, QuestionIndex, ResultRecord};

use super::SqliteRepository;
use super::mapping::{conn, index_to_i64, map_result_row};
use crate::repository::{ResultRepository, StorageError};

#[async_trait::async_trait]
impl ResultRepository for SqliteRepository {
    async fn get_result(&self, index: QuestionIndex) -> Result<Option<ResultRecord>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT question_index, correct_count, incorrect_count
                FROM question_results
                WHERE question_index = ?1
            ",
        )
        .bind(index_to_i64(index))
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_result_row).transpose()
    }

    async fn list_results(&self) -> Result<Vec<ResultRecord>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT question_index, correct_count, incorrect_count
                FROM question_results
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_result_row(&row)?);
        }
        Ok(out)
    }

    async fn record_answer(&self, write: AnswerWrite) -> Result<ResultRecord, StorageError> {
        let (correct, incorrect) = if write.was_correct { (1_i64, 0_i64) } else { (0, 1) };

        // Single statement: the increment cannot interleave with another writer.
        let row = sqlx::query(
            r"
                INSERT INTO question_results (question_index, correct_count, incorrect_count)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(question_index) DO UPDATE SET
                    correct_count = correct_count + excluded.correct_count,
                    incorrect_count = incorrect_count + excluded.incorrect_count
                RETURNING question_index, correct_count, incorrect_count
            ",
        )
        .bind(index_to_i64(write.question_index))
        .bind(correct)
        .bind(incorrect)
        .fetch_one(&self.pool)
        .await
        .map_err(conn)?;

        map_result_row(&row)
    }

    async fn clear_results(&self) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM question_results")
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        tracing::info!(removed = res.rows_affected(), "cleared result store");
        Ok(())
    }
}
