use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;

/// Append-only log of chat exchanges. Rows are inserted once and never
/// updated or deleted. Callers treat a failed insert as a side-effect error,
/// not a request failure.
#[derive(Clone)]
pub struct ChatLog {
    pool: sqlx::SqlitePool,
}

impl ChatLog {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn record(&self, user_id: &str, message: &str, response: &str) -> Result<()> {
        let created_at = now_secs();
        sqlx::query(
            "INSERT INTO chat_messages (user_id, message, response, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(message)
        .bind(response)
        .bind(created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_log() -> ChatLog {
        // One connection, or each pooled connection would see its own
        // private in-memory database.
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");
        ChatLog::new(pool)
    }

    #[tokio::test]
    async fn record_appends_rows() {
        let log = memory_log().await;
        log.record("user-1", "hi", "hello!").await.expect("insert");
        log.record("user-1", "hi again", "hello again!").await.expect("insert");

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM chat_messages WHERE user_id = ?")
                .bind("user-1")
                .fetch_one(&log.pool)
                .await
                .expect("count");
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn record_stores_the_exchange_verbatim() {
        let log = memory_log().await;
        log.record("user-2", "what's up", "not much!").await.expect("insert");

        let (message, response): (String, String) = sqlx::query_as(
            "SELECT message, response FROM chat_messages WHERE user_id = ?",
        )
        .bind("user-2")
        .fetch_one(&log.pool)
        .await
        .expect("row");
        assert_eq!(message, "what's up");
        assert_eq!(response, "not much!");
    }
}
