//! Scheduled cleanup of expired refresh token records.

use crate::db::Database;
use std::time::Duration;
use tracing::{error, info};

/// Interval between cleanup runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60); // 1 hour

/// Run all cleanup tasks once.
pub async fn run_cleanup(db: &Database) {
    match db.refresh_tokens().delete_expired().await {
        Ok(count) if count > 0 => info!(count, "Cleaned up expired refresh tokens"),
        Ok(_) => {}
        Err(e) => error!(error = %e, "Failed to clean up expired refresh tokens"),
    }
}

/// Spawn a background task that runs cleanup periodically.
/// Returns a handle that can be used to abort the task.
pub fn spawn_cleanup_scheduler(db: Database) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

        loop {
            interval.tick().await;
            run_cleanup(&db).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_cleanup_removes_expired_records() {
        let db = Database::open(":memory:").await.unwrap();
        let user_id = db.users().create("alice@example.com", "hash").await.unwrap();
        db.refresh_tokens()
            .create(user_id, "expired", 1_000)
            .await
            .unwrap();

        run_cleanup(&db).await;

        assert!(
            db.refresh_tokens()
                .get_by_token("expired")
                .await
                .unwrap()
                .is_none()
        );
    }
}
