use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Message, NewMessage};

pub async fn create(pool: &PgPool, draft: &NewMessage) -> Result<Message, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        "INSERT INTO messages (id, name, email, message)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(draft.name())
    .bind(draft.email())
    .bind(draft.message())
    .fetch_one(pool)
    .await
}

/// Every stored message, newest first. Ids are v7 UUIDs, so they break
/// `created_at` ties in insertion order.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>("SELECT * FROM messages ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await
}
