use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::error::ErrorKind;

use crate::db;
use crate::models::{Message, NewMessage};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database could not be reached or the query failed in transit.
    #[error("message store unavailable")]
    Unavailable(#[source] sqlx::Error),
    /// The database refused the row, e.g. a constraint violation.
    #[error("message store rejected the record")]
    Rejected(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let rejected = match &err {
            sqlx::Error::Database(db_err) => matches!(
                db_err.kind(),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation | ErrorKind::UniqueViolation
            ),
            _ => false,
        };

        if rejected {
            StoreError::Rejected(err)
        } else {
            StoreError::Unavailable(err)
        }
    }
}

/// Durable storage for contact messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a validated draft, assigning its id and timestamps.
    async fn create(&self, draft: &NewMessage) -> Result<Message, StoreError>;

    /// All stored messages, newest first. Always re-reads the store.
    async fn list_all(&self) -> Result<Vec<Message>, StoreError>;
}

pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn create(&self, draft: &NewMessage) -> Result<Message, StoreError> {
        Ok(db::messages::create(&self.pool, draft).await?)
    }

    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        Ok(db::messages::list_all(&self.pool).await?)
    }
}
