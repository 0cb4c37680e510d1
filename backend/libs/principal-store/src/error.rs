use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("principal not found")]
    NotFound,

    #[error("email already registered")]
    EmailTaken,

    #[error("principal id already exists")]
    IdTaken,

    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
}

impl StoreError {
    /// Map a write error, turning unique-index violations into the matching
    /// conflict variant.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                if db_err.constraint() == Some("users_pkey") {
                    StoreError::IdTaken
                } else {
                    StoreError::EmailTaken
                }
            }
            _ => StoreError::Backend(err),
        }
    }
}
