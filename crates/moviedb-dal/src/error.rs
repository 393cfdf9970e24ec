use tracing::debug;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure of the data access layer is reported through this one type.
pub type DataAccessError = Error;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error while {context}: {source}")]
    Database {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Error while {context}: no generated key returned")]
    NoGeneratedKey { context: String },

    #[error("Schema migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl Error {
    /// Operation (and its argument) which failed, if known
    pub fn context(&self) -> Option<&str> {
        match self {
            Error::Database { context, .. } | Error::NoGeneratedKey { context } => Some(context),
            Error::Migration(_) => None,
        }
    }

    pub fn as_database_error(&self) -> Option<&(dyn sqlx::error::DatabaseError + 'static)> {
        match self {
            Error::Database { source, .. } => source.as_database_error(),
            _ => None,
        }
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        self.as_database_error()
            .map(|e| e.is_foreign_key_violation())
            .unwrap_or(false)
    }

    pub fn is_unique_violation(&self) -> bool {
        self.as_database_error()
            .map(|e| e.is_unique_violation())
            .unwrap_or(false)
    }
}

pub(crate) trait WithContext<T> {
    fn with_context<F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> WithContext<T> for std::result::Result<T, sqlx::Error> {
    fn with_context<F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| {
            let context = context();
            debug!("Database error while {context}: {source}");
            Error::Database { context, source }
        })
    }
}
