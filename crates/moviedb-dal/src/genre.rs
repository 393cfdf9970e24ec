use futures::TryStreamExt as _;
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Row};
use tracing::debug;

use crate::{
    ChosenRow,
    error::{Result, WithContext as _},
};

const LIST_GENRES: &str = "SELECT * FROM genre";
const GET_GENRE: &str = "SELECT * FROM genre WHERE name = ?";
const ADD_GENRE: &str = "INSERT INTO genre(name) VALUES(?)";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

impl Genre {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Reads `idgenre` and `name` columns, so it also works on rows joined with `movie`.
impl sqlx::FromRow<'_, ChosenRow> for Genre {
    fn from_row(row: &ChosenRow) -> Result<Self, sqlx::Error> {
        Ok(Genre {
            id: row.try_get("idgenre")?,
            name: row.try_get("name")?,
        })
    }
}

pub type GenreRepository = GenreRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct GenreRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> GenreRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// All genres in storage order, no sorting is applied
    pub async fn list_genres(&self) -> Result<Vec<Genre>> {
        debug!("Listing genres");
        let records = sqlx::query_as::<_, Genre>(LIST_GENRES)
            .fetch(&self.executor)
            .try_collect::<Vec<_>>()
            .await
            .with_context(|| "listing genres".to_string())?;
        Ok(records)
    }

    pub async fn get_genre(&self, name: &str) -> Result<Option<Genre>> {
        debug!("Getting genre {name}");
        let record = sqlx::query_as::<_, Genre>(GET_GENRE)
            .bind(name)
            .fetch_optional(&self.executor)
            .await
            .with_context(|| format!("getting genre by name: {name}"))?;
        Ok(record)
    }

    /// Unlike [`crate::movie::MovieRepositoryImpl::add_movie`] the stored genre is not returned,
    /// use [`Self::get_genre`] to load it.
    pub async fn add_genre(&self, name: &str) -> Result<()> {
        debug!("Adding genre {name}");
        sqlx::query(ADD_GENRE)
            .bind(name)
            .execute(&self.executor)
            .await
            .with_context(|| format!("adding genre: {name}"))?;
        Ok(())
    }
}
