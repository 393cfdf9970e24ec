use futures::TryStreamExt as _;
use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Row, sqlite::SqliteQueryResult};
use time::{Date, PrimitiveDateTime};
use tracing::debug;

use crate::{
    ChosenRow, Error,
    error::{Result, WithContext as _},
    genre::Genre,
};

const LIST_MOVIES: &str = "SELECT * FROM movie JOIN genre ON movie.genre_id = genre.idgenre";
const LIST_MOVIES_BY_GENRE: &str =
    "SELECT * FROM movie JOIN genre ON movie.genre_id = genre.idgenre WHERE genre.name = ?";
const ADD_MOVIE: &str = "INSERT INTO movie(title,release_date,genre_id,duration,director,summary) VALUES(?,?,?,?,?,?)";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub release_date: Option<Date>,
    pub genre: Genre,
    /// minutes
    pub duration: Option<i32>,
    pub director: String,
    pub summary: Option<String>,
}

/// Movie not stored yet, `genre.id` must point to an existing genre.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Validate)]
pub struct CreateMovie {
    #[garde(length(min = 1, max = 100))]
    pub title: String,
    #[garde(skip)]
    pub release_date: Option<Date>,
    #[garde(skip)]
    pub genre: Genre,
    #[garde(range(min = 0))]
    pub duration: Option<i32>,
    #[garde(length(min = 1, max = 100))]
    pub director: String,
    #[garde(skip)]
    pub summary: Option<String>,
}

impl CreateMovie {
    pub fn with_id(self, id: i64) -> Movie {
        Movie {
            id,
            title: self.title,
            release_date: self.release_date,
            genre: self.genre,
            duration: self.duration,
            director: self.director,
            summary: self.summary,
        }
    }
}

// Release date is kept as timestamp in the database, time of day is not significant.
fn date_to_timestamp(date: Date) -> PrimitiveDateTime {
    date.midnight()
}

fn timestamp_to_date(ts: PrimitiveDateTime) -> Date {
    ts.date()
}

fn generated_key(result: &SqliteQueryResult) -> Option<i64> {
    if result.rows_affected() == 0 {
        None
    } else {
        Some(result.last_insert_rowid())
    }
}

impl sqlx::FromRow<'_, ChosenRow> for Movie {
    fn from_row(row: &ChosenRow) -> Result<Self, sqlx::Error> {
        let genre: Genre = sqlx::FromRow::from_row(row)?;
        let release_date: Option<PrimitiveDateTime> = row.try_get("release_date")?;
        Ok(Movie {
            id: row.try_get("idmovie")?,
            title: row.try_get("title")?,
            release_date: release_date.map(timestamp_to_date),
            genre,
            duration: row.try_get("duration")?,
            director: row.try_get("director")?,
            summary: row.try_get("summary")?,
        })
    }
}

pub type MovieRepository = MovieRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct MovieRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> MovieRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Movies with their genre, movies referencing a missing genre are not listed.
    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        debug!("Listing movies");
        let records = sqlx::query_as::<_, Movie>(LIST_MOVIES)
            .fetch(&self.executor)
            .try_collect::<Vec<_>>()
            .await
            .with_context(|| "listing movies".to_string())?;
        Ok(records)
    }

    pub async fn list_movies_by_genre(&self, genre_name: &str) -> Result<Vec<Movie>> {
        debug!("Listing movies of genre {genre_name}");
        let records = sqlx::query_as::<_, Movie>(LIST_MOVIES_BY_GENRE)
            .bind(genre_name)
            .fetch(&self.executor)
            .try_collect::<Vec<_>>()
            .await
            .with_context(|| format!("listing movies by genre: {genre_name}"))?;
        Ok(records)
    }

    /// Stores the movie and returns its copy with the generated id.
    pub async fn add_movie(&self, movie: &CreateMovie) -> Result<Movie> {
        debug!("Adding movie {}", movie.title);
        let context = || format!("adding movie: {}", movie.title);
        let result = sqlx::query(ADD_MOVIE)
            .bind(&movie.title)
            .bind(movie.release_date.map(date_to_timestamp))
            .bind(movie.genre.id)
            .bind(movie.duration)
            .bind(&movie.director)
            .bind(&movie.summary)
            .execute(&self.executor)
            .await
            .with_context(context)?;

        let id = generated_key(&result).ok_or_else(|| {
            debug!("No generated key for movie {}", movie.title);
            Error::NoGeneratedKey { context: context() }
        })?;
        Ok(movie.clone().with_id(id))
    }
}
