use clap::Parser;
use garde::Validate as _;
use moviedb_dal::{
    genre::GenreRepository,
    movie::{CreateMovie, MovieRepository},
};
use time::{Date, macros::format_description};
use tracing::debug;

use crate::{
    commands::{Executor, print_json},
    config::BackendConfig,
};

fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
}

#[derive(Parser, Debug)]
pub struct ListMoviesCmd {
    #[command(flatten)]
    pub(crate) backend: BackendConfig,
    #[arg(short, long, help = "List only movies of this genre (exact name)")]
    genre: Option<String>,
}

impl Executor for ListMoviesCmd {
    async fn run(self) -> anyhow::Result<()> {
        let repository = MovieRepository::new(self.backend.connect().await?);
        let movies = match self.genre {
            Some(genre) => repository.list_movies_by_genre(&genre).await?,
            None => repository.list_movies().await?,
        };
        print_json(&movies)
    }
}

#[derive(Parser, Debug)]
pub struct AddMovieCmd {
    #[command(flatten)]
    pub(crate) backend: BackendConfig,
    #[arg(short, long, help = "Movie title")]
    title: String,
    #[arg(short, long, help = "Name of existing genre")]
    genre: String,
    #[arg(short, long, help = "Release date as YYYY-MM-DD", value_parser = parse_date)]
    release_date: Option<Date>,
    #[arg(long, help = "Duration in minutes")]
    duration: Option<i32>,
    #[arg(short, long, help = "Movie director")]
    director: String,
    #[arg(short, long, help = "Short summary of the movie")]
    summary: Option<String>,
}

impl Executor for AddMovieCmd {
    async fn run(self) -> anyhow::Result<()> {
        let pool = self.backend.connect().await?;
        let genre = GenreRepository::new(pool.clone())
            .get_genre(&self.genre)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Genre {} not found", self.genre))?;
        debug!("Resolved genre {genre:?}");

        let new_movie = CreateMovie {
            title: self.title,
            release_date: self.release_date,
            genre,
            duration: self.duration,
            director: self.director,
            summary: self.summary,
        };
        new_movie.validate()?;

        let movie = MovieRepository::new(pool).add_movie(&new_movie).await?;
        print_json(&movie)
    }
}
