use std::path::PathBuf;

use clap::{Parser, Subcommand};
use moviedb_dal::Pool;
use tracing::debug;

use crate::commands::{
    genre::{AddGenreCmd, GetGenreCmd, ListGenresCmd},
    init_db::InitDbCmd,
    movie::{AddMovieCmd, ListMoviesCmd},
};

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "CLI for moviedb - lists and adds genres and movies stored in sqlite database."
)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    InitDb(InitDbCmd),
    ListGenres(ListGenresCmd),
    GetGenre(GetGenreCmd),
    AddGenre(AddGenreCmd),
    ListMovies(ListMoviesCmd),
    AddMovie(AddMovieCmd),
}

impl crate::commands::Executor for Command {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Command::InitDb(cmd) => cmd.run().await,
            Command::ListGenres(cmd) => cmd.run().await,
            Command::GetGenre(cmd) => cmd.run().await,
            Command::AddGenre(cmd) => cmd.run().await,
            Command::ListMovies(cmd) => cmd.run().await,
            Command::AddMovie(cmd) => cmd.run().await,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct BackendConfig {
    #[arg(
        long,
        env = "MOVIEDB_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db, default is sqlite://[data-dir]/moviedb.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "MOVIEDB_DATA_DIR",
        help = "Data directory for the database file, default is system default like ~/.local/share/moviedb",
        default_value_t = default_data_dir()
    )]
    data_dir: String,

    #[arg(
        long,
        env = "MOVIEDB_MAX_CONNECTIONS",
        help = "Maximum number of database connections",
        default_value_t = moviedb_dal::DEFAULT_MAX_CONNECTIONS
    )]
    max_connections: u32,
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("moviedb"))
        .unwrap_or_else(|| PathBuf::from("moviedb"))
        .to_string_lossy()
        .to_string()
}

impl BackendConfig {
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}/moviedb.db", self.data_dir))
    }

    /// Data directory is only created when no explicit database URL is given.
    pub async fn connect(&self) -> anyhow::Result<Pool> {
        if self.database_url.is_none() {
            let dir = self.data_dir();
            if !dir.is_dir() {
                debug!("Creating data directory {dir:?}");
                tokio::fs::create_dir_all(&dir).await?;
            }
        }
        let pool =
            moviedb_dal::new_pool_with_size(&self.database_url(), self.max_connections).await?;
        Ok(pool)
    }
}
