use clap::Parser;
use moviedb_dal::genre::GenreRepository;

use crate::{
    commands::{Executor, print_json},
    config::BackendConfig,
};

#[derive(Parser, Debug)]
pub struct ListGenresCmd {
    #[command(flatten)]
    pub(crate) backend: BackendConfig,
}

impl Executor for ListGenresCmd {
    async fn run(self) -> anyhow::Result<()> {
        let repository = GenreRepository::new(self.backend.connect().await?);
        let genres = repository.list_genres().await?;
        print_json(&genres)
    }
}

#[derive(Parser, Debug)]
pub struct GetGenreCmd {
    #[command(flatten)]
    pub(crate) backend: BackendConfig,
    #[arg(help = "Exact genre name")]
    name: String,
}

impl Executor for GetGenreCmd {
    async fn run(self) -> anyhow::Result<()> {
        let repository = GenreRepository::new(self.backend.connect().await?);
        match repository.get_genre(&self.name).await? {
            Some(genre) => print_json(&genre),
            None => anyhow::bail!("Genre {} not found", self.name),
        }
    }
}

#[derive(Parser, Debug)]
pub struct AddGenreCmd {
    #[command(flatten)]
    pub(crate) backend: BackendConfig,
    #[arg(help = "Genre name, must be unique")]
    name: String,
}

impl Executor for AddGenreCmd {
    async fn run(self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.name.trim().is_empty(), "Genre name cannot be empty");
        let repository = GenreRepository::new(self.backend.connect().await?);
        repository.add_genre(&self.name).await?;
        println!("Added genre {}", self.name);
        Ok(())
    }
}
