use clap::Parser;
use tracing::info;

use crate::{commands::Executor, config::BackendConfig};

#[derive(Parser, Debug)]
pub struct InitDbCmd {
    #[command(flatten)]
    pub(crate) backend: BackendConfig,
}

impl Executor for InitDbCmd {
    async fn run(self) -> anyhow::Result<()> {
        let pool = self.backend.connect().await?;
        moviedb_dal::init_schema(&pool).await?;
        info!("Database {} is ready", self.backend.database_url());
        Ok(())
    }
}
