use std::sync::Arc;

use clap::Parser;
use safetech_core::{domain::common::DatabaseConfig, infrastructure::db::postgres::Postgres};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::application::http::server::http_server::{router, state};
use crate::args::{Args, Command, LogArgs};

mod application;
mod args;

fn init_logger(log: &LogArgs) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log);

    match args.command.clone().unwrap_or_default() {
        Command::Serve => {
            let state = state(args.clone()).await?;
            let router = router(state)?;

            let addr = format!("{}:{}", args.server.host, args.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("listening on {}", addr);
            axum::serve(listener, router).await?;
        }
        Command::Migrate { revert_to } => {
            let config = DatabaseConfig::from(args.database.clone());
            let postgres = Postgres::new(&config).await?;
            match revert_to {
                Some(target) => postgres.revert_migrations(target).await?,
                None => postgres.run_migrations().await?,
            }
        }
    }

    Ok(())
}
