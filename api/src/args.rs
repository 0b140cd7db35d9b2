use clap::{Parser, Subcommand};
use safetech_core::domain::common::{DatabaseConfig, SafetechConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "safetech", version, about = "SafeTech API")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub log: LogArgs,

    /// Largest page a list endpoint returns, `0` disables the ceiling.
    #[arg(long, env = "MAX_PAGE_SIZE", default_value_t = 100)]
    pub max_page_size: u64,
}

#[derive(Debug, Clone, Default, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default).
    #[default]
    Serve,
    /// Apply pending migrations, or revert down to a version.
    Migrate {
        #[arg(long)]
        revert_to: Option<i64>,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(id = "server_host", long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(id = "server_port", long = "server-port", env = "PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DatabaseArgs {
    #[arg(id = "database_host", long = "database-host", env = "DATABASE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(id = "database_port", long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(long = "database-password", env = "DATABASE_PASSWORD", default_value = "")]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "safetech")]
    pub name: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<DatabaseArgs> for DatabaseConfig {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            username: args.user,
            password: args.password,
            name: args.name,
        }
    }
}

impl From<Args> for SafetechConfig {
    fn from(args: Args) -> Self {
        Self {
            database: args.database.into(),
            max_page_size: Some(args.max_page_size).filter(|size| *size > 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_development() {
        let args = Args::parse_from(["safetech"]);
        let config = SafetechConfig::from(args);

        assert_eq!(config.max_page_size, Some(100));
        assert_eq!(
            config.database.url(),
            "postgres://postgres:@127.0.0.1:5432/safetech"
        );
    }

    #[test]
    fn zero_disables_the_page_ceiling() {
        let args = Args::parse_from(["safetech", "--max-page-size", "0"]);
        assert_eq!(SafetechConfig::from(args).max_page_size, None);
    }

    #[test]
    fn migrate_accepts_a_revert_target() {
        let args = Args::parse_from(["safetech", "migrate", "--revert-to", "20250101000003"]);
        assert!(matches!(
            args.command,
            Some(Command::Migrate {
                revert_to: Some(20250101000003)
            })
        ));
    }
}
