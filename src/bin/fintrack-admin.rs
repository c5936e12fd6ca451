//! Out-of-band provisioning for the fintrack service: schema migrations and user accounts.

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;

use fintrack_be::auth::{NewUser, UserService};
use fintrack_be::config::Config;
use fintrack_be::db;

/// Fintrack administration tool.
#[derive(Parser, Debug)]
#[command(name = "fintrack-admin", version, about)]
struct Cli {
    /// Database URL; defaults to DATABASE_URL from the environment
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Create the database if needed and apply pending migrations.
    Migrate,
    /// Provision a user account.
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let database_url = cli.database_url.unwrap_or(config.database_url);

    match cli.command {
        Commands::Migrate => {
            let pool = db::connect(&database_url, true)
                .await
                .with_context(|| format!("Failed to open {database_url}"))?;
            db::run_migrations(&pool).await.context("Migration failed")?;
            tracing::info!("Migrations applied to {database_url}");
        }
        Commands::CreateUser { username, password } => {
            anyhow::ensure!(!username.is_empty(), "username must not be empty");
            anyhow::ensure!(!password.is_empty(), "password must not be empty");

            let pool = db::connect(&database_url, false)
                .await
                .with_context(|| format!("Failed to open {database_url}"))?;
            let new_user = NewUser::new(&username, &password)?;
            let mut conn = pool.acquire().await?;
            let user = UserService::insert(&mut conn, &new_user).await?;
            tracing::info!(id = user.id, username = %user.username, "User created");
        }
    }

    Ok(())
}
