use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use placement_desk::{settings, storage, web};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "placement-desk",
    version,
    about = "Placement drive and trainer roster records"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply migrations and start the web server (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    // load settings
    let settings = settings::Settings::load(&cli.config)?;
    tracing::info!(?settings, "Loaded configuration");

    // init storage (database); migrations run on connect
    let db = storage::init(&settings.database).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            tracing::info!("Migrations applied");
            Ok(())
        }
        Command::Serve => {
            let operator = ensure_operator(&db, &settings.server.operator).await?;
            web::serve(settings, db, Some(operator)).await
        }
    }
}

async fn ensure_operator(db: &sea_orm::DatabaseConnection, username: &str) -> Result<i32> {
    let user = storage::reference::ensure_user(db, username)
        .await
        .into_diagnostic()?;
    Ok(user.id)
}
