use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "waypoint")]
#[command(about = "Waypoint CLI - career guidance platform client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        email: String,
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the stored identity
    Whoami,
    /// Interactive chat with test-mode recording controls
    Chat,
    /// Run the career suggestion wizard
    Suggest,
    /// Run the course recommendation survey
    Recommend {
        /// Search keywords
        keywords: String,
        /// Search location
        #[arg(long, default_value = "Tunisia")]
        location: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut app = commands::App::build().await?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&app, &email, &password).await?,
        Commands::Logout => commands::auth::logout(&app).await?,
        Commands::Whoami => commands::auth::whoami(&app).await?,
        Commands::Chat => commands::repl::run(&mut app).await?,
        Commands::Suggest => commands::suggest::run(&mut app).await?,
        Commands::Recommend { keywords, location } => {
            commands::recommend::run(&mut app, &keywords, &location).await?
        }
    }

    Ok(())
}
