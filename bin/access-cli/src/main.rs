use clap::{Parser, Subcommand};

pub mod common;

pub mod keygen;
use keygen::Keygen;

pub mod login;
use login::{Article, Login};

#[derive(Debug, Parser)]
#[clap(about, version)]
struct Cli {
    #[clap(subcommand)]
    command: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    #[clap(about = "Generate a new wallet key")]
    Keygen(Keygen),
    #[clap(about = "Log in and print the issued token")]
    Login(Login),
    #[clap(about = "Log in and fetch the protected article")]
    Article(Article),
}

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Subcommands::Keygen(keygen) => keygen.run(),
        Subcommands::Login(login) => login.run().await?,
        Subcommands::Article(article) => article.run().await?,
    }
    Ok(())
}
