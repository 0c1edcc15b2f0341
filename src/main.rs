use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use buffer_cli::buffer::BufferClient;
use buffer_cli::commands::{channels, ideas, organizations, posts};
use buffer_cli::config::Config;

#[derive(Debug, Parser)]
#[command(name = "buffer-cli", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Channels (connected social-media accounts)
    #[command(subcommand)]
    Channels(ChannelsCommand),
    /// Organizations the account belongs to
    #[command(subcommand)]
    Organizations(OrganizationsCommand),
    /// Content ideas
    #[command(subcommand)]
    Ideas(IdeasCommand),
    /// Posts (scheduled and sent)
    #[command(subcommand)]
    Posts(PostsCommand),
}

#[derive(Debug, Subcommand)]
enum ChannelsCommand {
    /// List channels for an organization
    List(channels::ListArgs),
    /// Get a single channel by ID
    Get(channels::GetArgs),
}

#[derive(Debug, Subcommand)]
enum OrganizationsCommand {
    /// List organizations
    List,
}

#[derive(Debug, Subcommand)]
enum IdeasCommand {
    /// Create a content idea
    Create(ideas::CreateArgs),
}

#[derive(Debug, Subcommand)]
enum PostsCommand {
    /// List posts by status
    List(posts::ListArgs),
    /// Create a post
    Create(posts::CreateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so piped JSON stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let cfg = Config::from_env()?;
    let client = BufferClient::new(&cfg);

    let output = match &cli.command {
        Command::Channels(ChannelsCommand::List(args)) => channels::list(&client, args).await?,
        Command::Channels(ChannelsCommand::Get(args)) => channels::get(&client, args).await?,
        Command::Organizations(OrganizationsCommand::List) => organizations::list(&client).await?,
        Command::Ideas(IdeasCommand::Create(args)) => ideas::create(&client, args).await?,
        Command::Posts(PostsCommand::List(args)) => posts::list(&client, args).await?,
        Command::Posts(PostsCommand::Create(args)) => posts::create(&client, args).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
