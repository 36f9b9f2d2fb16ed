mod menu;
mod search;
mod users;


use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "tablepin-cli")]
#[command(about = "tablepin command line interface")]
struct Cli {
    /// Base URL of the remote pin store; falls back to TABLEPIN_STORE_URL.
    #[arg(long, global = true)]
    store_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search businesses and menu items by free-text query.
    Search(search::SearchArgs),
    /// Inspect and edit one business's menu.
    Menu(menu::MenuArgs),
    /// User directory operations.
    User {
        #[command(subcommand)]
        command: users::UserCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("nothing to do; try `tablepin-cli search <query>`");
        return Ok(());
    };

    let config = tablepin_core::load_app_config_from_env()?;
    let store_url = match cli.store_url {
        Some(url) => url,
        None => config.require_store_url()?.to_string(),
    };
    let client = tablepin_client::PinStoreClient::with_timeout(&store_url, config.http_timeout_secs)?;

    match command {
        Commands::Search(args) => search::run(&client, args).await,
        Commands::Menu(args) => menu::run(&client, args).await,
        Commands::User { command } => users::run(&client, command).await,
    }
}
