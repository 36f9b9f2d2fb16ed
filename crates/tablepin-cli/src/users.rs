//! The `user` subcommand: user-directory operations.

use clap::Subcommand;

use tablepin_client::PinStoreClient;
use tablepin_core::Role;

#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// Upsert a user by email and print the stored document.
    Upsert {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Defaults to the directory's base role when omitted.
        #[arg(long)]
        role: Option<Role>,
    },
}

pub async fn run(client: &PinStoreClient, command: UserCommands) -> anyhow::Result<()> {
    match command {
        UserCommands::Upsert { name, email, role } => {
            let user = client.upsert_user(&name, &email, role).await?;
            println!(
                "{} <{}> role={} id={}",
                user.name, user.email, user.role, user.id
            );
            Ok(())
        }
    }
}
