use basaltpass_passkey::{
    FlowError, HttpPasskeyServer, PASSKEY_API_PREFIX, PASSKEY_SERVER_URL, PasskeyClient,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod platform;

use crate::platform::TerminalPlatform;

#[derive(Parser, Debug)]
#[command(author, version, about = "BasaltPass passkey client demo")]
struct Cli {
    /// Access token of the signed-in user, for session-scoped commands.
    #[arg(long, env = "PASSKEY_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the configured server and platform capabilities.
    Status,
    /// List the passkeys of the signed-in user.
    List,
    /// Delete a passkey by id.
    Delete { id: u64 },
    /// Register a new passkey for the signed-in user.
    Register { name: String },
    /// Log in with a passkey.
    Login { identifier: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("basaltpass_passkey=debug,{}=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut server = HttpPasskeyServer::from_env()?;
    if cli.token.is_none() {
        tracing::info!("No access token given; session-scoped commands will be rejected");
    }
    server.set_access_token(cli.token);
    tracing::info!("Using passkey endpoint {}", server.endpoint());
    let client = PasskeyClient::new(server, TerminalPlatform);

    if let Err(e) = run(&client, cli.command).await {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(
    client: &PasskeyClient<HttpPasskeyServer, TerminalPlatform>,
    command: Commands,
) -> Result<(), FlowError> {
    match command {
        Commands::Status => {
            println!("Server:            {}", PASSKEY_SERVER_URL.as_str());
            println!("API prefix:        {}", PASSKEY_API_PREFIX.as_str());
            println!("Passkey endpoint:  {}", client.server().endpoint());
            println!("Passkey supported: {}", client.is_passkey_supported());
        }
        Commands::List => {
            let passkeys = client.list_passkeys().await?;
            if passkeys.is_empty() {
                println!("No passkeys registered");
            }
            for passkey in passkeys {
                let last_used = passkey
                    .last_used_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "never".to_string());
                println!(
                    "{:>6}  {:<24} created {}  last used {}",
                    passkey.id,
                    passkey.name,
                    passkey.created_at.to_rfc3339(),
                    last_used
                );
            }
        }
        Commands::Delete { id } => {
            client.delete_passkey(id).await?;
            println!("Passkey {id} deleted");
        }
        Commands::Register { name } => {
            let passkey = client.create_passkey(&name).await?;
            println!("Registered passkey {} ({})", passkey.id, passkey.name);
        }
        Commands::Login { identifier } => {
            client.login_with_passkey_flow(&identifier).await?;
            println!("Logged in as {identifier}");
        }
    }
    Ok(())
}
