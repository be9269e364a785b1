use billing_gateway_sdk::{GatewayClient, GatewayResponse, Identity, ZipQuery};
use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the billing management gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway liveness
    Health,
    /// Search zip codes
    Zip {
        #[arg(long)]
        country: String,
        #[arg(long)]
        zip: String,
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long)]
        offset: Option<i64>,
    },
    /// List permissions of a management user
    Permissions {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        merchant_id: String,
    },
    /// Remove a customer's saved card
    RemoveCard {
        #[arg(long)]
        id: String,
        /// Customer session token
        #[arg(long)]
        token: Option<String>,
        #[arg(long, default_value = billing_gateway_sdk::DEFAULT_COOKIE_NAME)]
        cookie_name: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = GatewayClient::new(&cli.url);

    let response = match cli.command {
        Commands::Health => client.health().await?,
        Commands::Zip {
            country,
            zip,
            limit,
            offset,
        } => {
            client
                .find_zip_code(&ZipQuery {
                    country,
                    zip,
                    limit,
                    offset,
                })
                .await?
        }
        Commands::Permissions {
            user_id,
            merchant_id,
        } => {
            client
                .get_permissions(&Identity {
                    user_id,
                    merchant_id,
                })
                .await?
        }
        Commands::RemoveCard {
            id,
            token,
            cookie_name,
        } => {
            client
                .with_cookie_name(&cookie_name)
                .remove_saved_card(&id, token.as_deref())
                .await?
        }
    };

    print_response(&response)
}

fn print_response(res: &GatewayResponse) -> Result<(), Box<dyn std::error::Error>> {
    if !res.is_success() {
        eprintln!("Error: gateway returned status {}", res.status);
        eprintln!("Response: {}", res.body);
        return Ok(());
    }

    if res.body.is_empty() {
        println!("OK ({})", res.status);
        return Ok(());
    }

    let json: Value = res.json()?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
