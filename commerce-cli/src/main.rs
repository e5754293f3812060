//! Commerce CLI
//!
//! Command-line interface for the Commerce API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use commerce_client::CommerceClient;
use commerce_types::{Currency, OrderId, PaymentId, UserId};

#[derive(Parser)]
#[command(name = "commerce")]
#[command(author, version, about = "Commerce API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Commerce API
    #[arg(
        long,
        env = "COMMERCE_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// User operations
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Create a new payment in PENDING state
    Create {
        /// Order ID (UUID)
        #[arg(long)]
        order: String,
        /// User ID (UUID)
        #[arg(long)]
        user: String,
        /// Decimal amount, e.g. "49.99"
        #[arg(long)]
        amount: String,
        /// Currency (USD, EUR, GBP, INR)
        #[arg(long, default_value = "USD")]
        currency: String,
    },
    /// Get payment details
    Get {
        /// Payment ID (UUID)
        id: String,
    },
    /// Submit a pending payment to the gateway
    Process {
        /// Payment ID (UUID)
        id: String,
        /// Gateway payment-method token
        #[arg(long, default_value = "pm_card_visa")]
        method: String,
        #[arg(long)]
        idempotency_key: Option<String>,
    },
    /// List payments for an order
    ByOrder {
        /// Order ID (UUID)
        id: String,
    },
    /// List payments for a user
    ByUser {
        /// User ID (UUID)
        id: String,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Register a new user
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
}

fn parse_currency(s: &str) -> Result<Currency> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Unknown currency: {}. Supported: USD, EUR, GBP, INR", s))
}

fn parse_payment_id(s: &str) -> Result<PaymentId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid payment ID: {}", s))
}

fn parse_order_id(s: &str) -> Result<OrderId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid order ID: {}", s))
}

fn parse_user_id(s: &str) -> Result<UserId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid user ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = CommerceClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Payment { action } => match action {
            PaymentCommands::Create {
                order,
                user,
                amount,
                currency,
            } => {
                let order_id = parse_order_id(&order)?;
                let user_id = parse_user_id(&user)?;
                let currency = parse_currency(&currency)?;
                let payment = client
                    .create_payment(order_id, user_id, &amount, currency)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::Get { id } => {
                let payment_id = parse_payment_id(&id)?;
                let payment = client.get_payment(payment_id).await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::Process {
                id,
                method,
                idempotency_key,
            } => {
                let payment_id = parse_payment_id(&id)?;
                let payment = client
                    .process_payment(payment_id, &method, idempotency_key)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::ByOrder { id } => {
                let order_id = parse_order_id(&id)?;
                let payments = client.payments_for_order(order_id).await?;
                println!("{}", serde_json::to_string_pretty(&payments)?);
            }
            PaymentCommands::ByUser { id } => {
                let user_id = parse_user_id(&id)?;
                let payments = client.payments_for_user(user_id).await?;
                println!("{}", serde_json::to_string_pretty(&payments)?);
            }
        },

        Commands::User { action } => match action {
            UserCommands::Register {
                email,
                password,
                first_name,
                last_name,
            } => {
                let resp = client
                    .register_user(&email, &password, &first_name, &last_name)
                    .await?;
                println!("{}", resp.message);
            }
        },
    }

    Ok(())
}
