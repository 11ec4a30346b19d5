//! TradingGatewayClient - Main Entry Point
//!
//! Operator CLI for the trading gateway: health checks, order and strategy
//! lookups, and a demo round trip that places and cancels a limit order.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use trading_gateway_client::config::load_config;
use trading_gateway_client::{
    Contract, Gateway, GatewayResponse, Order, OrderType, Side, Strategy, TradingClient,
};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place a TSLA limit order, look it up, cancel it and look it up again
    Demo {
        #[arg(long, default_value = "253")]
        order_id: String,
        #[arg(long, default_value = "1")]
        strategy_id: String,
    },
    /// Query gateway health
    Health,
    /// Look up an order
    GetOrder { order_id: String },
    /// Cancel an order
    CancelOrder { order_id: String },
    /// Register a strategy with its starting cash
    RegisterStrategy {
        strategy_id: String,
        name: String,
        cash: Decimal,
    },
    /// Look up a strategy
    StrategyInfo { strategy_id: String },
    /// Remove a strategy
    UnregisterStrategy { strategy_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = load_config(Some(&args.config))?;

    // Initialize logging
    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.settings.log_level.clone());
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let client = TradingClient::from_config(&config.gateway)?;
    info!(
        gateway = client.gateway().gateway_name(),
        base_url = %client.gateway().base_url(),
        "Trading client initialized"
    );

    match args.command {
        Command::Demo {
            order_id,
            strategy_id,
        } => {
            let contract = Contract::stock("TSLA", "SMART", "USD")?;
            let order = Order::builder(order_id.as_str(), strategy_id.as_str(), contract)
                .qty(dec!(1))
                .qty_filled(dec!(0))
                .qty_unfilled(dec!(0))
                .average_cost(dec!(0))
                .side(Side::Buy)
                .order_type(OrderType::Limit)
                .price(dec!(1))
                .build()?;

            print_response("place_order", client.place_order(&order).await?)?;
            print_response("get_order", client.get_order(&order_id).await?)?;
            print_response("cancel_order", client.cancel_order(&order_id).await?)?;
            print_response("get_order", client.get_order(&order_id).await?)?;
        }
        Command::Health => {
            print_response("system_status", client.get_system_health().await?)?;
        }
        Command::GetOrder { order_id } => {
            print_response("get_order", client.get_order(&order_id).await?)?;
        }
        Command::CancelOrder { order_id } => {
            print_response("cancel_order", client.cancel_order(&order_id).await?)?;
        }
        Command::RegisterStrategy {
            strategy_id,
            name,
            cash,
        } => {
            let strategy = Strategy::new(strategy_id, name, cash);
            print_response("register_strategy", client.register_strategy(&strategy).await?)?;
        }
        Command::StrategyInfo { strategy_id } => {
            print_response("strategy_info", client.get_strategy_info(&strategy_id).await?)?;
        }
        Command::UnregisterStrategy { strategy_id } => {
            print_response(
                "unregister_strategy",
                client.unregister_strategy(&strategy_id).await?,
            )?;
        }
    }

    Ok(())
}

fn print_response(label: &str, response: GatewayResponse) -> Result<()> {
    let (status, body) = response.into_parts();
    println!("{} -> {}", label, status);
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
