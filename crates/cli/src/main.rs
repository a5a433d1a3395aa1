//! Platter CLI - owner operations against the delivery platform.
//!
//! # Usage
//!
//! ```bash
//! # Shipping addresses
//! platter address list
//! platter address add --alias Home --street "1 Main St" --city Sevilla \
//!     --province Sevilla --zip-code 41001
//! platter address set-default 2
//! platter address delete 2
//!
//! # Orders
//! platter order show 10
//! platter order edit 10 --address "2 Other St" --price 12.50
//! platter order advance --restaurant 3 10
//!
//! # Restaurants and schedules
//! platter restaurant list
//! platter schedule add --restaurant 3 --start 09:00:00 --end 17:00:00
//! ```
//!
//! # Environment Variables
//!
//! - `PLATTER_API_BASE_URL` - Base URL of the platform backend
//! - `PLATTER_SESSION_TOKEN` - Bearer token of the logged-in owner
//! - `PLATTER_HTTP_TIMEOUT_SECS` - Optional request timeout (default 30)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use platter_core::{AddressId, CategoryId, OrderId, RestaurantId, ScheduleId};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "platter")]
#[command(author, version, about = "Platter owner CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage shipping addresses
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Inspect and edit orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Manage restaurants
    Restaurant {
        #[command(subcommand)]
        action: RestaurantAction,
    },
    /// Manage a restaurant's schedules
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    /// List your shipping addresses
    List,
    /// Add a shipping address
    Add {
        #[arg(long)]
        alias: String,
        #[arg(long)]
        street: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        province: String,
        #[arg(long = "zip-code")]
        zip_code: String,
        /// Ask the backend to make this the default address
        #[arg(long)]
        default: bool,
    },
    /// Make an address the default
    SetDefault {
        /// Address ID
        id: AddressId,
    },
    /// Delete an address
    Delete {
        /// Address ID
        id: AddressId,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Show one order
    Show {
        /// Order ID
        id: OrderId,
    },
    /// Edit the owner-editable fields of an order
    Edit {
        /// Order ID
        id: OrderId,
        #[arg(long)]
        address: String,
        #[arg(long)]
        price: Decimal,
    },
    /// Advance an order to its next status
    Advance {
        /// Restaurant the order belongs to
        #[arg(long)]
        restaurant: RestaurantId,
        /// Order ID
        id: OrderId,
    },
}

#[derive(Subcommand)]
enum RestaurantAction {
    /// List your restaurants
    List,
    /// Show one restaurant with its products and schedules
    Show {
        /// Restaurant ID
        id: RestaurantId,
    },
    /// List the available restaurant categories
    Categories,
    /// Create a restaurant
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long = "postal-code")]
        postal_code: String,
        #[arg(long)]
        category: CategoryId,
        #[arg(long = "shipping-costs", default_value = "0")]
        shipping_costs: Decimal,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a restaurant
    Delete {
        /// Restaurant ID
        id: RestaurantId,
    },
    /// List a restaurant's orders
    Orders {
        /// Restaurant ID
        id: RestaurantId,
    },
    /// Show today's analytics for a restaurant
    Analytics {
        /// Restaurant ID
        id: RestaurantId,
    },
}

#[derive(Subcommand)]
enum ScheduleAction {
    /// List a restaurant's schedules
    List {
        #[arg(long)]
        restaurant: RestaurantId,
    },
    /// Add a schedule
    Add {
        #[arg(long)]
        restaurant: RestaurantId,
        /// Start time (HH:mm:ss)
        #[arg(long)]
        start: String,
        /// End time (HH:mm:ss)
        #[arg(long)]
        end: String,
    },
    /// Edit a schedule
    Edit {
        #[arg(long)]
        restaurant: RestaurantId,
        /// Schedule ID
        id: ScheduleId,
        /// Start time (HH:mm:ss)
        #[arg(long)]
        start: String,
        /// End time (HH:mm:ss)
        #[arg(long)]
        end: String,
    },
    /// Delete a schedule
    Delete {
        #[arg(long)]
        restaurant: RestaurantId,
        /// Schedule ID
        id: ScheduleId,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        commands::report_field_errors(&e);
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Address { action } => match action {
            AddressAction::List => commands::addresses::list().await?,
            AddressAction::Add {
                alias,
                street,
                city,
                province,
                zip_code,
                default,
            } => {
                commands::addresses::add(alias, street, city, province, zip_code, default).await?;
            }
            AddressAction::SetDefault { id } => commands::addresses::set_default(id).await?,
            AddressAction::Delete { id } => commands::addresses::delete(id).await?,
        },
        Commands::Order { action } => match action {
            OrderAction::Show { id } => commands::orders::show(id).await?,
            OrderAction::Edit { id, address, price } => {
                commands::orders::edit(id, address, price).await?;
            }
            OrderAction::Advance { restaurant, id } => {
                commands::orders::advance(restaurant, id).await?;
            }
        },
        Commands::Restaurant { action } => match action {
            RestaurantAction::List => commands::restaurants::list().await?,
            RestaurantAction::Show { id } => commands::restaurants::show(id).await?,
            RestaurantAction::Categories => commands::restaurants::categories().await?,
            RestaurantAction::Create {
                name,
                address,
                postal_code,
                category,
                shipping_costs,
                description,
                url,
                email,
                phone,
            } => {
                commands::restaurants::create(commands::restaurants::CreateArgs {
                    name,
                    address,
                    postal_code,
                    category,
                    shipping_costs,
                    description,
                    url,
                    email,
                    phone,
                })
                .await?;
            }
            RestaurantAction::Delete { id } => commands::restaurants::delete(id).await?,
            RestaurantAction::Orders { id } => commands::restaurants::orders(id).await?,
            RestaurantAction::Analytics { id } => commands::restaurants::analytics(id).await?,
        },
        Commands::Schedule { action } => match action {
            ScheduleAction::List { restaurant } => commands::schedules::list(restaurant).await?,
            ScheduleAction::Add {
                restaurant,
                start,
                end,
            } => commands::schedules::add(restaurant, start, end).await?,
            ScheduleAction::Edit {
                restaurant,
                id,
                start,
                end,
            } => commands::schedules::edit(restaurant, id, start, end).await?,
            ScheduleAction::Delete { restaurant, id } => {
                commands::schedules::delete(restaurant, id).await?;
            }
        },
    }
    Ok(())
}
