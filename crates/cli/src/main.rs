//! myshop CLI - a command-line storefront client.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the session persists under MYSHOP_STATE_DIR)
//! myshop login -u alice -p secret
//!
//! # Browse and shop
//! myshop products list
//! myshop cart add 3 -q 2
//! myshop checkout
//!
//! # Admin operations (requires the admin role)
//! myshop admin orders
//! myshop admin set-status 17 SHIPPED
//! ```
//!
//! # Commands
//!
//! - `login` / `register` / `logout` / `me` - session management
//! - `products` - browse the catalog
//! - `cart` - manage the cart
//! - `checkout` - turn the cart into an order
//! - `orders` - your order history
//! - `admin` - shop-wide order management

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use myshop_core::{CartItemId, OrderId, OrderStatus, ProductId};
use myshop_storefront::config::ShopConfig;
use myshop_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "myshop")]
#[command(author, version, about = "myshop storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and clear the persisted session
    Logout,
    /// Show the signed-in user
    Me,
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Turn the cart into an order
    Checkout,
    /// Your order history
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Shop-wide order management (admin)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products
    List,
    /// Show one product
    Show {
        /// Product id
        id: i64,
    },
    /// Add a product (admin)
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price
        #[arg(short, long)]
        price: f64,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Units in stock
        #[arg(short, long, default_value_t = 0)]
        stock: i64,

        /// Image URL
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Update a product (admin)
    Update {
        /// Product id
        id: i64,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price
        #[arg(short, long)]
        price: f64,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Units in stock
        #[arg(short, long, default_value_t = 0)]
        stock: i64,

        /// Image URL
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Remove a product (admin)
    Remove {
        /// Product id
        id: i64,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        product_id: i64,

        /// Quantity
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change the quantity of a cart line
    Update {
        /// Cart item id
        item_id: i64,

        /// New quantity
        #[arg(short, long)]
        quantity: u32,
    },
    /// Remove a cart line
    Remove {
        /// Cart item id
        item_id: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrderAction {
    /// List your orders
    List,
    /// Show one order
    Show {
        /// Order id
        id: i64,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List every order in the shop
    Orders,
    /// Set an order's status
    SetStatus {
        /// Order id
        id: i64,

        /// New status (PENDING, PAID, SHIPPED, COMPLETED, CANCELLED)
        status: OrderStatus,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ShopConfig::from_env()?;
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&state, &username, &password).await?;
        }
        Commands::Register {
            username,
            email,
            password,
        } => {
            commands::auth::register(&state, &username, &email, &password).await?;
        }
        Commands::Logout => commands::auth::logout(&state),
        Commands::Me => commands::auth::me(&state).await?,
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(&state).await?,
            ProductAction::Show { id } => {
                commands::products::show(&state, ProductId::from(id)).await?;
            }
            ProductAction::Add {
                name,
                price,
                description,
                stock,
                image_url,
            } => {
                commands::products::add(&state, &name, price, description, stock, image_url)
                    .await?;
            }
            ProductAction::Update {
                id,
                name,
                price,
                description,
                stock,
                image_url,
            } => {
                commands::products::update(
                    &state,
                    ProductId::from(id),
                    &name,
                    price,
                    description,
                    stock,
                    image_url,
                )
                .await?;
            }
            ProductAction::Remove { id } => {
                commands::products::remove(&state, ProductId::from(id)).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state).await?,
            CartAction::Add {
                product_id,
                quantity,
            } => {
                commands::cart::add(&state, ProductId::from(product_id), quantity).await?;
            }
            CartAction::Update { item_id, quantity } => {
                commands::cart::update(&state, CartItemId::from(item_id), quantity).await?;
            }
            CartAction::Remove { item_id } => {
                commands::cart::remove(&state, CartItemId::from(item_id)).await?;
            }
            CartAction::Clear => commands::cart::clear(&state).await?,
        },
        Commands::Checkout => commands::orders::checkout(&state).await?,
        Commands::Orders { action } => match action {
            OrderAction::List => commands::orders::list(&state).await?,
            OrderAction::Show { id } => {
                commands::orders::show(&state, OrderId::from(id)).await?;
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Orders => commands::orders::list_all(&state).await?,
            AdminAction::SetStatus { id, status } => {
                commands::orders::set_status(&state, OrderId::from(id), status).await?;
            }
        },
    }
    Ok(())
}
