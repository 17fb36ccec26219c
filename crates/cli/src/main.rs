//! Xomo admin CLI - list, search, and mutate store resources from a shell.
//!
//! # Usage
//!
//! ```bash
//! # List products, filtered and sorted client-side
//! xomo-admin products list --search mug --sort price --desc
//!
//! # Delete a product (prompts unless --yes)
//! xomo-admin products delete 42
//!
//! # Move an order along its lifecycle
//! xomo-admin orders set-status 7 SHIPPED
//!
//! # Replace a user's roles
//! xomo-admin users set-roles 4 ROLE_ADMIN ROLE_USER
//!
//! # Show the hydrated session
//! xomo-admin whoami
//! ```
//!
//! # Environment Variables
//!
//! - `XOMO_API_URL` - Base URL of the Xomo backend
//! - `XOMO_ADMIN_TOKEN` - Bearer token for the staff session
//! - `XOMO_REQUEST_TIMEOUT_SECS` - HTTP timeout (default: 30)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Args, Parser, Subcommand};

mod commands;

use commands::ListOpts;

#[derive(Parser)]
#[command(name = "xomo-admin")]
#[command(author, version, about = "Xomo store administration tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage catalog products
    Products {
        #[command(subcommand)]
        action: CrudAction,
    },
    /// Manage product categories
    Categories {
        #[command(subcommand)]
        action: CrudAction,
    },
    /// Inspect orders and move them along their lifecycle
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Manage registered users and their roles
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage promotional home ads
    Ads {
        #[command(subcommand)]
        action: CrudAction,
    },
    /// Browse customer inquiries
    Inquiries {
        /// List inquiries
        #[command(subcommand)]
        action: ListAction,
    },
    /// Show the hydrated session state
    Whoami,
}

#[derive(Subcommand)]
enum CrudAction {
    /// List resources
    List(ListArgs),
    /// Delete a resource by ID
    Delete(DeleteArgs),
}

#[derive(Subcommand)]
enum ListAction {
    /// List resources
    List(ListArgs),
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders
    List(ListArgs),
    /// Set an order's status
    SetStatus {
        /// Order ID
        id: String,
        /// New status (e.g. PENDING, SHIPPED, DELIVERED)
        status: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List users
    List(ListArgs),
    /// Delete a user by ID
    Delete(DeleteArgs),
    /// Replace a user's roles
    SetRoles {
        /// User ID
        id: String,
        /// Roles to assign (e.g. ROLE_ADMIN ROLE_USER)
        #[arg(required = true)]
        roles: Vec<String>,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Case-insensitive search term
    #[arg(short, long)]
    search: Option<String>,

    /// Sort field (see each screen's table headers)
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    desc: bool,
}

#[derive(Args)]
struct DeleteArgs {
    /// Resource ID
    id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

impl From<ListArgs> for ListOpts {
    fn from(args: ListArgs) -> Self {
        Self {
            search: args.search,
            sort: args.sort,
            desc: args.desc,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Products { action } => match action {
            CrudAction::List(args) => ctx.list_products(&args.into()).await,
            CrudAction::Delete(args) => ctx.delete_product(&args.id, args.yes).await,
        },
        Commands::Categories { action } => match action {
            CrudAction::List(args) => ctx.list_categories(&args.into()).await,
            CrudAction::Delete(args) => ctx.delete_category(&args.id, args.yes).await,
        },
        Commands::Orders { action } => match action {
            OrderAction::List(args) => ctx.list_orders(&args.into()).await,
            OrderAction::SetStatus { id, status } => ctx.set_order_status(&id, &status).await,
        },
        Commands::Users { action } => match action {
            UserAction::List(args) => ctx.list_users(&args.into()).await,
            UserAction::Delete(args) => ctx.delete_user(&args.id, args.yes).await,
            UserAction::SetRoles { id, roles } => ctx.set_user_roles(&id, &roles).await,
        },
        Commands::Ads { action } => match action {
            CrudAction::List(args) => ctx.list_ads(&args.into()).await,
            CrudAction::Delete(args) => ctx.delete_ad(&args.id, args.yes).await,
        },
        Commands::Inquiries { action } => match action {
            ListAction::List(args) => ctx.list_inquiries(&args.into()).await,
        },
        Commands::Whoami => ctx.whoami(),
    }
}
