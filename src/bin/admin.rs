//! CLI administration tool for catalog-listing.
//!
//! Provides commands for inspecting the catalog database and for seeing how
//! a listing request is normalized and compiled, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Server version and table sizes
//! cargo run --bin admin -- db info
//!
//! # Print the category forest
//! cargo run --bin admin -- categories
//!
//! # Show the cache key and SQL for a listing request (no database needed)
//! cargo run --bin admin -- query --categorie 1,2 --sort cheap --page 2 --limit 2
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components: needed by `db` and `categories`
//! - `MAX_PAGE_SIZE`: page size cap applied by `query` (default: 100)

use catalog_listing::api::dto::listing::ListingQuery;
use catalog_listing::config::{Config, load_max_page_size, mask_connection_string};
use catalog_listing::domain::cache_key::CacheKey;
use catalog_listing::domain::category_tree::{CategoryTree, build_forest};
use catalog_listing::domain::listing_query::compile_listing;
use catalog_listing::domain::repositories::CategoryRepository;
use catalog_listing::infrastructure::persistence::PgCategoryRepository;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing catalog-listing.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Print the category forest
    Categories,

    /// Show the normalized cache key and compiled SQL of a listing request
    Query(QueryArgs),
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

/// Listing parameters, named as in the HTTP query string.
#[derive(Args)]
struct QueryArgs {
    #[arg(long)]
    brand: Option<String>,

    /// Comma-separated category ids
    #[arg(long)]
    categorie: Option<String>,

    /// Comma-separated subcategory ids
    #[arg(long)]
    sottocategorie: Option<String>,

    #[arg(long = "prezzo-max")]
    prezzo_max: Option<f64>,

    /// Only products on offer
    #[arg(long)]
    offerta: bool,

    /// Only featured products
    #[arg(long)]
    novita: bool,

    #[arg(long)]
    search: Option<String>,

    /// cheap, expensive, new or alphabetical
    #[arg(long)]
    sort: Option<String>,

    #[arg(long)]
    page: Option<u32>,

    #[arg(long)]
    limit: Option<u32>,
}

impl From<QueryArgs> for ListingQuery {
    fn from(args: QueryArgs) -> Self {
        Self {
            brand: args.brand,
            categorie: args.categorie,
            sottocategorie: args.sottocategorie,
            prezzo_max: args.prezzo_max,
            offerta: args.offerta.then(|| "true".to_string()),
            novita: args.novita.then(|| "true".to_string()),
            search: args.search,
            sort: args.sort,
            page: args.page,
            limit: args.limit,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
        Commands::Categories => print_categories(connect().await?).await?,
        Commands::Query(args) => print_query(args),
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = Config::load_database_url()?;

    PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                mask_connection_string(&database_url)
            )
        })
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            println!("  PostgreSQL: {}", version.bright_white());

            for table in ["categories", "products", "products_img"] {
                let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                    .fetch_one(pool)
                    .await
                    .with_context(|| format!("Failed to count rows of {table}"))?;
                println!("  {:<14}{}", table, count.to_string().bright_white());
            }
            println!();
        }
    }

    Ok(())
}

/// Prints the category forest as an indented tree.
async fn print_categories(pool: PgPool) -> Result<()> {
    let repo = PgCategoryRepository::new(Arc::new(pool));
    let rows = repo.list_all().await?;
    let row_count = rows.len();
    let forest = build_forest(rows);

    if forest.is_empty() {
        println!("{}", "No categories found".yellow());
        return Ok(());
    }

    println!("{}", "Categories".bright_blue().bold());
    for root in &forest {
        print_node(root, 0);
    }

    let reachable: usize = forest.iter().map(|root| root.descendant_ids().len()).sum();
    println!();
    println!("  {} categories, {} in the tree", row_count, reachable);
    if reachable < row_count {
        println!(
            "  {}",
            format!("{} orphaned categories hidden", row_count - reachable).yellow()
        );
    }

    Ok(())
}

fn print_node(node: &CategoryTree, depth: usize) {
    let label = format!("{} [{}]", node.category.name, node.category.id);
    if depth == 0 {
        println!("  {}", label.bold());
    } else {
        println!("  {}└─ {}", "   ".repeat(depth - 1), label);
    }

    for child in &node.children {
        print_node(child, depth + 1);
    }
}

/// Prints the cache key and compiled query of a listing request.
fn print_query(args: QueryArgs) {
    let filter = ListingQuery::from(args).into_filter(load_max_page_size());
    let key = CacheKey::from_filter(&filter);
    let query = compile_listing(&filter);

    println!("{}", "Cache key".bright_blue().bold());
    println!("  {}", key.as_str());
    println!("  sha256 {}", key.digest().dimmed());
    println!();

    println!("{}", "SQL".bright_blue().bold());
    println!("  {}", query.sql);
    println!();

    println!("{}", "Parameters".bright_blue().bold());
    for (index, param) in query.params.iter().enumerate() {
        println!("  ${:<3}{}", index + 1, param.to_string().bright_white());
    }
}
