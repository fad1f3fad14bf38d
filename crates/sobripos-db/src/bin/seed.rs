//! # Seed Data Generator
//!
//! Populates the database with sample back-office data for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p sobripos-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p sobripos-db --bin seed -- --count 1000
//!
//! # Specify database URL
//! cargo run -p sobripos-db --bin seed -- --db sqlite://./data/dev.db?mode=rwc
//! ```
//!
//! ## Generated Data
//! - One category per product group (beverages, snacks, dairy, frozen, grocery)
//! - Products with SKU `{GROUP}-{NNNN}`, roughly one in five below minimum stock
//! - One supplier and one cashier user

use std::env;

use sobripos_core::{Category, Entity, Product, Supplier, User, UserRole};
use sobripos_db::{Database, DbConfig, DEFAULT_DATABASE_URL};
use tracing_subscriber::EnvFilter;

/// Product groups for realistic test data
const GROUPS: &[(&str, &str, &[&str])] = &[
    (
        "BEV",
        "Beverages",
        &["Cola", "Orange Soda", "Mineral Water", "Iced Tea", "Apple Juice", "Energy Drink"],
    ),
    (
        "SNK",
        "Snacks",
        &["Salted Chips", "Pretzels", "Chocolate Bar", "Gummy Bears", "Peanuts", "Crackers"],
    ),
    (
        "DRY",
        "Dairy",
        &["Whole Milk", "Butter", "Greek Yogurt", "Cheddar", "Cream Cheese", "Eggs Dozen"],
    ),
    (
        "FRZ",
        "Frozen",
        &["Vanilla Ice Cream", "Frozen Pizza", "Fish Sticks", "Frozen Peas", "Waffles"],
    ),
    (
        "GRO",
        "Grocery",
        &["Spaghetti", "White Rice", "Canned Tomatoes", "Olive Oil", "Flour", "Sugar"],
    ),
];

/// Size variants and their price addon in cents
const SIZES: &[(&str, i64)] = &[("Small", 0), ("Medium", 100), ("Large", 200), ("Family", 350)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut database_url = String::from(DEFAULT_DATABASE_URL);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    database_url = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("SOBRIPOS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -d, --db <URL>     Database URL (default: {DEFAULT_DATABASE_URL})");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 SOBRIPOS Seed Data Generator");
    println!("===============================");
    println!("Database: {}", database_url);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&database_url)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let uow = db.unit_of_work();

    let existing = uow.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    let supplier = uow
        .suppliers()
        .add(Supplier {
            name: "Central Wholesale".to_string(),
            contact_person: Some("Purchasing Desk".to_string()),
            email: Some("orders@central-wholesale.test".to_string()),
            ..Default::default()
        })
        .await?;

    let cashier = uow
        .users()
        .add(User {
            username: "cashier".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            full_name: "Default Cashier".to_string(),
            email: "cashier@sobripos.test".to_string(),
            role: UserRole::Cashier,
            is_active: true,
            ..Default::default()
        })
        .await?;

    let mut generated = 0;
    let mut low_stock = 0;

    'groups: for (code, category_name, names) in GROUPS {
        let category = uow
            .categories()
            .add(Category {
                name: category_name.to_string(),
                description: None,
                ..Default::default()
            })
            .await?;

        for name in names.iter() {
            for (size, price_addon) in SIZES {
                if generated >= count {
                    break 'groups;
                }

                let product = generate_product(code, name, size, *price_addon, generated, category.id());
                if product.is_low_stock() {
                    low_stock += 1;
                }

                uow.products().add(product).await?;
                generated += 1;
            }
        }
    }

    let written = uow.commit().await?;

    println!();
    println!("✓ Generated {} products in {:?}", generated, start.elapsed());
    println!("  Below minimum stock: {}", low_stock);
    println!("  Supplier: {} ({})", supplier.name, supplier.id());
    println!("  Cashier:  {} ({})", cashier.username, cashier.id());
    println!("  Rows written: {}", written);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with realistic data.
fn generate_product(
    code: &str,
    name: &str,
    size: &str,
    price_addon: i64,
    seed: usize,
    category_id: uuid::Uuid,
) -> Product {
    // Base 1.99 - 9.99 plus size addon
    let price_cents = 199 + ((seed * 17) % 800) as i64 + price_addon;

    // Cost is 60-80% of price
    let cost_pct = 60 + (seed % 20) as i64;

    // Every fifth product sits below its reorder threshold
    let minimum_stock = 10;
    let stock_quantity = if seed % 5 == 0 {
        (seed % 10) as i32
    } else {
        20 + (seed % 80) as i32
    };

    Product {
        name: format!("{} {}", name, size),
        description: None,
        barcode: Some(format!("590{:010}", seed)),
        sku: format!("{}-{:04}", code, seed),
        price_cents,
        cost_price_cents: Some(price_cents * cost_pct / 100),
        discount_percentage_bps: None,
        stock_quantity,
        minimum_stock,
        category_id,
        ..Default::default()
    }
}
