//! # Seed Data Generator
//!
//! Populates the database with merchants, items, customers and invoices
//! for development.
//!
//! ## Usage
//! ```bash
//! # 20 merchants with 12 items each (default)
//! cargo run -p bazaar-db --bin seed
//!
//! # Custom amount
//! cargo run -p bazaar-db --bin seed -- --merchants 100
//!
//! # Specify database path
//! cargo run -p bazaar-db --bin seed -- --db ./data/bazaar.db
//! ```
//!
//! ## Generated Data
//! - Merchant names built from surname pairs (`Schroeder-Jerde`)
//! - Item names `Item <Word> <Word>` with prices between 1.00 and 999.99
//! - One customer per merchant, each with a few invoices; about a third of
//!   the invoices carry lines from two different items so deletes exercise
//!   both the orphaned and the shared case
//!
//! Everything is derived from the loop indices, so two runs produce the same
//! data.

use std::env;

use bazaar_core::{Money, NewItem, NewMerchant};
use bazaar_db::{migrations, Database, DbConfig};

const SURNAMES: &[&str] = &[
    "Schroeder", "Jerde", "Klein", "Rempel", "Willms", "Cummings", "Thiel", "Bernhard",
    "Johns", "Glover", "Osinski", "Bechtelar", "Stokes", "Williamson", "Ondricka", "Nader",
];

const WORDS: &[&str] = &[
    "Autem", "Tempora", "Voluptatum", "Nemo", "Facere", "Qui", "Esse", "Provident",
    "Minima", "Deleniti", "Odio", "Inventore", "Rerum", "Quia", "Dolor", "Labore",
];

const FIRST_NAMES: &[&str] = &["Joey", "Cecelia", "Mariah", "Leanne", "Sylvester", "Heber", "Dejon", "Logan"];

const STATUSES: &[&str] = &["shipped", "packaged", "returned"];

const ITEMS_PER_MERCHANT: usize = 12;
const INVOICES_PER_CUSTOMER: usize = 4;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut merchant_count: usize = 20;
    let mut db_path = String::from("./bazaar_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--merchants" | "-m" => {
                if i + 1 < args.len() {
                    merchant_count = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bazaar Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -m, --merchants <N>  Number of merchants to generate (default: 20)");
                println!("  -d, --db <PATH>      Database file path (default: ./bazaar_dev.db)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bazaar Seed Data Generator");
    println!("============================");
    println!("Database:  {}", db_path);
    println!("Merchants: {}", merchant_count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let (total, applied) = migrations::migration_status(db.pool()).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied ({}/{})", applied, total);

    let existing = db.merchants().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} merchants", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating data...");
    let start = std::time::Instant::now();

    let mut item_total = 0;
    let mut invoice_total = 0;

    for m in 0..merchant_count {
        let merchant = db
            .merchants()
            .insert(&NewMerchant { name: merchant_name(m) })
            .await?;

        let mut item_ids = Vec::with_capacity(ITEMS_PER_MERCHANT);
        for n in 0..ITEMS_PER_MERCHANT {
            let seed = m * ITEMS_PER_MERCHANT + n;
            let item = db.items().insert(&generate_item(merchant.id, seed)).await?;
            item_ids.push(item.id);
            item_total += 1;
        }

        let customer = db
            .customers()
            .insert(FIRST_NAMES[m % FIRST_NAMES.len()], SURNAMES[(m * 7) % SURNAMES.len()])
            .await?;

        for k in 0..INVOICES_PER_CUSTOMER {
            let seed = m * INVOICES_PER_CUSTOMER + k;
            let invoice = db
                .invoices()
                .create(customer.id, STATUSES[seed % STATUSES.len()])
                .await?;

            let first = item_ids[(seed * 5) % item_ids.len()];
            db.invoices().add_item(invoice.id, first, 1 + (seed % 3) as i64).await?;

            if seed % 3 == 0 {
                let second = item_ids[(seed * 5 + 1) % item_ids.len()];
                db.invoices().add_item(invoice.id, second, 1).await?;
            }
            invoice_total += 1;
        }

        if (m + 1) % 10 == 0 {
            println!("  Generated {} merchants...", m + 1);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} merchants, {} items, {} invoices in {:?}",
        merchant_count, item_total, invoice_total, elapsed
    );

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn merchant_name(seed: usize) -> String {
    let first = SURNAMES[seed % SURNAMES.len()];
    let second = SURNAMES[(seed / SURNAMES.len() + seed * 3 + 1) % SURNAMES.len()];
    format!("{}-{}", first, second)
}

/// Generates a single item with stable pseudo-random data.
fn generate_item(merchant_id: i64, seed: usize) -> NewItem {
    let first = WORDS[seed % WORDS.len()];
    let second = WORDS[(seed * 7 + 3) % WORDS.len()];

    // 1.00 - 999.99
    let cents = 100 + ((seed * 7919) % 99_900) as i64;

    NewItem {
        name: format!("Item {} {}", first, second),
        description: format!("{} {} {}.", second, first.to_lowercase(), WORDS[(seed * 11) % WORDS.len()].to_lowercase()),
        unit_price: Money::from_cents(cents),
        merchant_id,
    }
}
