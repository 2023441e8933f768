//! # Seed Data Generator
//!
//! Populates the receipt store with demo receipts and prints a scannable
//! wire code for each.
//!
//! ## Usage
//! ```bash
//! # Generate 20 receipts (default)
//! cargo run -p receipt-db --bin seed
//!
//! # Generate custom amount for a specific store
//! cargo run -p receipt-db --bin seed -- --count 100 --store STORE-A
//!
//! # Specify database path
//! cargo run -p receipt-db --bin seed -- --db ./data/receipts.db
//! ```
//!
//! ## Generated Receipts
//! - Receipt number: `YYYYMMDD-01-NNNN`
//! - 1 to 4 line items from a fixed product list
//! - Tax rate cycling through 0%, 5%, 8.25%, 10%
//! - Every third receipt has customer contact details

use anyhow::Result;
use chrono::{Duration, NaiveTime, Utc};
use clap::Parser;
use tracing::warn;

use receipt_core::{CodeGenerator, ReceiptCodeConfig};
use receipt_db::{Database, DbConfig, NewReceipt, NewReceiptItem};

/// Products for realistic line items: (name, unit price in cents).
const PRODUCTS: &[(&str, i64)] = &[
    ("Coca-Cola 330ml", 199),
    ("Chips Lays Classic", 249),
    ("Whole Milk 1L", 189),
    ("White Bread", 299),
    ("Vanilla Ice Cream", 549),
    ("Greek Yogurt", 129),
    ("Pasta Penne", 179),
    ("Orange Juice", 399),
];

/// Tax rates in basis points.
const TAX_RATES: &[u32] = &[0, 500, 825, 1000];

const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Ada Lovelace", "555-0100", "ada@example.com"),
    ("Alan Turing", "555-0101", "alan@example.com"),
    ("Grace Hopper", "555-0102", "grace@example.com"),
];

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Titan receipt store seed data generator")]
struct Args {
    /// Number of receipts to generate
    #[arg(short, long, default_value_t = 20)]
    count: usize,

    /// Database file path
    #[arg(short, long, default_value = "./receipts_dev.db")]
    db: String,

    /// Store id embedded in the printed wire codes
    #[arg(short, long)]
    store: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();

    println!("🌱 Titan Receipt Seed Data Generator");
    println!("====================================");
    println!("Database: {}", args.db);
    println!("Receipts: {}", args.count);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.receipts().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} receipts", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let config = match args.store.as_deref() {
        Some(store) => ReceiptCodeConfig::default().with_store_id(store),
        None => ReceiptCodeConfig::default(),
    };
    let generator = CodeGenerator::new(&config);

    println!();
    println!("Generating receipts...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..args.count {
        let receipt = generate_receipt(seed);

        if let Err(e) = db.receipts().insert_receipt(&receipt).await {
            warn!(receipt_number = %receipt.receipt_number, error = %e, "Insert failed");
            continue;
        }

        let code = generator.generate(&receipt.receipt_number, None)?;
        println!(
            "  {}  {:>8}  {}",
            receipt.receipt_number,
            format_cents(receipt.grand_total_cents),
            code.wire_code
        );

        generated += 1;
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} receipts in {:?}", generated, elapsed);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single receipt with deterministic demo data.
fn generate_receipt(seed: usize) -> NewReceipt {
    let now = Utc::now();
    let day = now.date_naive() - Duration::days((seed / 10) as i64);
    let time = NaiveTime::from_hms_opt(9 + (seed % 10) as u32, ((seed * 7) % 60) as u32, 0)
        .unwrap_or_default();

    let receipt_number = format!("{}-01-{:04}", day.format("%Y%m%d"), seed + 1);

    let item_count = 1 + seed % 4;
    let items = (0..item_count)
        .map(|i| {
            let (name, price) = PRODUCTS[(seed + i * 3) % PRODUCTS.len()];
            NewReceiptItem::new(name, 1 + ((seed + i) % 3) as i64, price)
        })
        .collect();

    let tax_rate_bps = TAX_RATES[seed % TAX_RATES.len()];
    let receipt = NewReceipt::from_items(receipt_number, day, time, tax_rate_bps, items);

    if seed % 3 == 0 {
        let (name, phone, email) = CUSTOMERS[(seed / 3) % CUSTOMERS.len()];
        receipt
            .with_customer(Some(name), Some(phone), Some(email))
            .with_notes("Loyalty member")
    } else {
        receipt
    }
}

fn format_cents(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}
