//! # Seed Data Generator
//!
//! Populates the database with a demo menu, tables and opening deliveries.
//!
//! ## Usage
//! ```bash
//! # Seed ./kasse_dev.db
//! cargo run -p kasse-db --bin seed
//!
//! # Specify database path
//! cargo run -p kasse-db --bin seed -- --db ./data/kasse.db
//!
//! # Units per opening delivery (default: 20)
//! cargo run -p kasse-db --bin seed -- --stock 50
//! ```

use std::env;

use kasse_core::{Delivery, Item, Money, Table};
use kasse_db::{Database, DbConfig};

/// Demo menu: name and price in cents.
const MENU: &[(&str, i64)] = &[
    ("Flammkuchen Elsässer Art", 890),
    ("Wiener Schnitzel", 1650),
    ("Käsespätzle", 1190),
    ("Rinderroulade", 1790),
    ("Gemischter Salat", 650),
    ("Kartoffelsuppe", 590),
    ("Apfelstrudel", 520),
    ("Rote Grütze", 480),
    ("Pils 0.3", 320),
    ("Weizen 0.5", 450),
    ("Apfelschorle 0.4", 350),
    ("Espresso", 240),
];

const TABLES: &[&str] = &[
    "Tisch 1", "Tisch 2", "Tisch 3", "Tisch 4", "Fenster", "Terrasse 1", "Terrasse 2", "Theke",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut stock: i64 = 20;
    let mut db_path = String::from("./kasse_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--stock" | "-s" => {
                if i + 1 < args.len() {
                    stock = args[i + 1].parse().unwrap_or(20);
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
                println!("Kasse Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --stock <N>    Units per opening delivery (default: 20)");
                println!("  -d, --db <PATH>    Database file path (default: ./kasse_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kasse Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for name in TABLES {
        db.tables().insert(&Table::new(*name)).await?;
    }
    println!("✓ Created {} tables", TABLES.len());

    for (name, cents) in MENU {
        let id = db.items().insert(&Item::new(*name, Money::from_cents(*cents))).await?;
        if stock > 0 {
            db.deliveries().insert(&Delivery::new(id, stock)).await?;
        }
    }
    println!("✓ Created {} items with {} units each", MENU.len(), stock.max(0));

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
