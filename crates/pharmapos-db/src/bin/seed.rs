//! # Seed Data Generator
//!
//! Populates the database with a demo pharmacy for development.
//!
//! ## Usage
//! ```bash
//! # Default: ./pharmapos_dev.db, 200 stock lots
//! cargo run -p pharmapos-db --bin seed
//!
//! # Custom amount
//! cargo run -p pharmapos-db --bin seed -- --lots 1000
//!
//! # Specify database path
//! cargo run -p pharmapos-db --bin seed -- --db ./data/pharmapos.db
//! ```
//!
//! ## Generated Data
//! - One owner user and one demo pharmacy
//! - A medicine catalog built from common brand/generic pairs
//! - Stock lots with varied prices, quantities and expiry dates
//!   (a slice of them expiring soon, to exercise expiry alerts)

use chrono::{Duration, Utc};
use std::env;
use uuid::Uuid;

use pharmapos_core::{InventoryRecord, Medicine, Pharmacy, User};
use pharmapos_db::{Database, DbConfig};

/// Brand name, generic name, form, strength.
const MEDICINES: &[(&str, &str, &str, &str)] = &[
    ("Panadol", "Paracetamol", "tablet", "500mg"),
    ("Panadol Extra", "Paracetamol + Caffeine", "tablet", "500mg"),
    ("Calpol", "Paracetamol", "syrup", "120mg/5ml"),
    ("Brufen", "Ibuprofen", "tablet", "400mg"),
    ("Disprin", "Aspirin", "tablet", "300mg"),
    ("Augmentin", "Amoxicillin + Clavulanate", "tablet", "625mg"),
    ("Amoxil", "Amoxicillin", "capsule", "500mg"),
    ("Flagyl", "Metronidazole", "tablet", "400mg"),
    ("Ciproxin", "Ciprofloxacin", "tablet", "500mg"),
    ("Zithromax", "Azithromycin", "tablet", "250mg"),
    ("Ventolin", "Salbutamol", "inhaler", "100mcg"),
    ("Zyrtec", "Cetirizine", "tablet", "10mg"),
    ("Claritin", "Loratadine", "tablet", "10mg"),
    ("Avil", "Pheniramine", "tablet", "25mg"),
    ("Gaviscon", "Alginate", "suspension", "250ml"),
    ("Mucaine", "Oxetacaine", "suspension", "120ml"),
    ("Risek", "Omeprazole", "capsule", "20mg"),
    ("Nexum", "Esomeprazole", "tablet", "40mg"),
    ("Glucophage", "Metformin", "tablet", "500mg"),
    ("Getryl", "Glimepiride", "tablet", "2mg"),
    ("Norvasc", "Amlodipine", "tablet", "5mg"),
    ("Tenormin", "Atenolol", "tablet", "50mg"),
    ("Lipitor", "Atorvastatin", "tablet", "20mg"),
    ("Motilium", "Domperidone", "tablet", "10mg"),
    ("Gravinate", "Dimenhydrinate", "tablet", "50mg"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut lots: usize = 200;
    let mut db_path = String::from("./pharmapos_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--lots" | "-l" => {
                if i + 1 < args.len() {
                    lots = args[i + 1].parse().unwrap_or(200);
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
                println!("PharmaPOS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -l, --lots <N>     Number of stock lots to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./pharmapos_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 PharmaPOS Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Stock lots: {}", lots);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to double-seed
    let owner = db.users().get_by_email("owner@demo.pharmapos").await?;
    if owner.is_some() {
        println!("⚠ Database already seeded");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let now = Utc::now();
    let start = std::time::Instant::now();

    // Owner + pharmacy
    let owner = User {
        id: Uuid::new_v4().to_string(),
        name: "Demo Owner".to_string(),
        email: "owner@demo.pharmapos".to_string(),
        role: "owner".to_string(),
        created_at: now,
    };
    db.users().insert(&owner).await?;

    let pharmacy = Pharmacy {
        id: Uuid::new_v4().to_string(),
        owner_id: owner.id.clone(),
        name: "Demo Pharmacy".to_string(),
        address: Some("14 Mall Road, Lahore".to_string()),
        phone: Some("+92-42-0000000".to_string()),
        created_at: now,
        updated_at: now,
    };
    db.pharmacies().create(&pharmacy).await?;

    println!("✓ Created pharmacy {}", pharmacy.name);

    // Medicine catalog
    let mut medicine_ids = Vec::with_capacity(MEDICINES.len());
    for (brand, generic, form, strength) in MEDICINES {
        let medicine = Medicine {
            id: Uuid::new_v4().to_string(),
            brand_name: brand.to_string(),
            generic_name: generic.to_string(),
            manufacturer: None,
            form: Some(form.to_string()),
            strength: Some(strength.to_string()),
            created_at: now,
        };
        db.medicines().insert(&medicine).await?;
        medicine_ids.push(medicine.id);
    }

    println!("✓ Inserted {} catalog medicines", medicine_ids.len());

    // Stock lots cycling through the catalog with varied prices,
    // quantities and expiry horizons.
    println!();
    println!("Generating stock lots...");

    let mut generated = 0;
    for seed in 0..lots {
        let medicine_id = medicine_ids[seed % medicine_ids.len()].clone();

        // Sale price Rs 0.50 - Rs 25.50 per unit, cost at 60-80%.
        let unit_sale_cents = 50 + ((seed * 37) % 2500) as i64;
        let cost_pct = 60 + (seed % 20) as i64;
        let unit_cost_cents = unit_sale_cents * cost_pct / 100;

        // Every seventh lot expires within a month.
        let expiry_days = if seed % 7 == 0 {
            5 + (seed % 25) as i64
        } else {
            180 + ((seed * 13) % 540) as i64
        };

        let record = InventoryRecord {
            id: Uuid::new_v4().to_string(),
            pharmacy_id: pharmacy.id.clone(),
            medicine_id: Some(medicine_id),
            quantity: (seed % 150) as i64,
            unit_cost_cents,
            unit_sale_cents,
            expiry_date: Some(now.date_naive() + Duration::days(expiry_days)),
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = db.inventory().add_record(&record).await {
            eprintln!("Failed to insert lot {}: {}", record.id, e);
            continue;
        }

        generated += 1;

        if generated % 500 == 0 {
            println!("  Generated {} lots...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} stock lots in {:?}", generated, elapsed);

    // Verify lookup paths
    println!();
    println!("Verifying queries...");
    let hits = db.medicines().search("pan", 10).await?;
    println!("  Search 'pan': {} results", hits.len());

    let expiring = db.inventory().expiring_within(&pharmacy.id, 30).await?;
    println!("  Expiring within 30 days: {} lots", expiring.len());

    println!();
    println!("✓ Seed complete!");

    // Machine-readable summary for scripts that provision test setups.
    let summary = serde_json::json!({
        "pharmacy_id": pharmacy.id,
        "owner_id": owner.id,
        "medicines": medicine_ids.len(),
        "stock_lots": generated,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
