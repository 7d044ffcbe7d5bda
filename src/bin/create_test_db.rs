use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};

use welth_ledger::{
    AccountDraft, AccountKind, TransactionDraft, TransactionStatus, TransactionType, create_user,
    initialize_db,
    ledger::{create_account, create_transaction},
};

/// A utility for creating a test database for the JSON API server of welth_ledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// How many days of history to generate, ending today.
const DAYS_OF_HISTORY: i64 = 90;

/// Categories with their typical amount range in whole dollars.
const INCOME_CATEGORIES: [(&str, i64, i64); 4] = [
    ("salary", 5000, 8000),
    ("freelance", 1000, 3000),
    ("investments", 500, 2000),
    ("other-income", 100, 1000),
];

const EXPENSE_CATEGORIES: [(&str, i64, i64); 10] = [
    ("housing", 1000, 2000),
    ("transportation", 100, 500),
    ("groceries", 200, 600),
    ("utilities", 100, 300),
    ("entertainment", 50, 200),
    ("food", 50, 150),
    ("shopping", 100, 500),
    ("healthcare", 100, 1000),
    ("education", 200, 1000),
    ("travel", 500, 2000),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let mut conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user...");
    let user = create_user("test-user", &conn)?;

    let account = create_account(
        AccountDraft {
            name: "Everyday".to_owned(),
            kind: AccountKind::Current,
            balance: Decimal::ZERO,
            is_default: true,
        },
        user.id,
        &mut conn,
    )?;

    println!("Creating {DAYS_OF_HISTORY} days of transactions...");
    let today = OffsetDateTime::now_utc().date();
    let mut count = 0;

    for days_ago in (0..=DAYS_OF_HISTORY).rev() {
        let date = today - Duration::days(days_ago);

        // 1 to 3 transactions per day
        for slot in 0..(1 + days_ago % 3) {
            let seed = days_ago * 7 + slot * 3;
            // 2 in 5 are income.
            let (transaction_type, categories): (_, &[(&str, i64, i64)]) = if seed % 5 < 2 {
                (TransactionType::Income, &INCOME_CATEGORIES)
            } else {
                (TransactionType::Expense, &EXPENSE_CATEGORIES)
            };
            let (category, min, max) = categories[(seed as usize) % categories.len()];
            let cents = min * 100 + (seed * 7919) % ((max - min) * 100);
            let verb = match transaction_type {
                TransactionType::Income => "Received",
                TransactionType::Expense => "Paid for",
            };

            create_transaction(
                TransactionDraft {
                    account_id: account.id,
                    transaction_type,
                    amount: Decimal::new(cents, 2),
                    date,
                    description: format!("{verb} {category}"),
                    category: category.to_owned(),
                    status: TransactionStatus::Completed,
                    is_recurring: false,
                    recurring_interval: None,
                },
                user.id,
                &mut conn,
            )?;
            count += 1;
        }
    }

    println!("Created {count} transactions.");
    println!("Success!");

    Ok(())
}
