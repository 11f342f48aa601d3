use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{Expense, NewExpense, count_expenses, create_expense, initialize_db};

/// A utility for creating a test database for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample expenses...");

    for new_expense in sample_expenses() {
        create_expense(new_expense, &conn)?;
    }

    println!("Created {} expenses.", count_expenses(&conn)?);
    println!("Success!");

    Ok(())
}

fn sample_expenses() -> Vec<NewExpense> {
    let today = OffsetDateTime::now_utc().date();

    [
        (0, 4.5, "Coffee", "Flat white"),
        (0, 12.5, "Food", "Lunch"),
        (1, 3.2, "Transport", "Bus fare"),
        (2, 86.4, "Groceries", "Weekly shop"),
        (3, -20.0, "Refunds", "Returned shoes"),
        (5, 1450.0, "Rent", ""),
        (8, 62.99, "Utilities", "Power bill, March"),
        (13, 24.0, "Entertainment", "Movie tickets"),
    ]
    .into_iter()
    .map(|(days_ago, amount, category, description)| {
        Expense::build(amount, category, today - Duration::days(days_ago)).description(description)
    })
    .collect()
}
