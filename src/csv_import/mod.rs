//! Importing expenses from CSV files.

mod import_expenses;
mod import_page;

pub use import_expenses::{ImportOutcome, import_csv, import_expenses_endpoint};
pub use import_page::get_import_page;
