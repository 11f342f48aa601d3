//! The CSV file format shared by export and import.
//!
//! A file has a header row followed by one row per expense with the columns
//! `Date, Category, Amount, Description`.

use csv::StringRecord;

use crate::{
    Error,
    expense::{DATE_FORMAT, Expense, NewExpense, parse_amount, parse_date},
};

/// The header row, which also fixes the column order.
pub const COLUMNS: [&str; 4] = ["Date", "Category", "Amount", "Description"];

const DATE_COLUMN: usize = 0;
const CATEGORY_COLUMN: usize = 1;
const AMOUNT_COLUMN: usize = 2;
const DESCRIPTION_COLUMN: usize = 3;

/// Write `expense` as the fields of a CSV row, in [COLUMNS] order.
///
/// The amount is written as the shortest decimal that parses back to the
/// same value, e.g. `12.5`.
///
/// # Errors
/// Returns [Error::SerializationError] if the amount is not finite or the
/// date cannot be formatted.
pub fn to_row(expense: &Expense) -> Result<[String; 4], Error> {
    if !expense.amount.is_finite() {
        return Err(Error::SerializationError(format!(
            "expense {} has the amount {}, which cannot be written as a number",
            expense.id, expense.amount
        )));
    }

    let date = expense.date.format(DATE_FORMAT).map_err(|error| {
        Error::SerializationError(format!(
            "could not format the date of expense {}: {error}",
            expense.id
        ))
    })?;

    let mut row: [String; 4] = Default::default();
    row[DATE_COLUMN] = date;
    row[CATEGORY_COLUMN] = expense.category.clone();
    row[AMOUNT_COLUMN] = expense.amount.to_string();
    row[DESCRIPTION_COLUMN] = expense.description.clone();

    Ok(row)
}

/// Parse a CSV row as a new expense.
///
/// `row` is the 1-based index of the data row and is used to report errors.
/// A row with only three columns has an empty description. Text fields are
/// kept exactly as written.
///
/// # Errors
/// Returns [Error::ImportError] if the row does not have three or four
/// columns, the date or amount is invalid, or the category is empty.
pub fn from_row(record: &StringRecord, row: usize) -> Result<NewExpense, Error> {
    let import_error = |reason: String| Error::ImportError { row, reason };

    if !(3..=4).contains(&record.len()) {
        return Err(import_error(format!(
            "expected 3 or 4 columns but found {}",
            record.len()
        )));
    }

    let field = |column: usize| record.get(column).unwrap_or_default();

    let date = parse_date(field(DATE_COLUMN)).map_err(|error| import_error(error.to_string()))?;
    let category = field(CATEGORY_COLUMN);
    if category.trim().is_empty() {
        return Err(import_error(Error::EmptyCategory.to_string()));
    }
    let amount =
        parse_amount(field(AMOUNT_COLUMN)).map_err(|error| import_error(error.to_string()))?;

    Ok(NewExpense {
        amount,
        category: category.to_owned(),
        date,
        description: field(DESCRIPTION_COLUMN).to_owned(),
    })
}
