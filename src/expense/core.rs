//! Defines the core data models and database queries for expenses.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, database_id::ExpenseId};

/// The format for dates in forms and CSV files, e.g. "2024-01-15".
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

// ============================================================================
// MODELS
// ============================================================================

/// Money spent on something, e.g. lunch or a bus fare.
///
/// To create a new `Expense`, use [Expense::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense, assigned by the database and never reused.
    pub id: ExpenseId,
    /// How much money was spent.
    ///
    /// Negative amounts are allowed and represent refunds.
    pub amount: f64,
    /// A free-form label for the expense, e.g. "Food" or "Transport".
    pub category: String,
    /// When the money was spent.
    pub date: Date,
    /// A text description of what the money was spent on, may be empty.
    pub description: String,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [NewExpense] for discoverability.
    pub fn build(amount: f64, category: &str, date: Date) -> NewExpense {
        NewExpense {
            amount,
            category: category.to_owned(),
            date,
            description: String::new(),
        }
    }
}

/// An expense that has not been saved to the database yet, i.e. it has no ID.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// How much money was spent.
    pub amount: f64,
    /// A free-form label for the expense.
    pub category: String,
    /// When the money was spent.
    pub date: Date,
    /// What the money was spent on.
    pub description: String,
}

impl NewExpense {
    /// Set the description for the expense.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }
}

/// The new values for an existing expense.
///
/// A `date` of `None` keeps the date that is already stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseUpdate {
    /// How much money was spent.
    pub amount: f64,
    /// A free-form label for the expense.
    pub category: String,
    /// When the money was spent, or `None` to keep the current date.
    pub date: Option<Date>,
    /// What the money was spent on.
    pub description: String,
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Parse `text` as an amount of money.
///
/// Surrounding whitespace is ignored. Negative amounts are allowed.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `text` is not a number or is not finite.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| Error::InvalidAmount(text.to_owned()))
}

/// Parse `text` as a date in the format YYYY-MM-DD.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is not a valid date in that format.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Save a new expense to the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expense (amount, category, date, description)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, amount, category, date, description",
        )?
        .query_row(
            (
                new_expense.amount,
                new_expense.category,
                new_expense.date,
                new_expense.description,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Save many expenses to the database in a single transaction.
///
/// Either all of `new_expenses` are saved, or none of them are.
/// Returns the number of expenses saved.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error,
/// in which case the transaction is rolled back.
pub fn create_expenses(
    new_expenses: Vec<NewExpense>,
    connection: &Connection,
) -> Result<usize, Error> {
    let transaction = connection.unchecked_transaction()?;

    {
        let mut statement = transaction.prepare(
            "INSERT INTO expense (amount, category, date, description) VALUES (?1, ?2, ?3, ?4)",
        )?;

        for new_expense in &new_expenses {
            statement.execute((
                new_expense.amount,
                &new_expense.category,
                new_expense.date,
                &new_expense.description,
            ))?;
        }
    }

    transaction.commit()?;

    Ok(new_expenses.len())
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, amount, category, date, description FROM expense WHERE id = :id")?
        .query_one(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Retrieve every expense, most recent date first.
///
/// Expenses on the same date are returned in the order they were created.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, amount, category, date, description FROM expense
             ORDER BY date DESC, id ASC",
        )?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
}

/// Overwrite the amount, category, description and, optionally, the date of
/// the expense with `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_expense(
    id: ExpenseId,
    update: ExpenseUpdate,
    connection: &Connection,
) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "UPDATE expense
             SET amount = ?1, category = ?2, date = COALESCE(?3, date), description = ?4
             WHERE id = ?5
             RETURNING id, amount, category, date, description",
        )?
        .query_row(
            (
                update.amount,
                update.category,
                update.date,
                update.description,
                id,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Delete the expense with `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])?;

    match rows_affected {
        0 => Err(Error::NotFound),
        _ => Ok(()),
    }
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// `AUTOINCREMENT` stops SQLite from reusing the IDs of deleted expenses.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT ''
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let category = row.get(2)?;
    let date = row.get(3)?;
    let description = row.get(4)?;

    Ok(Expense {
        id,
        amount,
        category,
        date,
        description,
    })
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        expense::{
            Expense, ExpenseUpdate, count_expenses, create_expense, create_expenses,
            delete_expense, get_all_expenses, get_expense, update_expense,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let expense = create_expense(
            Expense::build(12.5, "Food", date!(2024 - 01 - 15)).description("Lunch"),
            &conn,
        )
        .expect("Could not create expense");

        assert_eq!(
            expense,
            Expense {
                id: 1,
                amount: 12.5,
                category: "Food".to_owned(),
                date: date!(2024 - 01 - 15),
                description: "Lunch".to_owned(),
            }
        );
    }

    #[test]
    fn get_returns_created_expense() {
        let conn = get_test_connection();
        let want = create_expense(Expense::build(3.2, "Transport", date!(2024 - 02 - 01)), &conn)
            .expect("Could not create expense");

        let got = get_expense(want.id, &conn);

        assert_eq!(got, Ok(want));
    }

    #[test]
    fn get_missing_expense_returns_not_found() {
        let conn = get_test_connection();

        assert_eq!(get_expense(42, &conn), Err(Error::NotFound));
    }

    #[test]
    fn list_is_sorted_by_date_descending_then_insertion_order() {
        let conn = get_test_connection();
        let inputs = [
            ("a", date!(2024 - 01 - 01)),
            ("b", date!(2024 - 03 - 01)),
            ("c", date!(2024 - 02 - 01)),
            ("d", date!(2024 - 03 - 01)),
            ("e", date!(2024 - 01 - 01)),
        ];
        for (category, date) in inputs {
            create_expense(Expense::build(1.0, category, date), &conn)
                .expect("Could not create expense");
        }

        let categories = get_all_expenses(&conn)
            .expect("Could not get expenses")
            .into_iter()
            .map(|expense| expense.category)
            .collect::<Vec<_>>();

        assert_eq!(categories, vec!["b", "d", "c", "a", "e"]);
    }

    #[test]
    fn ids_are_never_reused() {
        let conn = get_test_connection();
        let today = date!(2024 - 01 - 15);
        let first = create_expense(Expense::build(1.0, "Food", today), &conn).unwrap();
        let second = create_expense(Expense::build(2.0, "Food", today), &conn).unwrap();

        delete_expense(second.id, &conn).expect("Could not delete expense");
        delete_expense(first.id, &conn).expect("Could not delete expense");
        let third = create_expense(Expense::build(3.0, "Food", today), &conn).unwrap();

        assert_eq!((first.id, second.id, third.id), (1, 2, 3));
    }

    #[test]
    fn update_overwrites_fields() {
        let conn = get_test_connection();
        let expense = create_expense(
            Expense::build(1.23, "Food", date!(2024 - 01 - 15)).description("Lunch"),
            &conn,
        )
        .unwrap();

        let updated = update_expense(
            expense.id,
            ExpenseUpdate {
                amount: -4.5,
                category: "Refunds".to_owned(),
                date: Some(date!(2024 - 01 - 20)),
                description: "Returned shoes".to_owned(),
            },
            &conn,
        )
        .expect("Could not update expense");

        let want = Expense {
            id: expense.id,
            amount: -4.5,
            category: "Refunds".to_owned(),
            date: date!(2024 - 01 - 20),
            description: "Returned shoes".to_owned(),
        };
        assert_eq!(updated, want);
        assert_eq!(get_expense(expense.id, &conn), Ok(want));
    }

    #[test]
    fn update_without_date_keeps_stored_date() {
        let conn = get_test_connection();
        let expense = create_expense(Expense::build(1.0, "Food", date!(2024 - 01 - 15)), &conn)
            .unwrap();

        let updated = update_expense(
            expense.id,
            ExpenseUpdate {
                amount: 2.0,
                category: "Food".to_owned(),
                date: None,
                description: String::new(),
            },
            &conn,
        )
        .expect("Could not update expense");

        assert_eq!(updated.date, date!(2024 - 01 - 15));
        assert_eq!(updated.amount, 2.0);
    }

    #[test]
    fn update_missing_expense_returns_not_found() {
        let conn = get_test_connection();

        let result = update_expense(
            7,
            ExpenseUpdate {
                amount: 2.0,
                category: "Food".to_owned(),
                date: None,
                description: String::new(),
            },
            &conn,
        );

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_expense_returns_not_found() {
        let conn = get_test_connection();

        assert_eq!(delete_expense(1, &conn), Err(Error::NotFound));
    }

    #[test]
    fn create_many_saves_all_expenses() {
        let conn = get_test_connection();
        let today = date!(2024 - 01 - 15);

        let count = create_expenses(
            vec![
                Expense::build(1.0, "Food", today),
                Expense::build(2.0, "Rent", today),
            ],
            &conn,
        )
        .expect("Could not create expenses");

        assert_eq!(count, 2);
        assert_eq!(count_expenses(&conn), Ok(2));
    }

    #[test]
    fn create_many_rolls_back_on_error() {
        let conn = get_test_connection();
        let today = date!(2024 - 01 - 15);
        create_expense(Expense::build(1.0, "Food", today), &conn).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER reject_rent BEFORE INSERT ON expense
             WHEN NEW.category = 'Rent'
             BEGIN SELECT RAISE(ABORT, 'no rent allowed'); END;",
        )
        .unwrap();

        let result = create_expenses(
            vec![
                Expense::build(2.0, "Food", today),
                Expense::build(3.0, "Rent", today),
            ],
            &conn,
        );

        assert!(matches!(result, Err(Error::SqlError(_))));
        assert_eq!(count_expenses(&conn), Ok(1));
    }
}
