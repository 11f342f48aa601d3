//! Database ID type definition.

/// Alias for the integer type SQLite assigns to expense rows.
pub type ExpenseId = i64;
