//! Expense management for the expense tracker.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and `NewExpense`/`ExpenseUpdate` for writing expenses
//! - Database functions for storing, querying, and managing expenses
//! - The shared add/edit form and the handlers for expense web pages

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod list_page;

pub use core::{
    DATE_FORMAT, Expense, ExpenseUpdate, NewExpense, count_expenses, create_expense,
    create_expense_table, create_expenses, delete_expense, get_all_expenses, get_expense,
    parse_amount, parse_date, update_expense,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use edit_endpoint::edit_expense_endpoint;
pub use edit_page::get_edit_expense_page;
pub use list_page::get_expenses_page;

#[cfg(test)]
pub use form::ExpenseForm;
