//! Defines the endpoint for creating a new expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::LedgerState,
    endpoints,
    expense::{core::create_expense, form::ExpenseForm},
    timezone::local_today,
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new expense, redirects to the expense list on success.
///
/// The form is validated before anything is written to the database.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let new_expense = form
        .into_new_expense(today)
        .inspect_err(|error| tracing::debug!("Rejected new expense: {error}"))?;

    let ledger = LedgerState {
        db_connection: state.db_connection,
    };
    let connection = ledger.connection()?;
    let expense = create_expense(new_expense, &connection)
        .inspect_err(|error| tracing::error!("could not create expense: {error}"))?;

    tracing::debug!("Created expense {}", expense.id);

    Ok(Redirect::to(endpoints::ROOT).into_response())
}
