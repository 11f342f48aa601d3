use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    Error, app_state::LedgerState, database_id::ExpenseId, endpoints,
    expense::core::delete_expense,
};

/// A route handler for deleting an expense, redirects to the expense list on success.
///
/// Responds with the 404 page if the expense does not exist.
pub async fn delete_expense_endpoint(
    State(state): State<LedgerState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Response, Error> {
    {
        let connection = state.connection()?;
        delete_expense(expense_id, &connection)
            .inspect_err(|error| tracing::debug!("Could not delete expense {expense_id}: {error}"))?;
    }

    tracing::debug!("Deleted expense {expense_id}");

    Ok(Redirect::to(endpoints::ROOT).into_response())
}
