//! Defines the endpoint for saving changes to an existing expense.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use crate::{
    Error,
    app_state::LedgerState,
    database_id::ExpenseId,
    endpoints,
    expense::{core::update_expense, form::ExpenseForm},
};

/// A route handler for updating the expense with `expense_id`, redirects to
/// the expense list on success.
///
/// Leaving the date empty keeps the stored date. Invalid input is rejected
/// without changing the expense.
pub async fn edit_expense_endpoint(
    State(state): State<LedgerState>,
    Path(expense_id): Path<ExpenseId>,
    Form(form): Form<ExpenseForm>,
) -> Result<Response, Error> {
    let update = form
        .into_update()
        .inspect_err(|error| tracing::debug!("Rejected edit of expense {expense_id}: {error}"))?;

    {
        let connection = state.connection()?;
        update_expense(expense_id, update, &connection).inspect_err(|error| {
            tracing::error!("Could not update expense {expense_id}: {error}")
        })?;
    }

    Ok(Redirect::to(endpoints::ROOT).into_response())
}
