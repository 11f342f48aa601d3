//! Defines the page for editing an existing expense.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::LedgerState,
    database_id::ExpenseId,
    endpoints::{self, format_endpoint},
    expense::{
        Expense,
        core::get_expense,
        form::{ExpenseFormDefaults, expense_form_fields},
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base},
    navigation::NavBar,
};

fn edit_expense_view(expense: &Expense) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();
    let edit_url = format_endpoint(endpoints::EDIT_EXPENSE, expense.id);
    let defaults = ExpenseFormDefaults {
        amount: Some(expense.amount),
        category: Some(expense.category.as_str()),
        date: Some(expense.date),
        description: Some(expense.description.as_str()),
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form method="post" action=(edit_url) class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Expense" }

                (expense_form_fields(&defaults))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Changes" }

                a href=(endpoints::ROOT) class=(LINK_STYLE) { "Cancel" }
            }
        }
    };

    base("Edit Expense", &content)
}

/// Renders the form for editing the expense with `expense_id`, pre-filled
/// with its current values.
///
/// Responds with the 404 page if the expense does not exist.
pub async fn get_edit_expense_page(
    State(state): State<LedgerState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Response, Error> {
    let expense = {
        let connection = state.connection()?;
        get_expense(expense_id, &connection)?
    };

    Ok(edit_expense_view(&expense).into_response())
}
