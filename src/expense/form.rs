//! The form used for adding and editing expenses.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    expense::core::{ExpenseUpdate, NewExpense, parse_amount, parse_date},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The advertised limit for descriptions. Storage does not enforce it.
pub const DESCRIPTION_MAX_LENGTH: usize = 200;

/// The form data for creating or editing an expense.
///
/// Every field is kept as text so that malformed input can be reported with
/// a helpful message instead of a generic deserialization error.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExpenseForm {
    /// The amount spent, e.g. "12.50".
    #[serde(default)]
    pub amount: String,
    /// A free-form label, e.g. "Food".
    #[serde(default)]
    pub category: String,
    /// The date as YYYY-MM-DD, or empty/absent for the default.
    #[serde(default)]
    pub date: Option<String>,
    /// What the money was spent on.
    #[serde(default)]
    pub description: Option<String>,
}

impl ExpenseForm {
    /// Validate the form as a new expense, using `today` when no date is given.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount], [Error::EmptyCategory] or
    /// [Error::InvalidDate] for the first invalid field.
    pub fn into_new_expense(self, today: Date) -> Result<NewExpense, Error> {
        let (amount, category, date, description) = self.validate()?;

        Ok(NewExpense {
            amount,
            category,
            date: date.unwrap_or(today),
            description,
        })
    }

    /// Validate the form as new values for an existing expense.
    ///
    /// An empty date keeps the date that is already stored.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount], [Error::EmptyCategory] or
    /// [Error::InvalidDate] for the first invalid field.
    pub fn into_update(self) -> Result<ExpenseUpdate, Error> {
        let (amount, category, date, description) = self.validate()?;

        Ok(ExpenseUpdate {
            amount,
            category,
            date,
            description,
        })
    }

    fn validate(self) -> Result<(f64, String, Option<Date>, String), Error> {
        let amount = parse_amount(&self.amount)?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(parse_date(text)?),
        };

        Ok((
            amount,
            category.to_owned(),
            date,
            self.description.unwrap_or_default(),
        ))
    }
}

/// The values to pre-fill the expense form with.
#[derive(Default)]
pub struct ExpenseFormDefaults<'a> {
    pub amount: Option<f64>,
    pub category: Option<&'a str>,
    pub date: Option<Date>,
    pub description: Option<&'a str>,
}

/// The inputs shared by the add and edit expense forms.
pub fn expense_form_fields(defaults: &ExpenseFormDefaults<'_>) -> Markup {
    let amount = defaults.amount.map(|amount| amount.to_string());

    html! {
        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                placeholder="0.00"
                required
                value=[amount.as_deref()]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            input
                name="category"
                id="category"
                type="text"
                placeholder="Food"
                required
                value=[defaults.category]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                value=[defaults.date]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                maxlength=(DESCRIPTION_MAX_LENGTH)
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
