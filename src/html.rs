//! Shared HTML layout, style constants and formatting helpers.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, html};
use numfmt::{Formatter, Precision};
use unicode_segmentation::UnicodeSegmentation;

use crate::endpoints;

pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 hover:bg-blue-600 dark:hover:bg-blue-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline";

pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto lg:py-0 max-w-md text-gray-900 dark:text-white";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white bg-gray-50 dark:bg-gray-700 border \
    border-gray-300 dark:border-gray-600 dark:placeholder-gray-400 \
    focus:ring-blue-600 focus:border-blue-600";

pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";
pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";
pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

/// The max number of graphemes of a description shown in the expense table
/// before it is truncated with an ellipsis.
pub const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// The page skeleton shared by every full page.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Expense Tracker" }
                link href={ (endpoints::STATIC) "/main.css" } rel="stylesheet";
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1 class="mb-4 text-7xl tracking-tight font-extrabold text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p class="mb-4 text-3xl tracking-tight font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p class="mb-4 text-xl tracking-tight text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href=(endpoints::ROOT)
                        class="inline-flex text-white bg-blue-600 hover:bg-blue-800
                            font-medium rounded text-sm px-5 py-2.5 text-center my-4"
                    {
                        "Back to Expenses"
                    }
                }
            }
        }
    );

    base(title, &content)
}

/// Format `amount` as dollars and cents with thousands separators, e.g. "-$1,234.50".
pub fn format_currency(amount: f64) -> String {
    static DOLLAR_FMT: OnceLock<Formatter> = OnceLock::new();

    let dollar_fmt = DOLLAR_FMT.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .expect("',' is a valid separator")
            .precision(Precision::Decimals(0))
    });

    let total_cents = (amount.abs() * 100.0).round();
    let dollars = (total_cents / 100.0).trunc();
    let cents = total_cents - dollars * 100.0;
    let sign = if amount < 0.0 && total_cents > 0.0 {
        "-"
    } else {
        ""
    };

    // numfmt renders zero as "0" regardless of precision, which is what we want here.
    format!("{sign}${}.{:02}", dollar_fmt.fmt_string(dollars), cents as u8)
}

/// Shorten `description` to [MAX_DESCRIPTION_GRAPHEMES] graphemes, appending
/// an ellipsis when anything was cut off.
pub fn truncate_description(description: &str) -> String {
    let mut graphemes = description.graphemes(true);
    let truncated = graphemes
        .by_ref()
        .take(MAX_DESCRIPTION_GRAPHEMES)
        .collect::<String>();

    if graphemes.next().is_some() {
        format!("{truncated}…")
    } else {
        truncated
    }
}
