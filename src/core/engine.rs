//! Scripted response engine.
//!
//! Maps a free-text query to a canned reply by keyword matching. Rules are
//! checked in order and the first rule with a matching keyword wins; a query
//! matching nothing gets the help reply, so every input has an answer.

use crate::core::mock;
use crate::core::model::{Attachment, Message, Reply};
use crate::core::templates;
use minijinja::context;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    TopProducts,
    Forecast,
    Campaign,
    SlowInventory,
    Help,
}

pub struct Rule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

impl Rule {
    fn matches(&self, lowered_query: &str) -> bool {
        self.keywords.iter().any(|k| lowered_query.contains(k))
    }
}

/// Intent rules in precedence order.
pub const RULES: &[Rule] = &[
    Rule {
        intent: Intent::TopProducts,
        keywords: &["best", "top", "selling"],
    },
    Rule {
        intent: Intent::Forecast,
        keywords: &["predict", "forecast", "next"],
    },
    Rule {
        intent: Intent::Campaign,
        keywords: &["diwali", "festival", "campaign"],
    },
    Rule {
        intent: Intent::SlowInventory,
        keywords: &["slow", "inventory", "stock"],
    },
];

const FORECAST_NOTES: [&str; 3] = ["+8.5% growth", "+2.4% growth", "-1.7% seasonal dip"];

/// Campaign slogans with an English gloss where the slogan is not in English.
const SLOGANS: [(&str, Option<&str>); 2] = [
    ("Ghar ka swad, festival ke saath", Some("Home taste with festivals")),
    ("Quality ingredients for your Diwali feast", None),
];

const HELP_TOPICS: [(&str, &str); 5] = [
    ("Sales Analysis", "Which products sold the most this month?"),
    ("Revenue Forecasting", "Predict next week's sales"),
    ("Marketing Strategy", "Suggest a Diwali discount campaign"),
    ("Inventory Management", "Which items are slow-moving?"),
    ("Customer Insights", "Who are my top customers?"),
];

pub fn classify(query: &str) -> Intent {
    let lowered = query.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Help)
}

pub fn build_reply(intent: Intent) -> Reply {
    match intent {
        Intent::TopProducts => top_products(),
        Intent::Forecast => forecast(),
        Intent::Campaign => Reply::text(templates::render(
            templates::CAMPAIGN,
            context! { spice_kit_price => 299, slogans => SLOGANS },
        )),
        Intent::SlowInventory => Reply::text(templates::render(
            templates::SLOW_INVENTORY,
            context! { items => mock::SLOW_MOVERS },
        )),
        Intent::Help => Reply::text(templates::render(
            templates::HELP,
            context! { topics => HELP_TOPICS },
        )),
    }
}

/// Answers a query with a new assistant message.
pub fn classify_and_respond(query: &str) -> Message {
    Message::assistant(build_reply(classify(query)))
}

fn top_products() -> Reply {
    let products: Vec<_> = mock::TOP_PRODUCTS
        .iter()
        .map(|&(_, display, units, revenue)| context! { display, units, revenue })
        .collect();

    let text = templates::render(
        templates::TOP_PRODUCTS,
        context! { products, leader => "Rice", growth => 15 },
    );

    Reply::with_attachment(text, Attachment::Table(mock::top_product_rows()))
}

fn forecast() -> Reply {
    let weeks: Vec<_> = mock::FORECAST
        .iter()
        .skip(1)
        .zip(FORECAST_NOTES)
        .map(|(&(label, predicted, _), note)| context! { label, predicted, note })
        .collect();

    let text = templates::render(templates::FORECAST, context! { weeks });

    Reply::with_attachment(text, Attachment::Series(mock::forecast_series()))
}
