//! Static business data backing the assistant and the dashboard.

use crate::core::model::{ProductRow, SeriesPoint};
use serde::Serialize;

pub const SUGGESTED_QUERIES: [&str; 5] = [
    "Which product sold the most this month?",
    "Predict next week's sales revenue",
    "Suggest a Diwali discount campaign",
    "Show slow-moving inventory items",
    "What's my customer growth trend?",
];

/// Top sellers this month: (table name, display name, units, revenue).
pub const TOP_PRODUCTS: [(&str, &str, u32, u32); 3] = [
    ("Rice 1kg", "Rice (1kg)", 450, 20250),
    ("Dal 500g", "Dal (500g)", 320, 16000),
    ("Oil 1L", "Cooking Oil (1L)", 280, 19600),
];

/// Weekly revenue forecast: (label, predicted, actual).
pub const FORECAST: [(&str, u32, Option<u32>); 4] = [
    ("This Week", 15500, Some(15200)),
    ("Next Week", 16800, None),
    ("Week +2", 17200, None),
    ("Week +3", 16900, None),
];

/// Under-performing items: (name, units, lead-in, wording after the count).
pub const SLOW_MOVERS: [(&str, u32, &str, &str); 3] = [
    ("Organic Honey (500g)", 12, "Only ", "units sold this month"),
    ("Premium Basmati Rice (5kg)", 8, "", "units moved"),
    ("Imported Almonds (250g)", 15, "", "units sold"),
];

pub fn top_product_rows() -> Vec<ProductRow> {
    TOP_PRODUCTS
        .iter()
        .map(|&(name, _, units, revenue)| ProductRow {
            name: name.to_owned(),
            units,
            revenue: f64::from(revenue),
        })
        .collect()
}

pub fn forecast_series() -> Vec<SeriesPoint> {
    FORECAST
        .iter()
        .map(|&(label, predicted, actual)| SeriesPoint {
            label: label.to_owned(),
            predicted: f64::from(predicted),
            actual: actual.map(f64::from),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadlineStat {
    pub title: &'static str,
    pub value: u32,
    /// Month over month change in percent.
    pub change: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySales {
    pub month: &'static str,
    pub revenue: u32,
    pub orders: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductShare {
    pub name: &'static str,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Low,
    Medium,
    InStock,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryStatus {
    pub name: &'static str,
    /// Remaining stock in percent of capacity.
    pub level: u32,
    pub status: StockLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct Highlights {
    pub orders_completed: u32,
    pub pending_payments: u32,
    pub revenue_today: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub stats: Vec<HeadlineStat>,
    pub monthly_sales: Vec<MonthlySales>,
    pub product_share: Vec<ProductShare>,
    pub inventory: Vec<InventoryStatus>,
    pub highlights: Highlights,
}

pub fn dashboard() -> Dashboard {
    Dashboard {
        stats: vec![
            HeadlineStat { title: "Total Revenue", value: 328_000, change: 12.5 },
            HeadlineStat { title: "Total Orders", value: 1_320, change: 8.2 },
            HeadlineStat { title: "Products Sold", value: 4_567, change: -2.1 },
            HeadlineStat { title: "Customers", value: 892, change: 5.7 },
        ],
        monthly_sales: [
            ("Jan", 45_000, 120),
            ("Feb", 52_000, 145),
            ("Mar", 48_000, 132),
            ("Apr", 61_000, 178),
            ("May", 55_000, 156),
            ("Jun", 67_000, 189),
        ]
        .into_iter()
        .map(|(month, revenue, orders)| MonthlySales { month, revenue, orders })
        .collect(),
        product_share: [
            ("Rice (1kg)", 30),
            ("Dal (500g)", 25),
            ("Oil (1L)", 20),
            ("Spices", 15),
            ("Others", 10),
        ]
        .into_iter()
        .map(|(name, value)| ProductShare { name, value })
        .collect(),
        inventory: vec![
            InventoryStatus { name: "Rice (1kg)", level: 15, status: StockLevel::Low },
            InventoryStatus { name: "Dal (500g)", level: 75, status: StockLevel::InStock },
            InventoryStatus { name: "Oil (1L)", level: 45, status: StockLevel::Medium },
        ],
        highlights: Highlights {
            orders_completed: 45,
            pending_payments: 3,
            revenue_today: 12_500,
        },
    }
}
