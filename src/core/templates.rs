//! Reply text templates.
//!
//! The narrative part of every canned reply is a minijinja template rendered
//! against the mock business data, so figures in the text and in the attached
//! chart or table come from the same place.

use log::error;
use minijinja::{Environment, Value};
use std::sync::LazyLock;

/// Returned when a template fails to render. Keeps replies non-empty.
pub const FALLBACK_TEXT: &str = "I can help you with sales analysis, revenue forecasting, marketing strategy, inventory management and customer insights. What would you like to explore?";

pub const TOP_PRODUCTS: &str = "top_products";
pub const FORECAST: &str = "forecast";
pub const CAMPAIGN: &str = "campaign";
pub const SLOW_INVENTORY: &str = "slow_inventory";
pub const HELP: &str = "help";

const TEMPLATES: [(&str, &str); 5] = [
    (
        TOP_PRODUCTS,
        r#"Based on your sales data, here are your top-performing products this month:

{% for p in products %}
{{ loop.index }}. **{{ p.display }}** - {{ p.units }} units sold, ₹{{ p.revenue|inr }} revenue
{% endfor %}

**Insights:** {{ leader }} shows consistent demand with {{ growth }}% growth. Consider bundling rice with dal for cross-selling opportunities."#,
    ),
    (
        FORECAST,
        r#"📈 **Revenue Forecast for Next {{ weeks|length }} Weeks:**

{% for w in weeks %}
• **{{ w.label }}:** ₹{{ w.predicted|inr }} ({{ w.note }})
{% endfor %}

**Key Factors:**
- Festival season approaching (positive impact)
- Historical data shows 12% growth in similar periods
- Weather patterns favor grocery purchases

**Recommendation:** Stock up on rice, oil, and spices for the predicted demand surge."#,
    ),
    (
        CAMPAIGN,
        r#"🪔 **Diwali Campaign Strategy:**

**Discount Offers:**
• Bundle Deal: Rice + Dal + Oil = 15% off
• Buy 3kg Rice, Get 500g Dal FREE
• Festival Spice Kit - Special price ₹{{ spice_kit_price }}

**Marketing Messages:**
{% for s in slogans %}
• "{{ s[0] }}"{{ " (" ~ s[1] ~ ")" if s[1] }}
{% endfor %}

**Timing:** Start campaign 2 weeks before Diwali
**Expected Impact:** 35-40% revenue boost based on last year's data

**Would you like me to create promotional posters for these offers?**"#,
    ),
    (
        SLOW_INVENTORY,
        r#"📦 **Slow-Moving Inventory Analysis:**

**Items needing attention:**
{% for item in items %}
• {{ item[0] }} - {{ item[2] }}{{ item[1] }} {{ item[3] }}
{% endfor %}

**Recommendations:**
1. **Bundle Strategy:** Pair honey with regular products
2. **Price Adjustment:** 10-15% discount on premium rice
3. **Cross-sell:** Promote almonds during festival season
4. **Customer Education:** Highlight health benefits

**Action Plan:** Create "Health & Wellness" combo packs"#,
    ),
    (
        HELP,
        r#"I understand you're asking about your business. Here are some things I can help you with:

{% for t in topics %}
• **{{ t[0] }}** - "{{ t[1] }}"
{% endfor %}

What specific aspect of your business would you like to explore?"#,
    ),
];

static ENVIRONMENT: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("inr", inr);

    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            error!("failed to compile reply template `{name}`: {e}");
        }
    }

    env
});

/// Renders a reply template. Never fails: broken templates degrade to [`FALLBACK_TEXT`].
pub fn render(name: &str, ctx: Value) -> String {
    ENVIRONMENT
        .get_template(name)
        .and_then(|template| template.render(ctx))
        .unwrap_or_else(|e| {
            error!("failed to render reply template `{name}`: {e}");
            FALLBACK_TEXT.to_owned()
        })
}

/// Formats a rupee amount with Indian digit grouping, e.g. `328000` as `3,28,000`.
pub fn inr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let sign = if amount < 0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("{sign}{},{tail}", groups.join(","))
}
