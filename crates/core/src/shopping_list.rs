//! Shopping-list aggregation and plain-text rendering.
//!
//! Cart rows arrive one per (recipe, ingredient) association. They are
//! summed per (ingredient name, measurement unit) and rendered as:
//!
//! ```text
//! Shopping list:
//! flour (g) - 500
//! sugar (g) - 50
//! ```

use std::collections::BTreeMap;

/// First line of every rendered shopping list.
pub const SHOPPING_LIST_HEADER: &str = "Shopping list:";

/// File name offered in the download's `Content-Disposition`.
pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// One ingredient quantity, either a raw cart row or an aggregated line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

impl ShoppingItem {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}

/// Sum amounts per (name, unit), ordered by name then unit.
pub fn aggregate(items: impl IntoIterator<Item = ShoppingItem>) -> Vec<ShoppingItem> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for item in items {
        *totals.entry((item.name, item.measurement_unit)).or_insert(0) += item.amount;
    }
    totals
        .into_iter()
        .map(|((name, measurement_unit), amount)| ShoppingItem {
            name,
            measurement_unit,
            amount,
        })
        .collect()
}

/// Render aggregated lines under the header, one `\n`-terminated line each.
pub fn render(lines: &[ShoppingItem]) -> String {
    let mut out = String::from(SHOPPING_LIST_HEADER);
    out.push('\n');
    for line in lines {
        out.push_str(&format!(
            "{} ({}) - {}\n",
            line.name, line.measurement_unit, line.amount
        ));
    }
    out
}

/// Aggregate then render in one step.
pub fn build_shopping_list(items: impl IntoIterator<Item = ShoppingItem>) -> String {
    render(&aggregate(items))
}
