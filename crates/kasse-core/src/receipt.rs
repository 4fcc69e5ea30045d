//! # Receipt Rendering
//!
//! Turns orders into the text printed on kitchen tickets and customer
//! receipts. Pure string building; sending the text anywhere is the
//! dispatcher's job.
//!
//! ## Two Layouts
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │ KITCHEN        Order #12     │   │ Restaurante Gaumenfreude     │
//! │ Table: Terrace 2             │   │ Gourmetstraße 11             │
//! │ ──────────────────────────── │   │ +49 541 466 655              │
//! │ 2x Schnitzel                 │   │                              │
//! │ 1x Salad                     │   │ Your order:                  │
//! │ ──────────────────────────── │   │ 2x Schnitzel      12.50 EUR  │
//! │ 01.05.2024 19:30:00          │   │ ──────────────────────────── │
//! └──────────────────────────────┘   │ Total             25.00 EUR  │
//!   items only, no prices            │ incl. VAT 19.9%    4.98 EUR  │
//!                                    │ Table: Terrace 2             │
//!                                    └──────────────────────────────┘
//! ```
//!
//! The tax line is `total × rate`, rounded half up to cents. The rate
//! defaults to 19.9%.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::multiset::ItemMultiset;
use crate::types::{DeltaOrder, Item, ItemId, Order, OrderId, Table, TableId, TaxRate};

/// Date format printed at the bottom of every ticket.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// The two printed representations of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptKind {
    /// Item list for the kitchen, no prices.
    Kitchen,
    /// Priced receipt for the guest.
    Customer,
}

// =============================================================================
// Configuration Values
// =============================================================================

/// Business details printed in the customer receipt header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantInfo {
    pub name: String,
    pub address_lines: Vec<String>,
    pub phone: String,
    /// Currency label appended to amounts.
    pub currency: String,
}

impl Default for RestaurantInfo {
    fn default() -> Self {
        RestaurantInfo {
            name: "Restaurante Gaumenfreude".to_string(),
            address_lines: vec![
                "Gourmetstraße 11".to_string(),
                "12345 Leckerschmeckerhausen".to_string(),
            ],
            phone: "+49 541 466 655".to_string(),
            currency: "EUR".to_string(),
        }
    }
}

/// Everything the renderer needs besides the order itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptSettings {
    pub restaurant: RestaurantInfo,
    pub tax_rate: TaxRate,
    pub tax_label: String,
    /// Paper width in characters.
    pub width: usize,
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        ReceiptSettings {
            restaurant: RestaurantInfo::default(),
            tax_rate: TaxRate::RECEIPT_DEFAULT,
            tax_label: "incl. VAT".to_string(),
            width: 42,
        }
    }
}

// =============================================================================
// Printable Order
// =============================================================================

/// The order-shaped view both layouts are rendered from.
///
/// Built from a full [`Order`] or from a [`DeltaOrder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintableOrder {
    pub id: OrderId,
    pub items: ItemMultiset,
    pub table_id: Option<TableId>,
    pub price: Money,
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<&Order> for PrintableOrder {
    fn from(order: &Order) -> Self {
        PrintableOrder {
            id: order.id,
            items: order.items.clone().unwrap_or_default(),
            table_id: order.table_id,
            price: order.price,
            timestamp: order.timestamp,
        }
    }
}

impl From<&DeltaOrder> for PrintableOrder {
    fn from(delta: &DeltaOrder) -> Self {
        PrintableOrder {
            id: delta.id,
            items: delta.items.clone(),
            table_id: delta.table_id,
            price: delta.price,
            timestamp: delta.timestamp,
        }
    }
}

// =============================================================================
// Renderers
// =============================================================================

/// Renders either layout.
pub fn render(
    kind: ReceiptKind,
    order: &PrintableOrder,
    items: &[Item],
    tables: &[Table],
    settings: &ReceiptSettings,
) -> String {
    match kind {
        ReceiptKind::Kitchen => render_kitchen_ticket(order, items, tables, settings.width),
        ReceiptKind::Customer => render_customer_receipt(order, items, tables, settings),
    }
}

/// Kitchen ticket: order number, table and item counts. No prices.
pub fn render_kitchen_ticket(
    order: &PrintableOrder,
    items: &[Item],
    tables: &[Table],
    width: usize,
) -> String {
    let mut out = String::new();
    push_line(&mut out, &spread("KITCHEN", &format!("Order #{}", order.id), width));
    push_line(&mut out, &format!("Table: {}", table_name(order.table_id, tables)));
    push_line(&mut out, &"-".repeat(width));

    for (id, count) in order.items.iter() {
        push_line(&mut out, &format!("{}x {}", count, item_name(id, items)));
    }

    push_line(&mut out, &"-".repeat(width));
    if let Some(ts) = order.timestamp {
        push_line(&mut out, &ts.format(TIMESTAMP_FORMAT).to_string());
    }
    out
}

/// Customer receipt: header, priced lines, stored total and tax.
pub fn render_customer_receipt(
    order: &PrintableOrder,
    items: &[Item],
    tables: &[Table],
    settings: &ReceiptSettings,
) -> String {
    let info = &settings.restaurant;
    let width = settings.width;
    let amount = |m: Money| format!("{} {}", m, info.currency);

    let mut out = String::new();
    push_line(&mut out, &info.name);
    for line in &info.address_lines {
        push_line(&mut out, line);
    }
    push_line(&mut out, &info.phone);
    push_line(&mut out, "");
    push_line(&mut out, "Your order:");

    for (id, count) in order.items.iter() {
        let label = format!("{}x {}", count, item_name(id, items));
        let price = unit_price(id, items).map_or_else(|| "-".to_string(), amount);
        push_line(&mut out, &spread(&label, &price, width));
    }

    // The stored total is printed as-is; it is not re-derived from items.
    let tax = order.price.calculate_tax(settings.tax_rate);
    let tax_label = format!("{} {}%", settings.tax_label, settings.tax_rate.percentage());

    push_line(&mut out, &"_".repeat(width));
    push_line(&mut out, &spread("Total", &amount(order.price), width));
    push_line(&mut out, &spread(&tax_label, &amount(tax), width));
    push_line(&mut out, "");
    push_line(&mut out, &format!("Table: {}", table_name(order.table_id, tables)));
    push_line(&mut out, "Thank you for your visit!");
    if let Some(ts) = order.timestamp {
        push_line(&mut out, &ts.format(TIMESTAMP_FORMAT).to_string());
    }
    out
}

// =============================================================================
// Helpers
// =============================================================================

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Left text and right text separated by enough spaces to fill `width`.
fn spread(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = width.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

// Historical orders may point at rows edited since; fall back to the ID.
fn item_name(id: ItemId, items: &[Item]) -> String {
    items
        .iter()
        .find(|i| i.id == id)
        .map_or_else(|| format!("#{}", id), |i| i.name.clone())
}

fn unit_price(id: ItemId, items: &[Item]) -> Option<Money> {
    items.iter().find(|i| i.id == id).map(|i| i.retail_price)
}

fn table_name(id: Option<TableId>, tables: &[Table]) -> String {
    match id {
        Some(id) => tables
            .iter()
            .find(|t| t.id == id)
            .map_or_else(|| format!("#{}", id), |t| t.name.clone()),
        None => "-".to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::delta_order;
    use chrono::TimeZone;

    fn menu() -> Vec<Item> {
        let mut schnitzel = Item::new("Schnitzel", Money::from_cents(1250));
        schnitzel.id = 1;
        let mut salad = Item::new("Salad", Money::from_cents(550));
        salad.id = 2;
        vec![schnitzel, salad]
    }

    fn tables() -> Vec<Table> {
        let mut t = Table::new("Terrace 2");
        t.id = 4;
        vec![t]
    }

    fn order(ids: &[i64], cents: i64) -> Order {
        let mut o = Order::draft(ItemMultiset::from_ids(ids.to_vec()), 4, Money::from_cents(cents));
        o.id = 12;
        o.timestamp = Some(Utc.with_ymd_and_hms(2024, 5, 1, 19, 30, 0).unwrap());
        o
    }

    #[test]
    fn test_kitchen_ticket_has_no_prices() {
        let text = render_kitchen_ticket(&(&order(&[1, 1, 2], 3050)).into(), &menu(), &tables(), 32);

        assert!(text.starts_with("KITCHEN"));
        assert!(text.contains("Order #12"));
        assert!(text.contains("Table: Terrace 2"));
        assert!(text.contains("2x Schnitzel\n"));
        assert!(text.contains("1x Salad\n"));
        assert!(text.contains("01.05.2024 19:30:00"));
        assert!(!text.contains("12.50"));
        assert!(!text.contains("EUR"));
    }

    #[test]
    fn test_customer_receipt_lines() {
        let settings = ReceiptSettings::default();
        let text = render_customer_receipt(&(&order(&[1, 1, 2], 3050)).into(), &menu(), &tables(), &settings);

        assert!(text.starts_with("Restaurante Gaumenfreude\n"));
        assert!(text.contains("Gourmetstraße 11"));
        assert!(text.contains("+49 541 466 655"));
        assert!(text.contains("2x Schnitzel"));
        assert!(text.contains("12.50 EUR"));
        assert!(text.contains("5.50 EUR"));
        assert!(text.contains("30.50 EUR"));
        // 30.50 × 0.199 = 6.0695 → 6.07
        assert!(text.contains("incl. VAT 19.9%"));
        assert!(text.contains("6.07 EUR"));
        assert!(text.contains("Table: Terrace 2"));
        assert!(text.contains("01.05.2024 19:30:00"));
    }

    #[test]
    fn test_customer_receipt_uses_stored_total() {
        // Stored price disagrees with item prices on purpose
        let text = render_customer_receipt(
            &(&order(&[1], 999)).into(),
            &menu(),
            &tables(),
            &ReceiptSettings::default(),
        );
        assert!(text.contains("9.99 EUR"));
    }

    #[test]
    fn test_lines_are_padded_to_width() {
        let settings = ReceiptSettings {
            width: 30,
            ..ReceiptSettings::default()
        };
        let text = render_customer_receipt(&(&order(&[2], 550)).into(), &menu(), &tables(), &settings);
        let total = text.lines().find(|l| l.starts_with("Total")).unwrap();
        assert_eq!(total.chars().count(), 30);
        assert!(total.ends_with("5.50 EUR"));
    }

    #[test]
    fn test_unknown_item_and_table_fall_back_to_id() {
        let mut o = order(&[77], 100);
        o.table_id = Some(9);
        let text = render_kitchen_ticket(&(&o).into(), &menu(), &tables(), 32);
        assert!(text.contains("1x #77"));
        assert!(text.contains("Table: #9"));
    }

    #[test]
    fn test_delta_prints_only_added_items() {
        let old = order(&[1], 1250);
        let new = order(&[1, 2, 2], 2350);
        let delta = delta_order(&old, &new).unwrap();

        let text = render(
            ReceiptKind::Kitchen,
            &(&delta).into(),
            &menu(),
            &tables(),
            &ReceiptSettings::default(),
        );
        assert!(text.contains("2x Salad"));
        assert!(!text.contains("Schnitzel"));
    }
}
