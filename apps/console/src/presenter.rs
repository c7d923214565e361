//! # Text Presentation
//!
//! Renders engine state as plain text for stdout.
//!
//! ```text
//! ══════════════════ Spice Route ══════════════════
//! MENU [all] search: ""
//!   [ 1] 🥟 Veg Samosa                     ₹60.00
//!   ...
//! TABLES search: ""
//!   Table 1 (2 seats)   available
//!   Table 2 (4 seats) ● 2 items            ₹735.00
//! ── Table 2 ───────────────────────────────────────
//!   Hyderabadi Biryani   2 × ₹350.00       ₹700.00
//!   Subtotal                               ₹700.00
//!   GST 5%                                  ₹35.00
//!   Total                                  ₹735.00
//! ```

use std::fmt::Write;

use chrono::{DateTime, Local};
use tablepos_core::bill::{line_total, Bill, Totals};
use tablepos_core::money::TAX_RATE;
use tablepos_core::{PosEngine, Severity, TableId};

use crate::config::ConsoleConfig;

const WIDTH: usize = 48;

/// Left text and right-aligned amount on one line of [`WIDTH`].
fn row(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = WIDTH.saturating_sub(used).max(1);
    format!("{left}{}{right}", " ".repeat(gap))
}

fn rule(title: &str, fill: char) -> String {
    let title = if title.is_empty() {
        String::new()
    } else {
        format!(" {title} ")
    };
    let side = WIDTH.saturating_sub(title.chars().count()) / 2;
    let mut line = fill.to_string().repeat(side);
    line.push_str(&title);
    while line.chars().count() < WIDTH {
        line.push(fill);
    }
    line
}

fn tax_label() -> String {
    format!("GST {}%", TAX_RATE.percentage())
}

fn push_totals(out: &mut String, totals: &Totals, config: &ConsoleConfig) {
    let _ = writeln!(out, "{}", row("  Subtotal", &config.format_currency(totals.subtotal)));
    let _ = writeln!(out, "{}", row(&format!("  {}", tax_label()), &config.format_currency(totals.tax)));
    let _ = writeln!(out, "{}", row("  Total", &config.format_currency(totals.grand_total)));
}

/// The full screen: menu, tables and the open table's order.
pub fn render_floor(engine: &PosEngine, config: &ConsoleConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule(&config.restaurant.name, '═'));

    let filter = engine.menu_filter();
    let _ = writeln!(
        out,
        "MENU [{}] search: {:?}",
        filter.category.as_deref().unwrap_or("all"),
        filter.term
    );
    let menu = engine.visible_menu();
    if menu.is_empty() {
        let _ = writeln!(out, "  (no matching items)");
    }
    for item in menu {
        let left = format!("  [{:>2}] {} {}", item.id, item.icon, item.name);
        let _ = writeln!(out, "{}", row(&left, &config.format_currency(item.price)));
    }

    let _ = writeln!(out, "TABLES search: {:?}", engine.table_search());
    let cards = engine.visible_tables();
    if cards.is_empty() {
        let _ = writeln!(out, "  (no matching tables)");
    }
    for card in cards {
        let name = format!("  {} ({} seats)", card.table.name, card.table.capacity);
        if card.has_orders {
            let left = format!("{name} ● {} items", card.item_count);
            let _ = writeln!(
                out,
                "{}",
                row(&left, &config.format_currency(card.totals.grand_total))
            );
        } else {
            let _ = writeln!(out, "{name}   available");
        }
    }

    if let Some(id) = engine.orders().current_table() {
        render_order(&mut out, engine, id, config);
    }

    out
}

fn render_order(out: &mut String, engine: &PosEngine, id: TableId, config: &ConsoleConfig) {
    let name = engine
        .tables()
        .find_by_id(id)
        .map(|t| t.name.as_str())
        .unwrap_or("?");
    let _ = writeln!(out, "{}", rule(name, '─'));

    let lines = engine.orders().lines(id);
    if lines.is_empty() {
        let _ = writeln!(out, "  No items ordered yet");
        return;
    }
    for line in lines {
        let left = format!(
            "  {}   {} × {}",
            line.name,
            line.quantity,
            config.format_currency(line.price)
        );
        let _ = writeln!(out, "{}", row(&left, &config.format_currency(line_total(line))));
    }
    push_totals(out, &engine.totals(id), config);
}

/// A fixed-width receipt.
pub fn render_bill(bill: &Bill, config: &ConsoleConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule("", '='));
    let _ = writeln!(out, "{}", centered(&config.restaurant.name));
    for line in &config.restaurant.address_lines {
        let _ = writeln!(out, "{}", centered(line));
    }
    let _ = writeln!(out, "{}", rule("", '-'));
    let _ = writeln!(
        out,
        "{}",
        row(
            &format!("Table: {}", bill.table_name),
            &bill.generated_at.format("%d/%m/%Y %H:%M").to_string()
        )
    );
    let _ = writeln!(out, "{}", rule("", '-'));

    for line in &bill.lines {
        let _ = writeln!(out, "{}", line.name);
        let left = format!("  {} × {}", line.quantity, config.format_currency(line.price));
        let _ = writeln!(out, "{}", row(&left, &config.format_currency(line_total(line))));
    }

    let _ = writeln!(out, "{}", rule("", '-'));
    let _ = writeln!(out, "{}", row("Items", &bill.item_count().to_string()));
    push_totals(&mut out, &bill.totals, config);
    let _ = writeln!(out, "{}", rule("", '='));
    let _ = writeln!(out, "{}", centered("Thank you! Visit again"));
    out
}

fn centered(text: &str) -> String {
    let pad = WIDTH.saturating_sub(text.chars().count()) / 2;
    format!("{}{text}", " ".repeat(pad))
}

pub fn render_toast(message: &str, severity: Severity) -> String {
    let marker = match severity {
        Severity::Success => "✔",
        Severity::Info => "ℹ",
        Severity::Warning => "⚠",
        Severity::Error => "✖",
    };
    format!("{marker} {message}\n")
}

pub fn render_clock(now: DateTime<Local>) -> String {
    format!("🕒 {}\n", now.format("%a %d %b %Y %H:%M:%S"))
}
