//! # Bill Calculator
//!
//! Pure bill math plus the printable [`Bill`] snapshot.
//!
//! ```text
//! line_total  = price × quantity
//! subtotal    = Σ line_total
//! tax         = subtotal × 5%
//! grand_total = subtotal + tax
//! ```
//!
//! Nothing here rounds. Rounding to 2 places happens in `Money`'s
//! `Display`, i.e. when the bill is printed.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, TAX_RATE};
use crate::types::{OrderLine, Table, TableId};

pub fn line_total(line: &OrderLine) -> Money {
    line.price.multiply_quantity(line.quantity)
}

pub fn subtotal(lines: &[OrderLine]) -> Money {
    lines.iter().map(line_total).sum()
}

pub fn tax(subtotal: Money) -> Money {
    subtotal.calculate_tax(TAX_RATE)
}

pub fn grand_total(subtotal: Money, tax: Money) -> Money {
    subtotal + tax
}

/// Subtotal, tax and grand total for one table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub grand_total: Money,
}

impl Totals {
    pub fn of(lines: &[OrderLine]) -> Self {
        let subtotal = subtotal(lines);
        let tax = tax(subtotal);
        Totals {
            subtotal,
            tax,
            grand_total: grand_total(subtotal, tax),
        }
    }
}

/// A printable bill for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Bill {
    pub table_id: TableId,
    pub table_name: String,
    pub lines: Vec<OrderLine>,
    pub totals: Totals,
    #[ts(as = "String")]
    pub generated_at: DateTime<Local>,
}

impl Bill {
    /// Snapshots a table's order into a bill.
    ///
    /// Fails with [`CoreError::EmptyOrder`] when there is nothing to bill.
    pub fn for_table(
        table: &Table,
        lines: &[OrderLine],
        generated_at: DateTime<Local>,
    ) -> CoreResult<Self> {
        if lines.is_empty() {
            return Err(CoreError::EmptyOrder {
                table: table.name.clone(),
            });
        }

        Ok(Bill {
            table_id: table.id,
            table_name: table.name.clone(),
            lines: lines.to_vec(),
            totals: Totals::of(lines),
            generated_at,
        })
    }

    /// Total number of items (sum of quantities).
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}
