//! # Stdin Commands
//!
//! One JSON object per line. The `cmd` field picks the command:
//!
//! ```text
//! {"cmd":"open","table":2}
//! {"cmd":"pointer","event":{"kind":"drag_start","item":11,"at":{"x":100,"y":60}}}
//! {"cmd":"pointer","event":{"kind":"drop","at":{"x":500,"y":90}}}
//! {"cmd":"touch","event":{"kind":"start","item":11,"at":{"x":100,"y":60}}}
//! {"cmd":"quantity","table":2,"item":11,"delta":-1}
//! {"cmd":"filter","category":"rice","term":"biryani"}
//! {"cmd":"search","term":"lassi"}
//! {"cmd":"bill"}
//! ```

use chrono::{DateTime, Local};
use serde::Deserialize;
use tablepos_core::drag::{PointerInput, TouchInput};
use tablepos_core::{Intent, ItemId, TableId};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    Pointer {
        event: PointerInput,
    },
    Touch {
        event: TouchInput,
    },
    /// The window lost focus mid-gesture.
    Interrupt,
    Open {
        table: TableId,
    },
    Close,
    Quantity {
        table: TableId,
        item: ItemId,
        delta: i32,
    },
    Remove {
        table: TableId,
        item: ItemId,
    },
    Clear,
    End,
    Bill,
    Filter {
        #[serde(default = "all_categories")]
        category: String,
        #[serde(default)]
        term: String,
    },
    Search {
        #[serde(default)]
        term: String,
    },
}

fn all_categories() -> String {
    "all".to_string()
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> serde_json::Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(line).map(Some)
    }

    /// `now` stamps generated bills.
    pub fn into_intent(self, now: DateTime<Local>) -> Intent {
        match self {
            Command::Pointer { event } => Intent::Pointer(event),
            Command::Touch { event } => Intent::Touch(event),
            Command::Interrupt => Intent::InterruptGesture,
            Command::Open { table } => Intent::OpenTable(table),
            Command::Close => Intent::CloseTable,
            Command::Quantity { table, item, delta } => {
                Intent::ChangeQuantity { table, item, delta }
            }
            Command::Remove { table, item } => Intent::RemoveLine { table, item },
            Command::Clear => Intent::ClearOrder,
            Command::End => Intent::EndSession,
            Command::Bill => Intent::GenerateBill { at: now },
            Command::Filter { category, term } => Intent::FilterMenu { category, term },
            Command::Search { term } => Intent::SearchTables { term },
        }
    }
}
