//! # Effects
//!
//! Side effects the core asks the host shell to perform.
//!
//! The core never touches storage, the screen or timers. Every state
//! transition returns the effects it needs, in order, and the host runs
//! them:
//!
//! ```text
//! Intent ──► PosEngine::handle ──► [Save, Render, Notify(..)] ──► host
//!                                          │      │       │
//!                                  PersistenceAdapter  │  toast
//!                                                 PresentationLayer
//! ```

use crate::bill::Bill;
use crate::drag::DragEffect;
use crate::types::Severity;

/// One side effect for the host to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Persist the current order map.
    Save,
    /// State changed; re-render the views.
    Render,
    /// Show a toast.
    Notify { message: String, severity: Severity },
    /// Open the print view for a bill.
    PrintBill(Bill),
    /// Drag visuals, timers and gesture signals.
    Drag(DragEffect),
}

impl Effect {
    pub fn notify(message: impl Into<String>, severity: Severity) -> Self {
        Effect::Notify {
            message: message.into(),
            severity,
        }
    }
}

/// The effect pair for a committed order mutation: save first, then render.
pub fn committed() -> Vec<Effect> {
    vec![Effect::Save, Effect::Render]
}
