//! # Drag Controller
//!
//! One gesture state machine for both mouse drag-and-drop and touch.
//!
//! ## Input Adapters
//! Mouse and touch deliver very different raw events. Each adapter maps
//! its platform events onto the same four-word vocabulary before the
//! state machine sees them:
//!
//! ```text
//!  PointerInput            TouchInput             GestureEvent
//!  ────────────            ──────────             ────────────
//!  DragStart{item,at} ─┐   Start{item,at} ─┐
//!                      ├───────────────────┴────► Press{item,at,source}
//!  DragOver{at} ───────┤   Move{at} ──────────►   Move{at}
//!  Drop{at} ───────────┤   End{at} ───────────►   Release{at}
//!  DragEnd ────────────┘   Cancel ────────────►   Cancel
//! ```
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │          Press(touch)            hold timer fires                       │
//! │   Idle ─────────────────► Armed ─────────────────► Dragging             │
//! │    ▲  │                     │                        │  │               │
//! │    │  │ Press(pointer)      │ moved > jitter,        │  │ Release over  │
//! │    │  └─────────────────────┼────────────────────────┘  │ a table       │
//! │    │                        │ released, cancelled       ▼               │
//! │    │◄───────────────────────┘             Dropped ──► drop(item,table)  │
//! │    │                                         │                          │
//! │    │◄────────────────────────────────────────┘                          │
//! │    │                                      Cancelled (no table / Cancel) │
//! │    │◄──────────────────────────────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every path back to `Idle` hides the ghost, clears the highlight and
//! stops the hold timer and auto-scroll it started.
//!
//! A gesture belongs to the adapter that pressed it. Events from the other
//! adapter are dropped until it ends.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::types::{ItemId, TableId};

// =============================================================================
// Geometry & Layout
// =============================================================================

/// A position in viewport coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Vertical extent of the scrollable list under the drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub top: f64,
    pub bottom: f64,
}

impl Viewport {
    /// Which way to auto-scroll for a pointer at `y`, if it sits inside
    /// the top or bottom edge band.
    pub fn edge_direction(&self, y: f64, band: f64) -> Option<ScrollDirection> {
        if y < self.top || y > self.bottom {
            return None;
        }
        if y < self.top + band {
            Some(ScrollDirection::Up)
        } else if y > self.bottom - band {
            Some(ScrollDirection::Down)
        } else {
            None
        }
    }
}

/// Host-side knowledge of where the tables are drawn.
pub trait HitTest {
    /// The table drawn under `at`, if any.
    fn table_at(&self, at: Point) -> Option<TableId>;

    /// The scrollable table list, or `None` when there is none (the
    /// auto-scroll feature is then inert).
    fn scroll_viewport(&self) -> Option<Viewport> {
        None
    }
}

/// A layout with no drop zones. Drags over it always cancel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTargets;

impl HitTest for NoTargets {
    fn table_at(&self, _at: Point) -> Option<TableId> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Up,
    Down,
}

// =============================================================================
// Configuration
// =============================================================================

/// Gesture tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// How long a touch must rest before it picks the item up.
    pub hold_delay_ms: u64,
    /// Movement allowed during the hold before it counts as a scroll.
    pub jitter_px: f64,
    /// Height of the auto-scroll zone at the list's top and bottom.
    pub edge_band_px: f64,
    /// Distance scrolled per auto-scroll tick.
    pub scroll_step_px: f64,
    /// Time between auto-scroll ticks.
    pub scroll_interval_ms: u64,
}

impl Default for DragConfig {
    fn default() -> Self {
        DragConfig {
            hold_delay_ms: 400,
            jitter_px: 10.0,
            edge_band_px: 60.0,
            scroll_step_px: 12.0,
            scroll_interval_ms: 16,
        }
    }
}

// =============================================================================
// Input Vocabulary
// =============================================================================

/// Raw mouse drag-and-drop events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerInput {
    DragStart { item: ItemId, at: Point },
    DragOver { at: Point },
    Drop { at: Point },
    /// Fired when the drag ends, whether or not it dropped.
    DragEnd,
}

/// Raw touch events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TouchInput {
    Start { item: ItemId, at: Point },
    Move { at: Point },
    End { at: Point },
    Cancel,
}

/// Which adapter a gesture came in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    Pointer,
    Touch,
}

/// The unified event vocabulary both adapters translate into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Press {
        item: ItemId,
        at: Point,
        source: InputSource,
    },
    Move {
        at: Point,
    },
    Release {
        at: Point,
    },
    Cancel,
}

impl From<PointerInput> for GestureEvent {
    fn from(input: PointerInput) -> Self {
        match input {
            PointerInput::DragStart { item, at } => GestureEvent::Press {
                item,
                at,
                source: InputSource::Pointer,
            },
            PointerInput::DragOver { at } => GestureEvent::Move { at },
            PointerInput::Drop { at } => GestureEvent::Release { at },
            PointerInput::DragEnd => GestureEvent::Cancel,
        }
    }
}

impl From<TouchInput> for GestureEvent {
    fn from(input: TouchInput) -> Self {
        match input {
            TouchInput::Start { item, at } => GestureEvent::Press {
                item,
                at,
                source: InputSource::Touch,
            },
            TouchInput::Move { at } => GestureEvent::Move { at },
            TouchInput::End { at } => GestureEvent::Release { at },
            TouchInput::Cancel => GestureEvent::Cancel,
        }
    }
}

// =============================================================================
// Output
// =============================================================================

/// What the controller asks of the host, and what it reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEffect {
    /// Call [`DragController::hold_elapsed`] with `generation` after the delay.
    StartHoldTimer { generation: u64, delay_ms: u64 },
    CancelHoldTimer,
    ShowGhost { item: ItemId, at: Point },
    MoveGhost { at: Point },
    HideGhost,
    /// The candidate target changed; highlight it (or nothing).
    OverTarget(Option<TableId>),
    StartAutoScroll(ScrollDirection),
    StopAutoScroll,
    /// A gesture became a drag.
    DragStarted { item: ItemId },
    /// The gesture ended over a table.
    Dropped { item: ItemId, table: TableId },
    /// The drag ended without a drop.
    Cancelled,
}

/// Coarse state, for observers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Armed,
    Dragging,
}

/// How the previous gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Dropped { item: ItemId, table: TableId },
    Cancelled,
    /// Released or moved away before the hold timer fired.
    Abandoned,
}

// =============================================================================
// State Machine
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Armed {
        item: ItemId,
        origin: Point,
        last: Point,
        generation: u64,
    },
    Dragging {
        item: ItemId,
        source: InputSource,
        /// Last known pointer position.
        at: Point,
        candidate: Option<TableId>,
        scroll: Option<ScrollDirection>,
    },
}

/// Turns pointer and touch input into drag-and-drop signals.
#[derive(Debug, Clone)]
pub struct DragController {
    config: DragConfig,
    gesture: Gesture,
    generation: u64,
    last_outcome: Option<GestureOutcome>,
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        DragController {
            config,
            gesture: Gesture::Idle,
            generation: 0,
            last_outcome: None,
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn phase(&self) -> DragPhase {
        match self.gesture {
            Gesture::Idle => DragPhase::Idle,
            Gesture::Armed { .. } => DragPhase::Armed,
            Gesture::Dragging { .. } => DragPhase::Dragging,
        }
    }

    /// The table currently highlighted as the drop candidate.
    pub fn candidate(&self) -> Option<TableId> {
        match self.gesture {
            Gesture::Dragging { candidate, .. } => candidate,
            _ => None,
        }
    }

    pub fn last_outcome(&self) -> Option<GestureOutcome> {
        self.last_outcome
    }

    /// The adapter that owns the active gesture.
    pub fn source(&self) -> Option<InputSource> {
        match self.gesture {
            Gesture::Idle => None,
            Gesture::Armed { .. } => Some(InputSource::Touch),
            Gesture::Dragging { source, .. } => Some(source),
        }
    }

    /// Mouse adapter.
    pub fn pointer(&mut self, input: PointerInput, layout: &dyn HitTest) -> Vec<DragEffect> {
        self.route(InputSource::Pointer, input.into(), layout)
    }

    /// Touch adapter.
    pub fn touch(&mut self, input: TouchInput, layout: &dyn HitTest) -> Vec<DragEffect> {
        self.route(InputSource::Touch, input.into(), layout)
    }

    fn route(
        &mut self,
        source: InputSource,
        event: GestureEvent,
        layout: &dyn HitTest,
    ) -> Vec<DragEffect> {
        match self.source() {
            Some(owner) if owner != source => {
                trace!(?source, ?owner, ?event, "Ignoring event from other input");
                Vec::new()
            }
            _ => self.handle(event, layout),
        }
    }

    /// Feeds one unified event through the state machine.
    pub fn handle(&mut self, event: GestureEvent, layout: &dyn HitTest) -> Vec<DragEffect> {
        trace!(?event, phase = ?self.phase(), "Gesture event");

        match (self.gesture, event) {
            (Gesture::Idle, GestureEvent::Press { item, at, source }) => {
                self.generation += 1;
                match source {
                    InputSource::Pointer => self.begin_drag(item, at, source),
                    InputSource::Touch => {
                        self.gesture = Gesture::Armed {
                            item,
                            origin: at,
                            last: at,
                            generation: self.generation,
                        };
                        debug!(item, generation = self.generation, "Touch armed");
                        vec![DragEffect::StartHoldTimer {
                            generation: self.generation,
                            delay_ms: self.config.hold_delay_ms,
                        }]
                    }
                }
            }
            (_, GestureEvent::Press { item, .. }) => {
                debug!(item, "Ignoring press while a gesture is active");
                Vec::new()
            }

            (Gesture::Armed { origin, item, generation, .. }, GestureEvent::Move { at }) => {
                if origin.distance_to(at) > self.config.jitter_px {
                    debug!(item, "Touch moved before hold; treating as scroll");
                    self.abandon()
                } else {
                    self.gesture = Gesture::Armed {
                        item,
                        origin,
                        last: at,
                        generation,
                    };
                    Vec::new()
                }
            }
            (Gesture::Armed { .. }, GestureEvent::Release { .. } | GestureEvent::Cancel) => {
                self.abandon()
            }

            (Gesture::Dragging { .. }, GestureEvent::Move { at }) => self.track(at, layout),
            (Gesture::Dragging { item, .. }, GestureEvent::Release { at }) => {
                match layout.table_at(at) {
                    Some(table) => self.finish(GestureOutcome::Dropped { item, table }),
                    None => self.finish(GestureOutcome::Cancelled),
                }
            }
            (Gesture::Dragging { .. }, GestureEvent::Cancel) => {
                self.finish(GestureOutcome::Cancelled)
            }

            (Gesture::Idle, _) => Vec::new(),
        }
    }

    /// The hold timer for `generation` fired. Stale timers are ignored.
    pub fn hold_elapsed(&mut self, generation: u64) -> Vec<DragEffect> {
        match self.gesture {
            Gesture::Armed {
                item,
                last,
                generation: armed,
                ..
            } if armed == generation => self.begin_drag(item, last, InputSource::Touch),
            _ => {
                trace!(generation, "Ignoring stale hold timer");
                Vec::new()
            }
        }
    }

    /// Interrupts any gesture in progress (window blur, modal opened).
    pub fn interrupt(&mut self) -> Vec<DragEffect> {
        self.handle(GestureEvent::Cancel, &NoTargets)
    }

    /// The layout moved under a resting pointer (scrolled or re-arranged).
    /// Re-checks the candidate at the last known position.
    pub fn relocate(&mut self, layout: &dyn HitTest) -> Vec<DragEffect> {
        let Gesture::Dragging { at, candidate, .. } = &mut self.gesture else {
            return Vec::new();
        };

        let next = layout.table_at(*at);
        if next == *candidate {
            return Vec::new();
        }
        trace!(?next, "Candidate moved under pointer");
        *candidate = next;
        vec![DragEffect::OverTarget(next)]
    }

    fn begin_drag(&mut self, item: ItemId, at: Point, source: InputSource) -> Vec<DragEffect> {
        self.gesture = Gesture::Dragging {
            item,
            source,
            at,
            candidate: None,
            scroll: None,
        };
        debug!(item, "Drag started");
        vec![
            DragEffect::DragStarted { item },
            DragEffect::ShowGhost { item, at },
        ]
    }

    fn track(&mut self, at: Point, layout: &dyn HitTest) -> Vec<DragEffect> {
        let Gesture::Dragging {
            item,
            source,
            candidate,
            scroll,
            ..
        } = self.gesture
        else {
            return Vec::new();
        };

        let mut effects = vec![DragEffect::MoveGhost { at }];

        let next_candidate = layout.table_at(at);
        if next_candidate != candidate {
            effects.push(DragEffect::OverTarget(next_candidate));
        }

        let next_scroll = layout
            .scroll_viewport()
            .and_then(|viewport| viewport.edge_direction(at.y, self.config.edge_band_px));
        if next_scroll != scroll {
            if scroll.is_some() {
                effects.push(DragEffect::StopAutoScroll);
            }
            if let Some(direction) = next_scroll {
                effects.push(DragEffect::StartAutoScroll(direction));
            }
        }

        self.gesture = Gesture::Dragging {
            item,
            source,
            at,
            candidate: next_candidate,
            scroll: next_scroll,
        };
        effects
    }

    /// Ends a drag: report the outcome once, then tear down visuals.
    fn finish(&mut self, outcome: GestureOutcome) -> Vec<DragEffect> {
        let Gesture::Dragging {
            candidate, scroll, ..
        } = self.gesture
        else {
            return Vec::new();
        };

        let mut effects = Vec::with_capacity(4);
        match outcome {
            GestureOutcome::Dropped { item, table } => {
                debug!(item, table, "Dropped");
                effects.push(DragEffect::Dropped { item, table });
            }
            _ => {
                debug!("Drag cancelled");
                effects.push(DragEffect::Cancelled);
            }
        }

        effects.push(DragEffect::HideGhost);
        if candidate.is_some() {
            effects.push(DragEffect::OverTarget(None));
        }
        if scroll.is_some() {
            effects.push(DragEffect::StopAutoScroll);
        }

        self.gesture = Gesture::Idle;
        self.last_outcome = Some(outcome);
        effects
    }

    /// Drops an armed touch without ever starting a drag.
    fn abandon(&mut self) -> Vec<DragEffect> {
        self.gesture = Gesture::Idle;
        self.last_outcome = Some(GestureOutcome::Abandoned);
        vec![DragEffect::CancelHoldTimer]
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tables 1..=4 drawn as 100px-tall rows starting at y=100, in a
    /// list whose visible area is y 100..500.
    struct Rows;

    impl HitTest for Rows {
        fn table_at(&self, at: Point) -> Option<TableId> {
            if at.x < 0.0 || at.x > 300.0 || at.y < 100.0 || at.y >= 500.0 {
                return None;
            }
            Some(((at.y - 100.0) / 100.0) as TableId + 1)
        }

        fn scroll_viewport(&self) -> Option<Viewport> {
            Some(Viewport {
                top: 100.0,
                bottom: 500.0,
            })
        }
    }

    /// Menu area lies to the right of the tables.
    const MENU: Point = Point::new(600.0, 300.0);

    fn drops(effects: &[DragEffect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, DragEffect::Dropped { .. }))
            .count()
    }

    #[test]
    fn test_pointer_drag_drops_on_table() {
        let mut drag = DragController::default();

        let start = drag.pointer(PointerInput::DragStart { item: 11, at: MENU }, &Rows);
        assert_eq!(drag.phase(), DragPhase::Dragging);
        assert_eq!(start[0], DragEffect::DragStarted { item: 11 });

        let over = drag.pointer(
            PointerInput::DragOver {
                at: Point::new(150.0, 250.0),
            },
            &Rows,
        );
        assert!(over.contains(&DragEffect::OverTarget(Some(2))));

        let done = drag.pointer(
            PointerInput::Drop {
                at: Point::new(150.0, 260.0),
            },
            &Rows,
        );
        assert_eq!(done[0], DragEffect::Dropped { item: 11, table: 2 });
        assert!(done.contains(&DragEffect::HideGhost));
        assert!(done.contains(&DragEffect::OverTarget(None)));
        assert_eq!(drag.phase(), DragPhase::Idle);

        // dragend follows drop in the browser; it must not emit anything.
        assert!(drag.pointer(PointerInput::DragEnd, &Rows).is_empty());
        assert_eq!(
            drag.last_outcome(),
            Some(GestureOutcome::Dropped { item: 11, table: 2 })
        );
    }

    #[test]
    fn test_highlight_changes_once_per_candidate() {
        let mut drag = DragController::default();
        drag.pointer(PointerInput::DragStart { item: 3, at: MENU }, &Rows);

        let mut highlights = Vec::new();
        for y in [210.0, 220.0, 230.0, 290.0, 310.0, 320.0, 700.0, 710.0] {
            for effect in drag.pointer(
                PointerInput::DragOver {
                    at: Point::new(150.0, y),
                },
                &Rows,
            ) {
                if let DragEffect::OverTarget(target) = effect {
                    highlights.push(target);
                }
            }
        }
        assert_eq!(highlights, vec![Some(2), Some(3), None]);
    }

    #[test]
    fn test_pointer_drag_end_without_target_cancels() {
        let mut drag = DragController::default();
        drag.pointer(PointerInput::DragStart { item: 3, at: MENU }, &Rows);
        let effects = drag.pointer(PointerInput::DragEnd, &Rows);

        assert_eq!(effects[0], DragEffect::Cancelled);
        assert!(effects.contains(&DragEffect::HideGhost));
        assert_eq!(drops(&effects), 0);
        assert_eq!(drag.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_touch_hold_then_drop() {
        let mut drag = DragController::default();

        let armed = drag.touch(TouchInput::Start { item: 11, at: MENU }, &Rows);
        assert_eq!(drag.phase(), DragPhase::Armed);
        let DragEffect::StartHoldTimer {
            generation,
            delay_ms,
        } = armed[0]
        else {
            panic!("expected hold timer, got {armed:?}");
        };
        assert_eq!(delay_ms, 400);

        // Small jitter is tolerated.
        drag.touch(
            TouchInput::Move {
                at: Point::new(MENU.x + 3.0, MENU.y + 2.0),
            },
            &Rows,
        );
        assert_eq!(drag.phase(), DragPhase::Armed);

        let started = drag.hold_elapsed(generation);
        assert_eq!(started[0], DragEffect::DragStarted { item: 11 });
        assert_eq!(drag.phase(), DragPhase::Dragging);

        drag.touch(
            TouchInput::Move {
                at: Point::new(100.0, 450.0),
            },
            &Rows,
        );
        let done = drag.touch(
            TouchInput::End {
                at: Point::new(100.0, 450.0),
            },
            &Rows,
        );
        assert_eq!(done[0], DragEffect::Dropped { item: 11, table: 4 });
        assert_eq!(drops(&done), 1);
    }

    #[test]
    fn test_touch_moving_early_is_a_scroll() {
        let mut drag = DragController::default();
        let armed = drag.touch(TouchInput::Start { item: 11, at: MENU }, &Rows);
        let DragEffect::StartHoldTimer { generation, .. } = armed[0] else {
            panic!("expected hold timer");
        };

        let moved = drag.touch(
            TouchInput::Move {
                at: Point::new(MENU.x, MENU.y + 40.0),
            },
            &Rows,
        );
        assert_eq!(moved, vec![DragEffect::CancelHoldTimer]);
        assert_eq!(drag.phase(), DragPhase::Idle);

        // The timer may still fire if the host raced it; nothing happens.
        assert!(drag.hold_elapsed(generation).is_empty());
        let released = drag.touch(
            TouchInput::End {
                at: Point::new(150.0, 250.0),
            },
            &Rows,
        );
        assert!(released.is_empty());
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert_eq!(drag.last_outcome(), Some(GestureOutcome::Abandoned));
    }

    #[test]
    fn test_touch_tap_is_not_a_drag() {
        let mut drag = DragController::default();
        drag.touch(TouchInput::Start { item: 5, at: MENU }, &Rows);
        let tap = drag.touch(TouchInput::End { at: MENU }, &Rows);
        assert_eq!(tap, vec![DragEffect::CancelHoldTimer]);
        assert_eq!(drag.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_touch_held_then_released_off_table_cancels() {
        let mut drag = DragController::default();
        let armed = drag.touch(TouchInput::Start { item: 11, at: MENU }, &Rows);
        let DragEffect::StartHoldTimer { generation, .. } = armed[0] else {
            panic!("expected hold timer");
        };
        drag.hold_elapsed(generation);

        let done = drag.touch(TouchInput::End { at: MENU }, &Rows);
        assert_eq!(done, vec![DragEffect::Cancelled, DragEffect::HideGhost]);
        assert_eq!(drag.last_outcome(), Some(GestureOutcome::Cancelled));
    }

    #[test]
    fn test_touch_cancel_cleans_up_everything() {
        let mut drag = DragController::default();
        let armed = drag.touch(TouchInput::Start { item: 11, at: MENU }, &Rows);
        let DragEffect::StartHoldTimer { generation, .. } = armed[0] else {
            panic!("expected hold timer");
        };
        drag.hold_elapsed(generation);
        // Over table 1 and inside the top scroll band.
        drag.touch(
            TouchInput::Move {
                at: Point::new(150.0, 120.0),
            },
            &Rows,
        );

        let done = drag.touch(TouchInput::Cancel, &Rows);
        assert_eq!(
            done,
            vec![
                DragEffect::Cancelled,
                DragEffect::HideGhost,
                DragEffect::OverTarget(None),
                DragEffect::StopAutoScroll,
            ]
        );
        assert_eq!(drag.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_auto_scroll_only_inside_edge_band() {
        let mut drag = DragController::default();
        drag.pointer(PointerInput::DragStart { item: 1, at: MENU }, &Rows);

        let mut scroll = Vec::new();
        for y in [300.0, 130.0, 120.0, 300.0, 480.0, 490.0, 520.0] {
            for effect in drag.pointer(
                PointerInput::DragOver {
                    at: Point::new(150.0, y),
                },
                &Rows,
            ) {
                if matches!(
                    effect,
                    DragEffect::StartAutoScroll(_) | DragEffect::StopAutoScroll
                ) {
                    scroll.push(effect);
                }
            }
        }
        assert_eq!(
            scroll,
            vec![
                DragEffect::StartAutoScroll(ScrollDirection::Up),
                DragEffect::StopAutoScroll,
                DragEffect::StartAutoScroll(ScrollDirection::Down),
                DragEffect::StopAutoScroll,
            ]
        );
    }

    #[test]
    fn test_no_viewport_means_no_auto_scroll() {
        let mut drag = DragController::default();
        drag.pointer(PointerInput::DragStart { item: 1, at: MENU }, &NoTargets);
        let effects = drag.pointer(
            PointerInput::DragOver {
                at: Point::new(0.0, 0.0),
            },
            &NoTargets,
        );
        assert_eq!(effects, vec![DragEffect::MoveGhost { at: Point::new(0.0, 0.0) }]);
    }

    #[test]
    fn test_second_press_is_ignored() {
        let mut drag = DragController::default();
        drag.pointer(PointerInput::DragStart { item: 1, at: MENU }, &Rows);
        assert!(drag
            .touch(TouchInput::Start { item: 2, at: MENU }, &Rows)
            .is_empty());

        let done = drag.pointer(
            PointerInput::Drop {
                at: Point::new(150.0, 150.0),
            },
            &Rows,
        );
        assert_eq!(done[0], DragEffect::Dropped { item: 1, table: 1 });
    }

    #[test]
    fn test_other_input_cannot_end_gesture() {
        let mut drag = DragController::default();
        let armed = drag.touch(TouchInput::Start { item: 7, at: MENU }, &Rows);
        let DragEffect::StartHoldTimer { generation, .. } = armed[0] else {
            panic!("expected hold timer");
        };
        drag.hold_elapsed(generation);
        assert_eq!(drag.source(), Some(InputSource::Touch));

        // Stray mouse events while a finger is dragging.
        assert!(drag
            .pointer(
                PointerInput::DragOver {
                    at: Point::new(150.0, 350.0),
                },
                &Rows,
            )
            .is_empty());
        assert!(drag.pointer(PointerInput::DragEnd, &Rows).is_empty());
        assert_eq!(drag.phase(), DragPhase::Dragging);

        let done = drag.touch(
            TouchInput::End {
                at: Point::new(150.0, 150.0),
            },
            &Rows,
        );
        assert_eq!(done[0], DragEffect::Dropped { item: 7, table: 1 });
        assert_eq!(drag.source(), None);
    }

    #[test]
    fn test_touch_cancel_ignored_during_mouse_drag() {
        let mut drag = DragController::default();
        drag.pointer(PointerInput::DragStart { item: 2, at: MENU }, &Rows);

        assert!(drag.touch(TouchInput::Cancel, &Rows).is_empty());
        assert!(drag
            .touch(
                TouchInput::End {
                    at: Point::new(150.0, 450.0),
                },
                &Rows,
            )
            .is_empty());
        assert_eq!(drag.phase(), DragPhase::Dragging);
        assert_eq!(drag.source(), Some(InputSource::Pointer));
    }

    /// `Rows` shifted up by a scroll offset.
    struct Scrolled(f64);

    impl HitTest for Scrolled {
        fn table_at(&self, at: Point) -> Option<TableId> {
            Rows.table_at(Point::new(at.x, at.y + self.0))
        }
    }

    #[test]
    fn test_relocate_follows_layout_under_resting_pointer() {
        let mut drag = DragController::default();
        let at = Point::new(150.0, 250.0);
        drag.pointer(PointerInput::DragStart { item: 4, at: MENU }, &Rows);
        drag.pointer(PointerInput::DragOver { at }, &Rows);
        assert_eq!(drag.candidate(), Some(2));

        assert!(drag.relocate(&Scrolled(40.0)).is_empty());
        assert_eq!(
            drag.relocate(&Scrolled(120.0)),
            vec![DragEffect::OverTarget(Some(3))]
        );
        assert_eq!(drag.candidate(), Some(3));

        let done = drag.pointer(PointerInput::Drop { at }, &Scrolled(120.0));
        assert_eq!(done[0], DragEffect::Dropped { item: 4, table: 3 });
    }

    #[test]
    fn test_relocate_when_idle_is_noop() {
        let mut drag = DragController::default();
        assert!(drag.relocate(&Rows).is_empty());
    }

    #[test]
    fn test_interrupt_while_armed() {
        let mut drag = DragController::default();
        drag.touch(TouchInput::Start { item: 1, at: MENU }, &Rows);
        assert_eq!(drag.interrupt(), vec![DragEffect::CancelHoldTimer]);
        assert!(drag.interrupt().is_empty());
    }

    #[test]
    fn test_input_deserializes_from_tagged_json() {
        let input: TouchInput =
            serde_json::from_str(r#"{"kind":"start","item":11,"at":{"x":1.0,"y":2.0}}"#).unwrap();
        assert_eq!(
            input,
            TouchInput::Start {
                item: 11,
                at: Point::new(1.0, 2.0)
            }
        );
    }
}
