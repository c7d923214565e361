//! # Event Loop Shell
//!
//! Drives a [`PosEngine`] from stdin and carries out the effects it
//! returns. Every timer the core asks for lives here.
//!
//! ## Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     tokio::select! (current thread)                     │
//! │                                                                         │
//! │  stdin line ────────► Command ──► Intent ──► engine.handle ──┐          │
//! │  hold deadline ─────► Intent::HoldElapsed { generation } ────┤          │
//! │  auto-scroll tick ──► layout.scroll_by ──► LayoutChanged ────┤          │
//! │  toast deadline ────► dismiss                                │          │
//! │  1 s clock ─────────► clock line (optional)                  │          │
//! │                                                              ▼          │
//! │                     for effect in effects (in order):                   │
//! │                       Save   ─► store.save (failure is logged)          │
//! │                       Render ─► layout.arrange + render_floor           │
//! │                       Notify ─► toast (replaces, timer restarts)        │
//! │                       PrintBill ─► render_bill                          │
//! │                       Drag(..) ─► hold timer / auto-scroll / ghost      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Timers are plain deadlines in the shell's state. A cancelled timer is
//! just a cleared deadline, so it can never fire late.
//!
//! Whenever the grid moves under a drag (scroll tick, re-arrange on render)
//! the engine is told, so the highlight always names the table a drop
//! would land on.

use std::time::Duration;

use chrono::Local;
use tablepos_core::drag::{DragEffect, Point, ScrollDirection};
use tablepos_core::{Effect, Intent, ItemId, PersistenceAdapter, PosEngine, TableId};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::config::ConsoleConfig;
use crate::error::ConsoleResult;
use crate::input::Command;
use crate::layout::GridLayout;
use crate::presenter::{render_bill, render_clock, render_floor, render_toast};
use crate::toast::Notifier;

#[derive(Debug, Clone, Copy, PartialEq)]
struct HoldTimer {
    generation: u64,
    deadline: Instant,
}

#[derive(Debug)]
struct AutoScroll {
    direction: ScrollDirection,
    ticks: Interval,
}

/// The floating copy of a dragged item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost {
    pub item: ItemId,
    pub at: Point,
}

pub struct Shell<S, W> {
    engine: PosEngine,
    store: S,
    out: W,
    config: ConsoleConfig,
    layout: GridLayout,
    notifier: Notifier,
    hold: Option<HoldTimer>,
    autoscroll: Option<AutoScroll>,
    ghost: Option<Ghost>,
    highlight: Option<TableId>,
}

impl<S, W> Shell<S, W>
where
    S: PersistenceAdapter,
    W: AsyncWrite + Unpin,
{
    pub fn new(engine: PosEngine, store: S, config: ConsoleConfig, out: W) -> Self {
        let notifier = Notifier::new(Duration::from_secs(config.ui.toast_secs));
        Shell {
            engine,
            store,
            out,
            config,
            layout: GridLayout::default(),
            notifier,
            hold: None,
            autoscroll: None,
            ghost: None,
            highlight: None,
        }
    }

    /// Restores saved orders and draws the first frame.
    pub async fn start(&mut self) -> ConsoleResult<()> {
        let saved = self.store.load();
        self.engine.restore(saved);
        self.render().await
    }

    /// Reads commands until end of input.
    pub async fn run<R>(&mut self, input: R) -> ConsoleResult<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut clock = time::interval(Duration::from_secs(1));
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let hold_at = self.hold.map(|hold| hold.deadline);
            let toast_at = self.notifier.deadline();

            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => self.handle_line(&line).await?,
                    None => break,
                },

                _ = sleep_until(hold_at) => self.fire_hold().await?,

                direction = next_scroll(&mut self.autoscroll) => self.scroll_step(direction).await?,

                _ = sleep_until(toast_at) => self.dismiss_toast(),

                _ = clock.tick() => {
                    if self.config.ui.show_clock {
                        self.write(&render_clock(Local::now())).await?;
                    }
                }
            }
        }

        info!("End of input");
        self.out.flush().await?;
        Ok(())
    }

    /// Parses and applies one input line. Malformed lines are skipped.
    pub async fn handle_line(&mut self, line: &str) -> ConsoleResult<()> {
        match Command::parse(line) {
            Ok(Some(command)) => {
                debug!(?command, "Command received");
                self.dispatch(command.into_intent(Local::now())).await
            }
            Ok(None) => Ok(()),
            Err(err) => {
                warn!(%err, line, "Ignoring malformed input line");
                Ok(())
            }
        }
    }

    pub async fn dispatch(&mut self, intent: Intent) -> ConsoleResult<()> {
        let effects = self.engine.handle(intent, &self.layout);
        let rendered = effects.contains(&Effect::Render);
        for effect in effects {
            self.execute(effect).await?;
        }
        if rendered {
            self.relocate_drag().await?;
        }
        Ok(())
    }

    /// Re-checks the drop candidate after the grid moved.
    async fn relocate_drag(&mut self) -> ConsoleResult<()> {
        let effects = self.engine.handle(Intent::LayoutChanged, &self.layout);
        for effect in effects {
            self.execute(effect).await?;
        }
        Ok(())
    }

    async fn execute(&mut self, effect: Effect) -> ConsoleResult<()> {
        match effect {
            Effect::Save => {
                if let Err(err) = self.store.save(self.engine.orders().snapshot()) {
                    warn!(%err, "Failed to save orders");
                }
            }
            Effect::Render => self.render().await?,
            Effect::Notify { message, severity } => {
                self.write(&render_toast(&message, severity)).await?;
                self.notifier.show(message, severity, Instant::now());
            }
            Effect::PrintBill(bill) => {
                info!(table = bill.table_id, total = %bill.totals.grand_total, "Bill generated");
                self.write(&render_bill(&bill, &self.config)).await?;
            }
            Effect::Drag(effect) => self.drag_effect(effect).await?,
        }
        Ok(())
    }

    async fn drag_effect(&mut self, effect: DragEffect) -> ConsoleResult<()> {
        match effect {
            DragEffect::StartHoldTimer {
                generation,
                delay_ms,
            } => {
                self.hold = Some(HoldTimer {
                    generation,
                    deadline: Instant::now() + Duration::from_millis(delay_ms),
                });
            }
            DragEffect::CancelHoldTimer => self.hold = None,
            DragEffect::ShowGhost { item, at } => self.ghost = Some(Ghost { item, at }),
            DragEffect::MoveGhost { at } => {
                if let Some(ghost) = self.ghost.as_mut() {
                    ghost.at = at;
                }
            }
            DragEffect::HideGhost => self.ghost = None,
            DragEffect::OverTarget(target) => {
                self.highlight = target;
                if let Some(name) = target.and_then(|id| self.table_name(id)) {
                    self.write(&format!("» over {name}\n")).await?;
                }
            }
            DragEffect::StartAutoScroll(direction) => {
                let mut ticks =
                    time::interval(Duration::from_millis(self.config.drag.scroll_interval_ms));
                ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.autoscroll = Some(AutoScroll { direction, ticks });
            }
            DragEffect::StopAutoScroll => self.autoscroll = None,
            DragEffect::DragStarted { item } => {
                let name = self
                    .engine
                    .catalog()
                    .find_by_id(item)
                    .map(|i| i.name.clone())
                    .unwrap_or_else(|| format!("item {item}"));
                self.write(&format!("» dragging {name}\n")).await?;
            }
            DragEffect::Dropped { item, table } => {
                trace!(item, table, "Drop delivered");
            }
            DragEffect::Cancelled => self.write("» drag cancelled\n").await?,
        }
        Ok(())
    }

    async fn fire_hold(&mut self) -> ConsoleResult<()> {
        if let Some(hold) = self.hold.take() {
            self.dispatch(Intent::HoldElapsed {
                generation: hold.generation,
            })
            .await?;
        }
        Ok(())
    }

    async fn scroll_step(&mut self, direction: ScrollDirection) -> ConsoleResult<()> {
        if self
            .layout
            .scroll_by(direction, self.config.drag.scroll_step_px)
        {
            self.relocate_drag().await?;
        }
        Ok(())
    }

    fn dismiss_toast(&mut self) {
        if let Some(toast) = self.notifier.expire(Instant::now()) {
            trace!(message = %toast.message, "Toast dismissed");
        }
    }

    async fn render(&mut self) -> ConsoleResult<()> {
        let visible: Vec<TableId> = self
            .engine
            .visible_tables()
            .iter()
            .map(|card| card.table.id)
            .collect();
        self.layout.arrange(visible);

        let screen = render_floor(&self.engine, &self.config);
        self.write(&screen).await
    }

    async fn write(&mut self, text: &str) -> ConsoleResult<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }

    fn table_name(&self, id: TableId) -> Option<String> {
        self.engine.tables().find_by_id(id).map(|t| t.name.clone())
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn engine(&self) -> &PosEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn ghost(&self) -> Option<Ghost> {
        self.ghost
    }

    pub fn highlight(&self) -> Option<TableId> {
        self.highlight
    }

    pub fn is_hold_pending(&self) -> bool {
        self.hold.is_some()
    }

    pub fn auto_scroll(&self) -> Option<ScrollDirection> {
        self.autoscroll.as_ref().map(|scroll| scroll.direction)
    }
}

/// Completes at `deadline`, or never when there is none.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// Next auto-scroll tick, or never while auto-scroll is off.
async fn next_scroll(autoscroll: &mut Option<AutoScroll>) -> ScrollDirection {
    match autoscroll {
        Some(scroll) => {
            scroll.ticks.tick().await;
            scroll.direction
        }
        None => std::future::pending().await,
    }
}
