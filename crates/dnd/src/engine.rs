//! The drag state machine.
//!
//! [`DragEngine`] is an explicitly constructed context owned by the host.
//! It drives one drag session at a time through
//! `Idle -> Dragging -> (Dropping | Cancelling) -> Idle`, writing to the host
//! only through the [`DragSurface`] capability traits. Time only moves in
//! [`DragEngine::on_frame`], so settle animations, the auto-scroll loop and
//! announcement timers all advance together.

use std::collections::VecDeque;

use snapboard_config::DndConfig;
use snapboard_protocol::{Task, TaskStatus};
use tokio::sync::watch;
use tracing::{debug, instrument, trace, warn};

use crate::announce::{AnnouncementContext, Announcer, render};
use crate::autoscroll::{AutoScroller, Scroller};
use crate::clock::{Clock, SystemClock};
use crate::error::{DndError, Result};
use crate::events::{
    CancelEvent, CancelReason, DndEvent, DragEnterEvent, DragEvent, DragEvents, DragLeaveEvent,
    DragOverEvent, DragStartEvent, DropEvent,
};
use crate::geometry::{ColumnSnapInfo, MeasurableSurface, NodeId, Point, Rect, calculate_columns};
use crate::snap::{self, PositionInfo};
use crate::state::{DragPhase, DragState};
use crate::visual::{Scene, VisualLayer};

/// Everything the engine needs from a host.
pub trait DragSurface: MeasurableSurface + Scene + Scroller {}

impl<T: MeasurableSurface + Scene + Scroller + ?Sized> DragSurface for T {}

#[derive(Debug, Clone, Copy)]
struct Session {
    element: NodeId,
    original_rect: Rect,
    last_column: Option<TaskStatus>,
    last_target: Option<(TaskStatus, usize)>,
}

/// The drag-and-drop context.
///
/// # Examples
///
/// ```
/// use snapboard_config::DndConfig;
/// use snapboard_dnd::{DragEngine, DragPhase};
///
/// let engine = DragEngine::new(DndConfig::default());
/// assert_eq!(engine.state().phase, DragPhase::Idle);
/// assert!(!engine.is_dragging());
/// ```
#[derive(Debug)]
pub struct DragEngine<C: Clock = SystemClock> {
    config: DndConfig,
    pending_config: Option<DndConfig>,
    clock: C,
    state: DragState,
    state_tx: watch::Sender<DragState>,
    columns: Vec<ColumnSnapInfo>,
    visuals: VisualLayer,
    scroller: AutoScroller,
    announcer: Announcer,
    callbacks: DragEvents,
    outbox: VecDeque<DndEvent>,
    session: Option<Session>,
}

impl DragEngine<SystemClock> {
    /// Creates an engine driven by wall-clock time.
    #[must_use]
    pub fn new(config: DndConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> DragEngine<C> {
    #[must_use]
    pub fn with_clock(config: DndConfig, clock: C) -> Self {
        let (state_tx, _) = watch::channel(DragState::idle());
        Self {
            config,
            pending_config: None,
            clock,
            state: DragState::idle(),
            state_tx,
            columns: Vec::new(),
            visuals: VisualLayer::new(),
            scroller: AutoScroller::new(),
            announcer: Announcer::new(),
            callbacks: DragEvents::new(),
            outbox: VecDeque::new(),
            session: None,
        }
    }

    /// Registers lifecycle callbacks, merged over the current ones.
    #[must_use]
    pub fn with_events(mut self, events: DragEvents) -> Self {
        self.set_events(events);
        self
    }

    pub fn set_events(&mut self, events: DragEvents) {
        let current = std::mem::take(&mut self.callbacks);
        self.callbacks = current.merge(events);
    }

    #[must_use]
    pub fn config(&self) -> &DndConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// A session keeps the configuration it started with; while one is
    /// running the new one is held back until the engine is idle again.
    pub fn configure(&mut self, config: DndConfig) {
        if self.state.is_idle() {
            self.config = config;
            self.pending_config = None;
        } else {
            debug!(phase = %self.state.phase, "configuration deferred until idle");
            self.pending_config = Some(config);
        }
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.state.phase
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// A receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DragState> {
        self.state_tx.subscribe()
    }

    /// The current geometry snapshot. Empty outside a session.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSnapInfo] {
        &self.columns
    }

    #[must_use]
    pub fn visuals(&self) -> &VisualLayer {
        &self.visuals
    }

    #[must_use]
    pub fn is_auto_scrolling(&self) -> bool {
        self.scroller.is_active()
    }

    /// Takes every event emitted since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<DndEvent> {
        self.outbox.drain(..).collect()
    }

    /// Starts a session, reporting why it could not start.
    ///
    /// `pointer` is where the card was grabbed; the ghost keeps that offset
    /// from the pointer for the whole drag.
    ///
    /// # Errors
    ///
    /// Returns [`DndError::AlreadyDragging`] unless the engine is idle, and
    /// [`DndError::ElementDetached`] if `element` is not on the surface.
    #[instrument(skip(self, surface, task), fields(task = %task.id))]
    pub fn try_start_drag<S: DragSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        task: &Task,
        element: NodeId,
        pointer: Point,
    ) -> Result<()> {
        if !self.state.is_idle() {
            return Err(DndError::AlreadyDragging(self.state.phase));
        }
        let rect = surface
            .element_bounds(element)
            .filter(|_| surface.contains(element))
            .ok_or(DndError::ElementDetached(element))?;

        let now = self.clock.now();
        let source = task.status;
        let source_index = surface
            .cards(source)
            .iter()
            .position(|card| card.task_id == task.id)
            .unwrap_or(task.position);

        self.state = DragState {
            phase: DragPhase::Dragging,
            dragged_task: Some(task.clone()),
            source_column: Some(source),
            source_index: Some(source_index),
            target_column: Some(source),
            target_index: None,
            current_position: pointer,
            pointer_offset: pointer - rect.origin(),
            start_time: Some(now),
        };
        self.session = Some(Session {
            element,
            original_rect: rect,
            last_column: Some(source),
            last_target: None,
        });

        self.visuals
            .begin(surface, &self.config, element, rect, (source, source_index), now);
        self.snapshot(surface);
        self.publish();

        let context = AnnouncementContext {
            title: Some(task.title.clone()),
            status: Some(source),
            column: Some(source),
            position: Some(source_index),
            total: Some(self.column_total(source)),
            original_column: Some(source),
            original_position: Some(source_index),
            ..Default::default()
        };
        self.announce(surface, |a| &a.on_pickup, &context);

        debug!(?source, source_index, "drag started");
        self.emit(DndEvent::DragStart(DragStartEvent {
            task: task.clone(),
            element,
            position: pointer,
            source_column: source,
        }));
        Ok(())
    }

    /// Starts a session. Returns `false` if it was rejected.
    pub fn start_drag<S: DragSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        task: &Task,
        element: NodeId,
        pointer: Point,
    ) -> bool {
        match self.try_start_drag(surface, task, element, pointer) {
            Ok(()) => true,
            Err(err) => {
                debug!(%err, "drag not started");
                false
            }
        }
    }

    /// Moves the drag to `(x, y)`. Ignored unless dragging.
    pub fn update_drag<S: DragSurface + ?Sized>(&mut self, surface: &mut S, x: f64, y: f64) {
        if !self.state.is_dragging() {
            return;
        }
        let Some(task) = self.state.dragged_task.clone() else {
            return;
        };
        let Some(session) = self.session else {
            return;
        };

        let now = self.clock.now();
        let position = Point::new(x, y);
        let previous = self.state.current_position;
        self.state.current_position = position;

        let elapsed = self
            .state
            .start_time
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default();
        self.visuals.follow(
            surface,
            position,
            self.state.pointer_offset,
            self.config.snap.targets.smoothing,
            elapsed,
        );

        self.retarget(surface);
        self.scroller.evaluate(
            position,
            surface.viewport(),
            &self.config.auto_scroll,
            &self.config.snap.thresholds,
        );
        self.publish();

        self.emit(DndEvent::Drag(DragEvent {
            task,
            element: session.element,
            position,
            delta: position - previous,
        }));
    }

    /// Resolves the current pointer position and reports target changes.
    fn retarget<S: DragSurface + ?Sized>(&mut self, surface: &mut S) {
        let Some(task_id) = self.state.dragged_task.as_ref().map(|t| t.id) else {
            return;
        };
        let Some(mut session) = self.session else {
            return;
        };
        let now = self.clock.now();
        let Point { x, y } = self.state.current_position;

        let info: PositionInfo = snap::resolve(x, y, &self.columns, &self.config.snap.targets);
        self.state.target_column = info.column;
        self.state.target_index = info.index;

        if let Some((column, index)) = info.target() {
            self.visuals
                .move_placeholder(surface, &self.config, column, index, info.slot, now);
        }

        if info.column != session.last_column {
            match (info.column, session.last_column) {
                (Some(column), _) => {
                    self.emit(DndEvent::DragEnter(DragEnterEvent { task_id, column }));
                }
                (None, Some(column)) => {
                    self.emit(DndEvent::DragLeave(DragLeaveEvent { task_id, column }));
                }
                (None, None) => {}
            }
            session.last_column = info.column;
        }

        if info.target() != session.last_target {
            if let Some((column, index)) = info.target() {
                self.emit(DndEvent::DragOver(DragOverEvent {
                    task_id,
                    column,
                    index,
                }));
                let context = AnnouncementContext {
                    title: self.state.dragged_task.as_ref().map(|t| t.title.clone()),
                    status: self.state.source_column,
                    column: Some(column),
                    position: Some(index),
                    total: Some(self.column_total(column)),
                    ..Default::default()
                };
                self.announce(surface, |a| &a.on_move, &context);
            }
            session.last_target = info.target();
        }

        self.session = Some(session);
    }

    /// Ends the drag on the resolved target, or cancels with
    /// [`CancelReason::Outside`] if there is none.
    ///
    /// Returns `true` if the card was dropped.
    #[instrument(skip_all)]
    pub fn drop<S: DragSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.state.is_dragging() {
            return false;
        }
        let (Some((target_column, target_index)), Some(task), Some(source_column)) = (
            self.state.target(),
            self.state.dragged_task.clone(),
            self.state.source_column,
        ) else {
            self.cancel_drag(surface, CancelReason::Outside);
            return false;
        };

        let now = self.clock.now();
        self.scroller.stop();
        self.state.phase = DragPhase::Dropping;
        self.publish();

        self.visuals.start_drop(surface, now);
        debug!(?source_column, ?target_column, target_index, "dropped");
        self.emit(DndEvent::Drop(DropEvent {
            task: task.clone(),
            source_column,
            target_column,
            target_index,
            new_position: target_index,
        }));

        let context = AnnouncementContext {
            title: Some(task.title),
            status: Some(target_column),
            column: Some(target_column),
            position: Some(target_index),
            total: Some(self.column_total(target_column)),
            from_column: Some(source_column),
            to_column: Some(target_column),
            original_column: Some(source_column),
            original_position: self.state.source_index,
        };
        self.announce(surface, |a| &a.on_drop, &context);

        self.advance_settle(surface);
        true
    }

    /// Abandons the drag and sends the card home. Ignored unless dragging.
    #[instrument(skip(self, surface))]
    pub fn cancel_drag<S: DragSurface + ?Sized>(&mut self, surface: &mut S, reason: CancelReason) {
        if !self.state.is_dragging() {
            return;
        }
        let now = self.clock.now();
        self.scroller.stop();
        self.state.phase = DragPhase::Cancelling;
        self.publish();

        let source_column = self.state.source_column;
        let source_index = self.state.source_index;
        if let (Some(column), Some(index)) = (source_column, source_index) {
            self.visuals
                .start_cancel(surface, &self.config, (column, index), now);
        }

        if let (Some(task), Some(source_column)) =
            (self.state.dragged_task.clone(), source_column)
        {
            debug!(%reason, "drag cancelled");
            self.emit(DndEvent::Cancel(CancelEvent {
                task: task.clone(),
                source_column,
                reason,
            }));
            let context = AnnouncementContext {
                title: Some(task.title),
                status: Some(source_column),
                column: Some(source_column),
                position: source_index,
                total: Some(self.column_total(source_column)),
                original_column: Some(source_column),
                original_position: source_index,
                ..Default::default()
            };
            self.announce(surface, |a| &a.on_cancel, &context);
        } else {
            warn!("cancelling a drag without a task");
        }

        self.advance_settle(surface);
    }

    /// Rebuilds the geometry snapshot. Call after the card lists or the
    /// surface size changed. Ignored unless dragging.
    pub fn refresh_geometry<S: DragSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.state.is_dragging() {
            self.snapshot(surface);
        }
    }

    /// Advances time-driven work: ghost motion, placeholder entrance,
    /// auto-scroll, settle animations and announcement expiry.
    ///
    /// Returns `true` while a session is active.
    pub fn on_frame<S: DragSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let now = self.clock.now();
        self.announcer.tick(surface, now);

        match self.state.phase {
            DragPhase::Dragging => {
                self.visuals.tick(surface, now);
                let elapsed = self
                    .state
                    .start_time
                    .map(|start| now.saturating_duration_since(start))
                    .unwrap_or_default();
                self.visuals.follow(
                    surface,
                    self.state.current_position,
                    self.state.pointer_offset,
                    self.config.snap.targets.smoothing,
                    elapsed,
                );
                if self.scroller.tick(true, surface) {
                    self.snapshot(surface);
                    self.retarget(surface);
                    self.publish();
                }
            }
            DragPhase::Dropping | DragPhase::Cancelling => {
                self.scroller.tick(false, surface);
                self.advance_settle(surface);
            }
            DragPhase::Idle => {
                self.scroller.tick(false, surface);
            }
        }

        !self.state.is_idle()
    }

    /// Destroys everything the engine created and returns to idle.
    ///
    /// Stops auto-scroll, drops pending animations and timers, removes the
    /// ghost, placeholder and live region, and restores the original card.
    /// Safe to call at any time and any number of times.
    #[instrument(skip_all)]
    pub fn teardown<S: DragSurface + ?Sized>(&mut self, surface: &mut S) {
        self.scroller.stop();
        self.visuals.cleanup(surface);
        self.announcer.teardown(surface);
        self.columns.clear();
        self.session = None;
        if !self.state.is_idle() {
            debug!(phase = %self.state.phase, "session torn down");
            self.state = DragState::idle();
            self.publish();
        }
        if let Some(config) = self.pending_config.take() {
            self.config = config;
        }
    }

    fn advance_settle<S: DragSurface + ?Sized>(&mut self, surface: &mut S) {
        let now = self.clock.now();
        if self.visuals.tick(surface, now) || !self.visuals.is_settling() {
            self.finish_session(surface);
        }
    }

    fn finish_session<S: DragSurface + ?Sized>(&mut self, surface: &mut S) {
        self.visuals.cleanup(surface);
        self.scroller.stop();
        self.columns.clear();
        self.session = None;
        self.state = DragState::idle();
        self.publish();
        if let Some(config) = self.pending_config.take() {
            self.config = config;
        }
        trace!("session finished");
    }

    fn snapshot<S: DragSurface + ?Sized>(&mut self, surface: &S) {
        let dragged = self.state.dragged_task.as_ref().map(|t| t.id);
        let height = self.session.map(|s| s.original_rect.height);
        self.columns = calculate_columns(surface, dragged, &self.config.snap.grid, height);

        let slots: usize = self.columns.iter().map(|c| c.slots.len()).sum();
        if self.config.debug {
            debug!(columns = self.columns.len(), slots, "geometry snapshot");
        } else {
            trace!(columns = self.columns.len(), slots, "geometry snapshot");
        }
    }

    /// Cards the column would hold after a drop into it.
    fn column_total(&self, column: TaskStatus) -> usize {
        self.columns
            .iter()
            .find(|c| c.id == column)
            .map_or(1, |c| c.slots.iter().filter(|s| s.occupied).count() + 1)
    }

    fn announce<S: DragSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        template: impl Fn(&snapboard_config::Announcements) -> &String,
        context: &AnnouncementContext,
    ) {
        let text = render(template(&self.config.accessibility.announcements), context);
        let now = self.clock.now();
        self.announcer
            .announce(surface, &self.config.accessibility.keyboard, &text, now);
    }

    fn emit(&mut self, event: DndEvent) {
        trace!(event = event.name(), "emit");
        self.callbacks.dispatch(&event);
        self.outbox.push_back(event);
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.state.clone());
    }
}
