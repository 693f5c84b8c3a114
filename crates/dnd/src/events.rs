//! Drag lifecycle events.
//!
//! The engine reports every lifecycle step twice: to the optional
//! [`DragEvents`] callbacks, and as a [`DndEvent`] in an outbox the host
//! drains. Both see the same events in the same order.

use snapboard_protocol::{Task, TaskId, TaskStatus};

use crate::geometry::{NodeId, Point};

/// Why a drag ended without a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// The user pressed Escape.
    Escape,
    /// The card was released away from every column.
    Outside,
    /// The input was interrupted, e.g. a cancelled touch.
    Error,
}

impl CancelReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Escape => "escape",
            Self::Outside => "outside",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragStartEvent {
    pub task: Task,
    pub element: NodeId,
    pub position: Point,
    pub source_column: TaskStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragEvent {
    pub task: Task,
    pub element: NodeId,
    pub position: Point,
    /// Movement since the previous update.
    pub delta: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnterEvent {
    pub task_id: TaskId,
    pub column: TaskStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOverEvent {
    pub task_id: TaskId,
    pub column: TaskStatus,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragLeaveEvent {
    pub task_id: TaskId,
    pub column: TaskStatus,
}

/// A completed drop.
///
/// `target_index` counts the target column without the dragged card, so it
/// is also the card's final position.
#[derive(Debug, Clone, PartialEq)]
pub struct DropEvent {
    pub task: Task,
    pub source_column: TaskStatus,
    pub target_column: TaskStatus,
    pub target_index: usize,
    pub new_position: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CancelEvent {
    pub task: Task,
    pub source_column: TaskStatus,
    pub reason: CancelReason,
}

/// Any lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub enum DndEvent {
    DragStart(DragStartEvent),
    Drag(DragEvent),
    DragEnter(DragEnterEvent),
    DragOver(DragOverEvent),
    DragLeave(DragLeaveEvent),
    Drop(DropEvent),
    Cancel(CancelEvent),
}

impl DndEvent {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DragStart(_) => "drag_start",
            Self::Drag(_) => "drag",
            Self::DragEnter(_) => "drag_enter",
            Self::DragOver(_) => "drag_over",
            Self::DragLeave(_) => "drag_leave",
            Self::Drop(_) => "drop",
            Self::Cancel(_) => "cancel",
        }
    }
}

type Callback<E> = Option<Box<dyn FnMut(&E)>>;

/// Optional lifecycle callbacks.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use snapboard_dnd::DragEvents;
///
/// let drops = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&drops);
/// let events = DragEvents::new().on_drop(move |_| counter.set(counter.get() + 1));
/// assert!(events.has_drop());
/// ```
#[derive(Default)]
pub struct DragEvents {
    drag_start: Callback<DragStartEvent>,
    drag: Callback<DragEvent>,
    drag_enter: Callback<DragEnterEvent>,
    drag_over: Callback<DragOverEvent>,
    drag_leave: Callback<DragLeaveEvent>,
    drop: Callback<DropEvent>,
    cancel: Callback<CancelEvent>,
}

impl DragEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_drag_start(mut self, f: impl FnMut(&DragStartEvent) + 'static) -> Self {
        self.drag_start = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_drag(mut self, f: impl FnMut(&DragEvent) + 'static) -> Self {
        self.drag = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_drag_enter(mut self, f: impl FnMut(&DragEnterEvent) + 'static) -> Self {
        self.drag_enter = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_drag_over(mut self, f: impl FnMut(&DragOverEvent) + 'static) -> Self {
        self.drag_over = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_drag_leave(mut self, f: impl FnMut(&DragLeaveEvent) + 'static) -> Self {
        self.drag_leave = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_drop(mut self, f: impl FnMut(&DropEvent) + 'static) -> Self {
        self.drop = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_cancel(mut self, f: impl FnMut(&CancelEvent) + 'static) -> Self {
        self.cancel = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn has_drop(&self) -> bool {
        self.drop.is_some()
    }

    /// Merges `other` into `self` key by key.
    ///
    /// Callbacks set in `other` replace the ones in `self`; unset ones keep
    /// what `self` had.
    #[must_use]
    pub fn merge(self, other: DragEvents) -> Self {
        Self {
            drag_start: other.drag_start.or(self.drag_start),
            drag: other.drag.or(self.drag),
            drag_enter: other.drag_enter.or(self.drag_enter),
            drag_over: other.drag_over.or(self.drag_over),
            drag_leave: other.drag_leave.or(self.drag_leave),
            drop: other.drop.or(self.drop),
            cancel: other.cancel.or(self.cancel),
        }
    }

    /// Invokes the callback registered for `event`, if any.
    pub fn dispatch(&mut self, event: &DndEvent) {
        fn call<E>(slot: &mut Callback<E>, event: &E) {
            if let Some(f) = slot.as_mut() {
                f(event);
            }
        }

        match event {
            DndEvent::DragStart(e) => call(&mut self.drag_start, e),
            DndEvent::Drag(e) => call(&mut self.drag, e),
            DndEvent::DragEnter(e) => call(&mut self.drag_enter, e),
            DndEvent::DragOver(e) => call(&mut self.drag_over, e),
            DndEvent::DragLeave(e) => call(&mut self.drag_leave, e),
            DndEvent::Drop(e) => call(&mut self.drop, e),
            DndEvent::Cancel(e) => call(&mut self.cancel, e),
        }
    }
}

impl std::fmt::Debug for DragEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragEvents")
            .field("drag_start", &self.drag_start.is_some())
            .field("drag", &self.drag.is_some())
            .field("drag_enter", &self.drag_enter.is_some())
            .field("drag_over", &self.drag_over.is_some())
            .field("drag_leave", &self.drag_leave.is_some())
            .field("drop", &self.drop.is_some())
            .field("cancel", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn cancel_event() -> DndEvent {
        DndEvent::Cancel(CancelEvent {
            task: Task::new("A"),
            source_column: TaskStatus::Todo,
            reason: CancelReason::Escape,
        })
    }

    #[test]
    fn dispatch_reaches_matching_callback_only() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let cancels = Rc::clone(&log);
        let drops = Rc::clone(&log);
        let mut events = DragEvents::new()
            .on_cancel(move |e| cancels.borrow_mut().push(format!("cancel:{}", e.reason)))
            .on_drop(move |_| drops.borrow_mut().push("drop".to_string()));

        events.dispatch(&cancel_event());
        events.dispatch(&DndEvent::DragLeave(DragLeaveEvent {
            task_id: TaskId::nil(),
            column: TaskStatus::Done,
        }));

        assert_eq!(*log.borrow(), vec!["cancel:escape".to_string()]);
    }

    #[test]
    fn merge_keeps_unset_callbacks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let base_log = Rc::clone(&log);
        let base_drop = Rc::clone(&log);
        let override_log = Rc::clone(&log);

        let base = DragEvents::new()
            .on_cancel(move |_| base_log.borrow_mut().push("base cancel"))
            .on_drop(move |_| base_drop.borrow_mut().push("base drop"));
        let overrides =
            DragEvents::new().on_cancel(move |_| override_log.borrow_mut().push("new cancel"));

        let mut merged = base.merge(overrides);
        assert!(merged.has_drop());
        merged.dispatch(&cancel_event());
        assert_eq!(*log.borrow(), vec!["new cancel"]);
    }

    #[test]
    fn debug_lists_registered_callbacks() {
        let events = DragEvents::new().on_drag(|_| {});
        let debug = format!("{events:?}");
        assert!(debug.contains("drag: true"));
        assert!(debug.contains("drop: false"));
    }

    #[test]
    fn event_names() {
        assert_eq!(cancel_event().name(), "cancel");
    }
}
