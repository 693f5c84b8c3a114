//! Pointer and keyboard input.
//!
//! [`InputAdapter`] turns raw pointer and key events into engine calls. A
//! press only becomes a drag once the pointer has travelled
//! `drag_threshold` from where it went down, and only the pointer that
//! pressed can move or release the gesture.

use snapboard_protocol::Task;
use tracing::trace;

use crate::clock::Clock;
use crate::engine::{DragEngine, DragSurface};
use crate::events::CancelReason;
use crate::geometry::{NodeId, Point};

/// Which pointer an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    /// A touch point and its identifier.
    Touch(u64),
}

/// A card the pointer or keyboard can pick up.
#[derive(Debug, Clone, PartialEq)]
pub struct Grab {
    pub task: Task,
    pub element: NodeId,
}

/// A raw pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// Button pressed or touch started, over `target` if it is a card.
    Down {
        pointer: PointerId,
        position: Point,
        target: Option<Grab>,
    },
    Move {
        pointer: PointerId,
        position: Point,
    },
    Up {
        pointer: PointerId,
        position: Point,
    },
    /// The platform abandoned the pointer, e.g. a cancelled touch.
    Cancel { pointer: PointerId },
}

/// Keys the keyboard drag mode understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragKey {
    Enter,
    Space,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// What an input event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not consumed; the host may handle it.
    Ignored,
    /// A press is waiting for the drag threshold.
    Pending,
    Started,
    Moved,
    /// Pressed and released without crossing the threshold.
    Clicked,
    Dropped,
    Cancelled,
}

impl InputOutcome {
    /// Returns `true` if the host should not handle the event itself.
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        !matches!(self, Self::Ignored | Self::Clicked)
    }
}

#[derive(Debug, Clone, Default)]
enum Gesture {
    #[default]
    Idle,
    Pressed {
        pointer: PointerId,
        origin: Point,
        grab: Grab,
    },
    PointerDrag {
        pointer: PointerId,
    },
    KeyboardDrag,
}

/// Gesture tracking between raw input and a [`DragEngine`].
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    gesture: Gesture,
}

impl InputAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a keyboard drag is in progress.
    #[must_use]
    pub fn is_keyboard_drag(&self) -> bool {
        matches!(self.gesture, Gesture::KeyboardDrag)
    }

    /// Returns `true` while a pointer is pressed or dragging.
    #[must_use]
    pub fn is_pointer_active(&self) -> bool {
        matches!(
            self.gesture,
            Gesture::Pressed { .. } | Gesture::PointerDrag { .. }
        )
    }

    /// Forgets a gesture whose drag the engine already ended.
    fn resync<C: Clock>(&mut self, engine: &DragEngine<C>) {
        if matches!(
            self.gesture,
            Gesture::PointerDrag { .. } | Gesture::KeyboardDrag
        ) && !engine.is_dragging()
        {
            self.gesture = Gesture::Idle;
        }
    }

    /// Handles a pointer event.
    pub fn pointer<C: Clock, S: DragSurface + ?Sized>(
        &mut self,
        engine: &mut DragEngine<C>,
        surface: &mut S,
        input: PointerInput,
    ) -> InputOutcome {
        self.resync(engine);

        match input {
            PointerInput::Down {
                pointer,
                position,
                target,
            } => {
                if !matches!(self.gesture, Gesture::Idle) || !engine.state().is_idle() {
                    return InputOutcome::Ignored;
                }
                let Some(grab) = target else {
                    return InputOutcome::Ignored;
                };
                trace!(?pointer, "pressed");
                self.gesture = Gesture::Pressed {
                    pointer,
                    origin: position,
                    grab,
                };
                InputOutcome::Pending
            }
            PointerInput::Move { pointer, position } => match &self.gesture {
                Gesture::Pressed {
                    pointer: pressed,
                    origin,
                    grab,
                } if *pressed == pointer => {
                    let threshold = engine.config().snap.thresholds.drag_threshold;
                    if origin.distance(position) < threshold {
                        return InputOutcome::Pending;
                    }
                    let grab = grab.clone();
                    if engine.start_drag(surface, &grab.task, grab.element, position) {
                        self.gesture = Gesture::PointerDrag { pointer };
                        engine.update_drag(surface, position.x, position.y);
                        InputOutcome::Started
                    } else {
                        self.gesture = Gesture::Idle;
                        InputOutcome::Ignored
                    }
                }
                Gesture::PointerDrag { pointer: dragging } if *dragging == pointer => {
                    engine.update_drag(surface, position.x, position.y);
                    InputOutcome::Moved
                }
                _ => InputOutcome::Ignored,
            },
            PointerInput::Up { pointer, .. } => match self.gesture {
                Gesture::Pressed {
                    pointer: pressed, ..
                } if pressed == pointer => {
                    self.gesture = Gesture::Idle;
                    InputOutcome::Clicked
                }
                Gesture::PointerDrag { pointer: dragging } if dragging == pointer => {
                    self.gesture = Gesture::Idle;
                    if engine.drop(surface) {
                        InputOutcome::Dropped
                    } else {
                        InputOutcome::Cancelled
                    }
                }
                _ => InputOutcome::Ignored,
            },
            PointerInput::Cancel { pointer } => match self.gesture {
                Gesture::Pressed {
                    pointer: pressed, ..
                } if pressed == pointer => {
                    self.gesture = Gesture::Idle;
                    InputOutcome::Ignored
                }
                Gesture::PointerDrag { pointer: dragging } if dragging == pointer => {
                    self.gesture = Gesture::Idle;
                    engine.cancel_drag(surface, CancelReason::Error);
                    InputOutcome::Cancelled
                }
                _ => InputOutcome::Ignored,
            },
        }
    }

    /// Handles a key press. `focused` is the card with keyboard focus.
    ///
    /// Escape cancels any drag. Everything else is ignored when keyboard
    /// dragging is disabled.
    pub fn key<C: Clock, S: DragSurface + ?Sized>(
        &mut self,
        engine: &mut DragEngine<C>,
        surface: &mut S,
        key: DragKey,
        focused: Option<&Grab>,
    ) -> InputOutcome {
        self.resync(engine);

        if key == DragKey::Escape {
            if !engine.is_dragging() {
                return InputOutcome::Ignored;
            }
            self.gesture = Gesture::Idle;
            engine.cancel_drag(surface, CancelReason::Escape);
            return InputOutcome::Cancelled;
        }

        let keyboard = &engine.config().accessibility.keyboard;
        if !keyboard.enabled {
            return InputOutcome::Ignored;
        }
        let step = keyboard.move_step;

        match (key, &self.gesture) {
            (DragKey::Enter | DragKey::Space, Gesture::Idle) => {
                let Some(grab) = focused else {
                    return InputOutcome::Ignored;
                };
                let Some(bounds) = surface.element_bounds(grab.element) else {
                    return InputOutcome::Ignored;
                };
                if engine.start_drag(surface, &grab.task, grab.element, bounds.center()) {
                    self.gesture = Gesture::KeyboardDrag;
                    InputOutcome::Started
                } else {
                    InputOutcome::Ignored
                }
            }
            (DragKey::Enter | DragKey::Space, Gesture::KeyboardDrag) => {
                self.gesture = Gesture::Idle;
                if engine.drop(surface) {
                    InputOutcome::Dropped
                } else {
                    InputOutcome::Cancelled
                }
            }
            (
                DragKey::ArrowUp | DragKey::ArrowDown | DragKey::ArrowLeft | DragKey::ArrowRight,
                Gesture::KeyboardDrag,
            ) => {
                let (dx, dy) = match key {
                    DragKey::ArrowUp => (0.0, -step),
                    DragKey::ArrowDown => (0.0, step),
                    DragKey::ArrowLeft => (-step, 0.0),
                    _ => (step, 0.0),
                };
                let next = engine.state().current_position.offset_by(dx, dy);
                engine.update_drag(surface, next.x, next.y);
                InputOutcome::Moved
            }
            _ => InputOutcome::Ignored,
        }
    }
}
