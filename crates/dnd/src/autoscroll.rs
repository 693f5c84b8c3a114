//! Edge auto-scroll.
//!
//! [`AutoScroller::evaluate`] runs on every pointer move and arms a velocity
//! when the pointer sits in one of the four edge zones. [`AutoScroller::tick`]
//! runs on every frame and scrolls only while the drag is still active, so a
//! finished drag stops scrolling on its next frame at the latest.

use snapboard_config::{AutoScrollConfig, AxisScrollConfig, ThresholdsConfig};
use tracing::trace;

use crate::geometry::{Point, Rect};

/// Host scrolling capability.
pub trait Scroller {
    /// The visible area, in the same units as the pointer.
    fn viewport(&self) -> Rect;

    /// Scrolls the content by the given amounts.
    fn scroll_by(&mut self, dx: f64, dy: f64);
}

/// Per-frame scroll amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollVelocity {
    pub dx: f64,
    pub dy: f64,
}

impl ScrollVelocity {
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

fn zone_size(axis: &AxisScrollConfig, thresholds: &ThresholdsConfig) -> f64 {
    if axis.zone > 0.0 {
        axis.zone
    } else {
        thresholds.auto_scroll_threshold
    }
}

fn axis_velocity(
    axis: &AxisScrollConfig,
    thresholds: &ThresholdsConfig,
    position: f64,
    start: f64,
    end: f64,
) -> f64 {
    if !axis.enabled {
        return 0.0;
    }
    let zone = zone_size(axis, thresholds);
    let speed = axis.speed.min(axis.max_speed);
    if position < start + zone {
        -speed
    } else if position > end - zone {
        speed
    } else {
        0.0
    }
}

/// Computes the scroll velocity for a pointer position.
///
/// # Examples
///
/// ```
/// use snapboard_config::DndConfig;
/// use snapboard_dnd::autoscroll::velocity_for;
/// use snapboard_dnd::{Point, Rect};
///
/// let config = DndConfig::default();
/// let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
/// let pointer = Point::new(400.0, 590.0);
/// let v = velocity_for(pointer, viewport, &config.auto_scroll, &config.snap.thresholds);
/// assert_eq!(v.dy, 3.0);
/// assert_eq!(v.dx, 0.0);
/// ```
#[must_use]
pub fn velocity_for(
    pointer: Point,
    viewport: Rect,
    config: &AutoScrollConfig,
    thresholds: &ThresholdsConfig,
) -> ScrollVelocity {
    ScrollVelocity {
        dx: axis_velocity(
            &config.horizontal,
            thresholds,
            pointer.x,
            viewport.left(),
            viewport.right(),
        ),
        dy: axis_velocity(
            &config.vertical,
            thresholds,
            pointer.y,
            viewport.top(),
            viewport.bottom(),
        ),
    }
}

/// The frame-driven scroll loop.
#[derive(Debug, Clone, Default)]
pub struct AutoScroller {
    velocity: Option<ScrollVelocity>,
}

impl AutoScroller {
    #[must_use]
    pub const fn new() -> Self {
        Self { velocity: None }
    }

    /// Returns `true` while a velocity is armed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.velocity.is_some()
    }

    #[must_use]
    pub const fn velocity(&self) -> Option<ScrollVelocity> {
        self.velocity
    }

    /// Re-evaluates the zones for a pointer position.
    pub fn evaluate(
        &mut self,
        pointer: Point,
        viewport: Rect,
        config: &AutoScrollConfig,
        thresholds: &ThresholdsConfig,
    ) {
        let velocity = velocity_for(pointer, viewport, config, thresholds);
        self.velocity = (!velocity.is_zero()).then_some(velocity);
    }

    /// Disarms the loop.
    pub fn stop(&mut self) {
        self.velocity = None;
    }

    /// Runs one frame.
    ///
    /// Scrolls if armed and `dragging`; otherwise disarms. Returns `true` if
    /// the content moved.
    pub fn tick<S: Scroller + ?Sized>(&mut self, dragging: bool, scroller: &mut S) -> bool {
        if !dragging {
            self.stop();
            return false;
        }
        match self.velocity {
            Some(velocity) => {
                trace!(dx = velocity.dx, dy = velocity.dy, "auto-scroll");
                scroller.scroll_by(velocity.dx, velocity.dy);
                true
            }
            None => false,
        }
    }
}
