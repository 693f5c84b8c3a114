//! Ghost and placeholder management.
//!
//! The [`Scene`] trait is the engine's only write access to the host's
//! presentation. [`VisualLayer`] owns the nodes it creates (the ghost clone
//! and the placeholder), suppresses the original card during a drag, and
//! builds the settle sequences played when a drag ends.
//!
//! Every mutation checks [`Scene::contains`] first. A node the host already
//! removed counts as cleaned up.

use std::time::{Duration, Instant};

use snapboard_config::{DndConfig, PlaceholderHeight};
use snapboard_protocol::TaskStatus;
use tracing::{debug, trace};

use crate::animation::{AfterStep, Easing, Frame, Sequence, Step, Tween, Visual};
use crate::geometry::{NodeId, Point, Rect};

/// Opacity of the original card while it is being dragged.
pub const SUPPRESSED_OPACITY: f64 = 0.1;

/// Scale of the original card while it is being dragged.
pub const SUPPRESSED_SCALE: f64 = 0.95;

/// Base ghost tilt in degrees.
pub const GHOST_TILT: f64 = 3.0;

/// Amplitude of the ghost's time-based wobble in degrees.
pub const GHOST_WOBBLE: f64 = 2.0;

/// Appearance of a placeholder node.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderStyle {
    pub width: f64,
    pub height: f64,
    pub background_color: Option<String>,
    pub border_style: Option<String>,
}

/// Write access to the host's presentation.
pub trait Scene {
    /// Returns `true` if `node` is still attached.
    fn contains(&self, node: NodeId) -> bool;

    /// Creates a detached visual clone of `element` shown above everything.
    /// Returns `None` if the element cannot be cloned.
    fn clone_visual(&mut self, element: NodeId, class_name: Option<&str>) -> Option<NodeId>;

    /// Creates a placeholder node, not yet inserted.
    fn create_placeholder(&mut self, style: &PlaceholderStyle) -> NodeId;

    /// Inserts `node` into `column`'s card list before the `index`-th card,
    /// not counting the dragged one; past the end appends.
    fn insert_placeholder(&mut self, node: NodeId, column: TaskStatus, index: usize);

    /// Takes `node` out of its list without destroying it.
    fn detach(&mut self, node: NodeId);

    /// Destroys `node`.
    fn remove(&mut self, node: NodeId);

    /// Current bounds of a node created through this trait.
    fn node_bounds(&self, node: NodeId) -> Option<Rect>;

    /// Applies presentation properties.
    fn set_visual(&mut self, node: NodeId, visual: &Visual);

    /// Resets presentation properties to the host's defaults.
    fn clear_visual(&mut self, node: NodeId);

    /// Creates the region whose text assistive technology reads out.
    fn create_live_region(&mut self) -> NodeId;

    /// Replaces the live region's text.
    fn set_live_text(&mut self, node: NodeId, text: &str);
}

/// The two nodes a settle sequence animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Ghost,
    Placeholder,
}

#[derive(Debug, Clone, Copy)]
struct Ghost {
    node: NodeId,
    visual: Visual,
}

#[derive(Debug, Clone, Copy)]
struct Placeholder {
    node: NodeId,
    slot: Option<(TaskStatus, usize)>,
    visual: Visual,
    entering: Option<(Tween, Instant)>,
}

/// Ghost, placeholder and original-element state for one drag.
#[derive(Debug, Default)]
pub struct VisualLayer {
    original: Option<NodeId>,
    original_rect: Option<Rect>,
    ghost: Option<Ghost>,
    placeholder: Option<Placeholder>,
    last_slot_rect: Option<Rect>,
    settle: Option<Sequence<Part>>,
}

impl VisualLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ghost(&self) -> Option<NodeId> {
        self.ghost.map(|g| g.node)
    }

    #[must_use]
    pub fn ghost_visual(&self) -> Option<Visual> {
        self.ghost.map(|g| g.visual)
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<NodeId> {
        self.placeholder.map(|p| p.node)
    }

    /// Slot the placeholder currently sits in.
    #[must_use]
    pub fn placeholder_slot(&self) -> Option<(TaskStatus, usize)> {
        self.placeholder.and_then(|p| p.slot)
    }

    #[must_use]
    pub fn placeholder_visual(&self) -> Option<Visual> {
        self.placeholder.map(|p| p.visual)
    }

    /// Returns `true` while a settle sequence is running.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Hides the original card and creates the ghost and placeholder.
    ///
    /// The placeholder starts in `origin`, the card's own slot.
    pub fn begin<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        config: &DndConfig,
        element: NodeId,
        rect: Rect,
        origin: (TaskStatus, usize),
        now: Instant,
    ) {
        self.original = Some(element);
        self.original_rect = Some(rect);
        self.last_slot_rect = Some(rect);

        if config.ghost.enabled {
            match scene.clone_visual(element, config.ghost.class_name.as_deref()) {
                Some(node) => {
                    let visual = Visual {
                        rect: Some(rect),
                        opacity: config.ghost.opacity,
                        scale: config.ghost.scale,
                        rotation: GHOST_TILT,
                        z_index: Some(config.ghost.z_index),
                        pointer_events: false,
                    };
                    scene.set_visual(node, &visual);
                    self.ghost = Some(Ghost { node, visual });
                }
                None => debug!(%element, "element could not be cloned, dragging without ghost"),
            }
        }

        if config.placeholder.enabled {
            let height = match config.placeholder.height {
                PlaceholderHeight::Auto => rect.height,
                PlaceholderHeight::Fixed(height) => height,
            };
            let style = PlaceholderStyle {
                width: rect.width,
                height,
                background_color: config.placeholder.background_color.clone(),
                border_style: config.placeholder.border_style.clone(),
            };
            let node = scene.create_placeholder(&style);
            let hidden = Visual {
                opacity: 0.0,
                scale: 0.95,
                pointer_events: false,
                ..Visual::default()
            };
            scene.set_visual(node, &hidden);
            self.placeholder = Some(Placeholder {
                node,
                slot: None,
                visual: hidden,
                entering: None,
            });
            self.move_placeholder(scene, config, origin.0, origin.1, rect, now);
        }

        if scene.contains(element) {
            scene.set_visual(
                element,
                &Visual {
                    opacity: SUPPRESSED_OPACITY,
                    scale: SUPPRESSED_SCALE,
                    pointer_events: false,
                    ..Visual::default()
                },
            );
        }
    }

    /// Moves the ghost towards `pointer - offset`.
    ///
    /// `smoothing` is the share of the remaining distance left for the next
    /// frame; 0 follows exactly. `elapsed` drives the wobble.
    pub fn follow<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        pointer: Point,
        offset: Point,
        smoothing: f64,
        elapsed: Duration,
    ) {
        let Some(ghost) = self.ghost.as_mut() else {
            return;
        };
        if !scene.contains(ghost.node) {
            return;
        }
        let Some(rect) = ghost.visual.rect else {
            return;
        };

        let target = pointer - offset;
        let keep = smoothing.clamp(0.0, 1.0);
        let x = target.x + (rect.x - target.x) * keep;
        let y = target.y + (rect.y - target.y) * keep;

        ghost.visual.rect = Some(rect.at(Point::new(x, y)));
        ghost.visual.rotation = GHOST_TILT + GHOST_WOBBLE * elapsed.as_secs_f64().sin();
        scene.set_visual(ghost.node, &ghost.visual);
    }

    /// Re-inserts the placeholder when the slot changes.
    ///
    /// Returns `true` if it moved.
    pub fn move_placeholder<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        config: &DndConfig,
        column: TaskStatus,
        index: usize,
        slot_rect: Rect,
        now: Instant,
    ) -> bool {
        self.last_slot_rect = Some(slot_rect);
        let Some(placeholder) = self.placeholder.as_mut() else {
            return false;
        };
        if placeholder.slot == Some((column, index)) || !scene.contains(placeholder.node) {
            return false;
        }

        scene.detach(placeholder.node);
        scene.insert_placeholder(placeholder.node, column, index);
        trace!(?column, index, "placeholder moved");

        let from = Visual {
            opacity: 0.0,
            scale: if placeholder.slot.is_none() { 0.95 } else { 0.8 },
            pointer_events: false,
            ..Visual::default()
        };
        let to = Visual {
            opacity: config.placeholder.opacity,
            ..from
        }
        .with_scale(1.0);
        placeholder.slot = Some((column, index));
        placeholder.visual = from;
        placeholder.entering = Some((
            Tween {
                from,
                to,
                duration: Duration::from_millis(config.placeholder.animation_duration_ms),
                easing: Easing::EaseOutExpo,
            },
            now,
        ));
        scene.set_visual(placeholder.node, &from);
        true
    }

    /// Advances the placeholder's entrance and any settle sequence.
    ///
    /// Returns `true` when a settle sequence has just completed.
    pub fn tick<S: Scene + ?Sized>(&mut self, scene: &mut S, now: Instant) -> bool {
        if let Some(placeholder) = self.placeholder.as_mut()
            && let Some((tween, started)) = placeholder.entering
        {
            let (visual, done) = tween.sample(now.saturating_duration_since(started));
            placeholder.visual = visual;
            if done {
                placeholder.entering = None;
            }
            if scene.contains(placeholder.node) {
                scene.set_visual(placeholder.node, &visual);
            }
        }

        let Some(mut settle) = self.settle.take() else {
            return false;
        };
        let ghost = self.ghost.map(|g| g.visual);
        let placeholder = self.placeholder.map(|p| p.visual);
        let frames = settle.advance(now, |part| match part {
            Part::Ghost => ghost,
            Part::Placeholder => placeholder,
        });
        for frame in frames {
            self.apply_frame(scene, frame);
        }

        if settle.is_finished() {
            true
        } else {
            self.settle = Some(settle);
            false
        }
    }

    fn apply_frame<S: Scene + ?Sized>(&mut self, scene: &mut S, frame: Frame<Part>) {
        match frame {
            Frame::Update { target, visual } => {
                let node = match target {
                    Part::Ghost => self.ghost.as_mut().map(|g| {
                        g.visual = visual;
                        g.node
                    }),
                    Part::Placeholder => self.placeholder.as_mut().map(|p| {
                        p.visual = visual;
                        p.node
                    }),
                };
                if let Some(node) = node.filter(|n| scene.contains(*n)) {
                    scene.set_visual(node, &visual);
                }
            }
            Frame::Finished {
                target,
                then: AfterStep::Remove,
            } => match target {
                Part::Ghost => self.remove_ghost(scene),
                Part::Placeholder => self.remove_placeholder(scene),
            },
            Frame::Finished { .. } => {}
        }
    }

    /// Where the dragged card will land, in host units.
    fn landing_rect<S: Scene + ?Sized>(&self, scene: &S) -> Option<Rect> {
        self.placeholder
            .and_then(|p| scene.node_bounds(p.node))
            .or(self.last_slot_rect)
            .or(self.original_rect)
    }

    /// Starts the drop settle.
    ///
    /// The ghost glides onto the placeholder, the placeholder firms up with
    /// a small bounce, then both fade out and are removed.
    pub fn start_drop<S: Scene + ?Sized>(&mut self, scene: &mut S, now: Instant) {
        let mut steps = Vec::new();
        let landing = self.landing_rect(&*scene);

        if let Some(ghost) = self.ghost {
            let arrived = Visual {
                rect: landing.or(ghost.visual.rect),
                rotation: 0.0,
                scale: 1.0,
                opacity: 0.8,
                ..ghost.visual
            };
            steps.push(Step::new(Part::Ghost, arrived, 400, Easing::EaseOutExpo));
        }
        if let Some(placeholder) = self.placeholder {
            let solid = Visual {
                opacity: 1.0,
                ..placeholder.visual
            }
            .with_scale(1.02);
            steps.push(Step::new(Part::Placeholder, solid, 200, Easing::EaseOutBack));
            steps.push(Step::new(
                Part::Placeholder,
                solid.with_scale(1.0),
                150,
                Easing::EaseOutExpo,
            ));
        }
        if let Some(ghost) = self.ghost {
            let gone = Visual {
                rect: landing.or(ghost.visual.rect),
                opacity: 0.0,
                scale: 0.8,
                rotation: 0.0,
                ..ghost.visual
            };
            steps.push(Step::new(Part::Ghost, gone, 200, Easing::EaseInExpo).then_remove());
        }
        if let Some(placeholder) = self.placeholder {
            let gone = Visual {
                opacity: 0.0,
                ..placeholder.visual
            }
            .with_scale(0.9);
            steps.push(Step::new(Part::Placeholder, gone, 150, Easing::EaseInExpo).then_remove());
        }

        debug!(steps = steps.len(), "drop settle started");
        self.placeholder_stop_entering();
        self.settle = Some(Sequence::new(steps, now));
    }

    /// Starts the cancel settle.
    ///
    /// The placeholder goes back to `origin`, the ghost springs back onto
    /// it and fades, then the placeholder fades and is removed.
    pub fn start_cancel<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        config: &DndConfig,
        origin: (TaskStatus, usize),
        now: Instant,
    ) {
        if let Some(rect) = self.original_rect {
            self.move_placeholder(scene, config, origin.0, origin.1, rect, now);
        }
        self.placeholder_stop_entering();

        let mut steps = Vec::new();
        let landing = self.landing_rect(&*scene).or(self.original_rect);

        if let Some(ghost) = self.ghost {
            let back = Visual {
                rect: landing.or(ghost.visual.rect),
                rotation: 0.0,
                scale: 0.95,
                opacity: 0.5,
                ..ghost.visual
            };
            steps.push(Step::new(Part::Ghost, back, 400, Easing::EaseOutBack));
            let gone = Visual {
                opacity: 0.0,
                scale: 0.8,
                rotation: -5.0,
                ..back
            };
            steps.push(Step::new(Part::Ghost, gone, 200, Easing::EaseInExpo).then_remove());
        }
        if let Some(placeholder) = self.placeholder {
            let gone = Visual {
                opacity: 0.0,
                ..placeholder.visual
            }
            .with_scale(0.9);
            steps.push(Step::new(Part::Placeholder, gone, 150, Easing::EaseInExpo).then_remove());
        }

        debug!(steps = steps.len(), "cancel settle started");
        self.settle = Some(Sequence::new(steps, now));
    }

    fn placeholder_stop_entering(&mut self) {
        if let Some(placeholder) = self.placeholder.as_mut()
            && let Some((tween, _)) = placeholder.entering.take()
        {
            placeholder.visual = tween.to;
        }
    }

    fn remove_ghost<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        if let Some(ghost) = self.ghost.take()
            && scene.contains(ghost.node)
        {
            scene.remove(ghost.node);
        }
    }

    fn remove_placeholder<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        if let Some(placeholder) = self.placeholder.take()
            && scene.contains(placeholder.node)
        {
            scene.remove(placeholder.node);
        }
    }

    /// Removes every node this layer created and restores the original card.
    ///
    /// Safe to call any number of times.
    pub fn cleanup<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        self.settle = None;
        self.remove_ghost(scene);
        self.remove_placeholder(scene);
        if let Some(original) = self.original.take()
            && scene.contains(original)
        {
            scene.clear_visual(original);
        }
        self.original_rect = None;
        self.last_slot_rect = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockSurface;

    /// Lifts the `index`-th card of the first column.
    fn lift(
        layer: &mut VisualLayer,
        surface: &mut MockSurface,
        config: &DndConfig,
        index: usize,
        now: Instant,
    ) {
        let element = surface.card_node(0, index);
        let rect = surface.rect_of(element);
        layer.begin(surface, config, element, rect, (TaskStatus::Todo, index), now);
    }

    fn begin(layer: &mut VisualLayer, surface: &mut MockSurface, config: &DndConfig, now: Instant) {
        lift(layer, surface, config, 1, now);
    }

    #[test]
    fn begin_creates_ghost_and_placeholder_and_hides_card() {
        let mut surface = MockSurface::with_counts(&[3, 1, 0, 0]);
        let mut layer = VisualLayer::new();
        let config = DndConfig::default();
        let now = Instant::now();
        begin(&mut layer, &mut surface, &config, now);

        let ghost = layer.ghost().unwrap();
        assert!(surface.contains(ghost));
        let visual = layer.ghost_visual().unwrap();
        assert_eq!(visual.opacity, config.ghost.opacity);
        assert_eq!(visual.z_index, Some(9999));
        assert_eq!(surface.class_of(ghost), Some("board-drag-ghost".to_string()));

        assert_eq!(layer.placeholder_slot(), Some((TaskStatus::Todo, 1)));
        let original = surface.card_node(0, 1);
        let hidden = surface.visual_of(original).unwrap();
        assert_eq!(hidden.opacity, SUPPRESSED_OPACITY);
        assert!(!hidden.pointer_events);
    }

    #[test]
    fn disabled_parts_are_not_created() {
        let mut surface = MockSurface::with_counts(&[2, 0, 0, 0]);
        let mut layer = VisualLayer::new();
        let mut config = DndConfig::default();
        config.ghost.enabled = false;
        config.placeholder.enabled = false;
        begin(&mut layer, &mut surface, &config, Instant::now());

        assert!(layer.ghost().is_none());
        assert!(layer.placeholder().is_none());
        assert_eq!(surface.created_nodes(), 0);
    }

    #[test]
    fn follow_without_smoothing_is_exact() {
        let mut surface = MockSurface::with_counts(&[2, 0, 0, 0]);
        let mut layer = VisualLayer::new();
        let config = DndConfig::default();
        begin(&mut layer, &mut surface, &config, Instant::now());

        layer.follow(
            &mut surface,
            Point::new(300.0, 400.0),
            Point::new(10.0, 20.0),
            0.0,
            Duration::ZERO,
        );
        let visual = layer.ghost_visual().unwrap();
        assert_eq!(visual.rect.unwrap().origin(), Point::new(290.0, 380.0));
        assert_eq!(visual.rotation, GHOST_TILT);
    }

    #[test]
    fn follow_with_smoothing_lags_behind() {
        let mut surface = MockSurface::with_counts(&[2, 0, 0, 0]);
        let mut layer = VisualLayer::new();
        let config = DndConfig::default();
        begin(&mut layer, &mut surface, &config, Instant::now());
        let start = layer.ghost_visual().unwrap().rect.unwrap().origin();

        let target = start.offset_by(100.0, 0.0);
        layer.follow(&mut surface, target, Point::default(), 0.5, Duration::ZERO);
        let moved = layer.ghost_visual().unwrap().rect.unwrap().origin();
        assert_eq!(moved, start.offset_by(50.0, 0.0));
    }

    #[test]
    fn placeholder_reinserted_only_on_change() {
        let mut surface = MockSurface::with_counts(&[3, 1, 0, 0]);
        let mut layer = VisualLayer::new();
        let config = DndConfig::default();
        let now = Instant::now();
        begin(&mut layer, &mut surface, &config, now);
        let inserts = surface.insert_count();

        let rect = Rect::default();
        assert!(!layer.move_placeholder(&mut surface, &config, TaskStatus::Todo, 1, rect, now));
        let column = TaskStatus::InProgress;
        assert!(layer.move_placeholder(&mut surface, &config, column, 0, rect, now));
        assert_eq!(surface.insert_count(), inserts + 1);
        assert_eq!(
            surface.placeholder_slot(layer.placeholder().unwrap()),
            Some((TaskStatus::InProgress, 0))
        );
    }

    #[test]
    fn placeholder_fades_in() {
        let mut surface = MockSurface::with_counts(&[1, 0, 0, 0]);
        let mut layer = VisualLayer::new();
        let config = DndConfig::default();
        let now = Instant::now();
        lift(&mut layer, &mut surface, &config, 0, now);
        assert_eq!(layer.placeholder_slot(), Some((TaskStatus::Todo, 0)));
        assert_eq!(layer.placeholder_visual().unwrap().opacity, 0.0);

        layer.tick(&mut surface, now + Duration::from_secs(1));
        let visual = layer.placeholder_visual().unwrap();
        assert_eq!(visual.opacity, config.placeholder.opacity);
        assert_eq!(visual.scale, 1.0);
    }

    #[test]
    fn drop_settle_removes_everything() {
        let mut surface = MockSurface::with_counts(&[3, 0, 0, 0]);
        let mut layer = VisualLayer::new();
        let config = DndConfig::default();
        let now = Instant::now();
        begin(&mut layer, &mut surface, &config, now);

        layer.start_drop(&mut surface, now);
        assert!(layer.is_settling());
        assert!(!layer.tick(&mut surface, now + Duration::from_millis(100)));
        assert!(layer.ghost().is_some());

        // 400 + 200 + 150 + 200 + 150
        assert!(layer.tick(&mut surface, now + Duration::from_millis(1100)));
        assert!(layer.ghost().is_none());
        assert!(layer.placeholder().is_none());
        assert_eq!(surface.live_nodes(), 0);
    }

    #[test]
    fn cancel_moves_placeholder_home_first() {
        let mut surface = MockSurface::with_counts(&[3, 1, 0, 0]);
        let mut layer = VisualLayer::new();
        let config = DndConfig::default();
        let now = Instant::now();
        begin(&mut layer, &mut surface, &config, now);
        let rect = Rect::default();
        layer.move_placeholder(&mut surface, &config, TaskStatus::InProgress, 1, rect, now);

        layer.start_cancel(&mut surface, &config, (TaskStatus::Todo, 1), now);
        assert_eq!(layer.placeholder_slot(), Some((TaskStatus::Todo, 1)));
        assert!(layer.tick(&mut surface, now + Duration::from_secs(2)));
        assert_eq!(surface.live_nodes(), 0);
    }

    #[test]
    fn cleanup_is_idempotent_and_restores_card() {
        let mut surface = MockSurface::with_counts(&[2, 0, 0, 0]);
        let mut layer = VisualLayer::new();
        let config = DndConfig::default();
        begin(&mut layer, &mut surface, &config, Instant::now());

        layer.cleanup(&mut surface);
        let removed = surface.remove_count();
        layer.cleanup(&mut surface);

        assert_eq!(surface.remove_count(), removed);
        assert_eq!(surface.live_nodes(), 0);
        assert_eq!(surface.visual_of(surface.card_node(0, 1)), None);
    }

    #[test]
    fn nodes_removed_by_host_are_tolerated() {
        let mut surface = MockSurface::with_counts(&[2, 0, 0, 0]);
        let mut layer = VisualLayer::new();
        let config = DndConfig::default();
        let now = Instant::now();
        begin(&mut layer, &mut surface, &config, now);

        let ghost = layer.ghost().unwrap();
        surface.remove(ghost);
        layer.follow(&mut surface, Point::new(5.0, 5.0), Point::default(), 0.0, Duration::ZERO);
        layer.start_drop(&mut surface, now);
        assert!(layer.tick(&mut surface, now + Duration::from_secs(2)));
        layer.cleanup(&mut surface);
        assert_eq!(surface.live_nodes(), 0);
    }
}
