//! Drop-target geometry.
//!
//! The engine never reads layout directly. A host implements
//! [`MeasurableSurface`] and [`calculate_columns`] turns what it reports into
//! a snapshot of columns and slots. The snapshot is rebuilt wholesale on
//! drag start and whenever the host reports a layout change.

use snapboard_config::GridConfig;
use snapboard_protocol::{TaskId, TaskStatus};

/// Distance between a list container's top edge and the trailing slot of an
/// empty column.
pub const LIST_TOP_PADDING: f64 = 16.0;

/// A point in host units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn offset_by(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned rectangle in host units.
///
/// # Examples
///
/// ```
/// use snapboard_dnd::Rect;
///
/// let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
/// assert_eq!(rect.right(), 110.0);
/// assert_eq!(rect.center().y, 40.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn left(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub const fn top(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns `true` if `point` lies inside (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Moves the rectangle so its top-left corner is `origin`.
    #[must_use]
    pub const fn at(&self, origin: Point) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }
}

/// Identifies a node in the host's scene: a card, a clone, a placeholder or
/// the live region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rendered card as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardBox {
    pub task_id: TaskId,
    pub node: NodeId,
    pub rect: Rect,
}

/// Read access to the host's layout.
pub trait MeasurableSurface {
    /// Column identifiers present on the surface, in visual order.
    fn columns(&self) -> Vec<TaskStatus>;

    /// Bounds of the whole column container.
    fn column_bounds(&self, column: TaskStatus) -> Option<Rect>;

    /// Bounds of the card list inside the column.
    fn list_bounds(&self, column: TaskStatus) -> Option<Rect>;

    /// Cards of the column in visual order. Placeholders are not cards.
    fn cards(&self, column: TaskStatus) -> Vec<CardBox>;

    /// Current bounds of any node.
    fn element_bounds(&self, node: NodeId) -> Option<Rect>;
}

/// One addressable vertical position in a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotInfo {
    pub index: usize,
    pub bounds: Rect,
    pub center_y: f64,
    /// `false` only for the trailing "insert at end" slot.
    pub occupied: bool,
    pub task_id: Option<TaskId>,
}

/// A column and its slots at snapshot time.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSnapInfo {
    pub id: TaskStatus,
    pub bounds: Rect,
    pub center_x: f64,
    pub slots: Vec<SlotInfo>,
}

/// Builds the slot list for one column.
///
/// One occupied slot per card except `dragged`, then one trailing slot
/// placed `grid.gap` below the last card, or [`LIST_TOP_PADDING`] below the
/// list top when no card remains. With the grid disabled only the trailing
/// slot is produced, so drops append to the column.
#[must_use]
pub fn calculate_slots(
    cards: &[CardBox],
    list: Rect,
    dragged: Option<TaskId>,
    grid: &GridConfig,
    dragged_height: Option<f64>,
) -> Vec<SlotInfo> {
    let mut slots: Vec<SlotInfo> = Vec::with_capacity(cards.len() + 1);

    let remaining = cards.iter().filter(|card| Some(card.task_id) != dragged);
    let mut last_bottom = None;
    for card in remaining {
        last_bottom = Some(card.rect.bottom());
        if grid.enabled {
            slots.push(SlotInfo {
                index: slots.len(),
                bounds: card.rect,
                center_y: card.rect.center_y(),
                occupied: true,
                task_id: Some(card.task_id),
            });
        }
    }

    let top = match last_bottom {
        Some(bottom) => bottom + grid.gap,
        None => list.top() + LIST_TOP_PADDING,
    };
    let height = match dragged_height {
        Some(height) if grid.dynamic_height && height > 0.0 => height,
        _ => grid.slot_height,
    };
    let bounds = Rect::new(list.left(), top, list.width, height);
    slots.push(SlotInfo {
        index: slots.len(),
        bounds,
        center_y: bounds.center_y(),
        occupied: false,
        task_id: None,
    });

    slots
}

/// Snapshots every column the surface reports.
///
/// Columns without column or list bounds are skipped.
#[must_use]
pub fn calculate_columns<S: MeasurableSurface + ?Sized>(
    surface: &S,
    dragged: Option<TaskId>,
    grid: &GridConfig,
    dragged_height: Option<f64>,
) -> Vec<ColumnSnapInfo> {
    surface
        .columns()
        .into_iter()
        .filter_map(|id| {
            let bounds = surface.column_bounds(id)?;
            let list = surface.list_bounds(id)?;
            let cards = surface.cards(id);
            Some(ColumnSnapInfo {
                id,
                bounds,
                center_x: bounds.center_x(),
                slots: calculate_slots(&cards, list, dragged, grid, dragged_height),
            })
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn cards(column: usize, count: usize) -> Vec<CardBox> {
        (0..count)
            .map(|i| CardBox {
                task_id: TaskId::new_v4(),
                node: NodeId(i as u64),
                rect: card_rect(column, i),
            })
            .collect()
    }

    #[test]
    fn one_slot_per_card_plus_trailing() {
        let cards = cards(0, 3);
        let grid = GridConfig::default();
        let slots = calculate_slots(&cards, list_rect(0), None, &grid, None);

        assert_eq!(slots.len(), 4);
        assert!(slots[..3].iter().all(|s| s.occupied));
        assert_eq!(slots[1].task_id, Some(cards[1].task_id));
        assert_eq!(slots[1].center_y, card_rect(0, 1).center_y());

        let trailing = slots[3];
        assert!(!trailing.occupied);
        assert_eq!(trailing.index, 3);
        assert_eq!(trailing.bounds.top(), card_rect(0, 2).bottom() + grid.gap);
        assert_eq!(trailing.bounds.height, grid.slot_height);
        assert_eq!(trailing.bounds.left(), list_rect(0).left());
    }

    #[test]
    fn dragged_card_is_skipped_and_indices_stay_dense() {
        let cards = cards(0, 3);
        let grid = GridConfig::default();
        let slots = calculate_slots(&cards, list_rect(0), Some(cards[0].task_id), &grid, None);

        assert_eq!(slots.len(), 3);
        assert_eq!(
            slots.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(slots[0].task_id, Some(cards[1].task_id));
    }

    #[test]
    fn empty_column_has_padded_trailing_slot() {
        let grid = GridConfig::default();
        let slots = calculate_slots(&[], list_rect(2), None, &grid, None);

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].bounds.top(), LIST_TOP + LIST_TOP_PADDING);
    }

    #[test]
    fn dynamic_height_uses_dragged_card() {
        let cards = cards(0, 1);
        let mut grid = GridConfig::default();
        let slots = calculate_slots(&cards, list_rect(0), None, &grid, Some(CARD_HEIGHT));
        assert_eq!(slots[1].bounds.height, CARD_HEIGHT);

        grid.dynamic_height = false;
        let slots = calculate_slots(&cards, list_rect(0), None, &grid, Some(CARD_HEIGHT));
        assert_eq!(slots[1].bounds.height, grid.slot_height);
    }

    #[test]
    fn disabled_grid_only_appends() {
        let cards = cards(0, 2);
        let grid = GridConfig {
            enabled: false,
            ..GridConfig::default()
        };
        let slots = calculate_slots(&cards, list_rect(0), None, &grid, None);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].index, 0);
        assert_eq!(slots[0].bounds.top(), card_rect(0, 1).bottom() + grid.gap);
    }

    #[test]
    fn rect_helpers() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(!rect.contains(Point::new(10.1, 5.0)));
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
