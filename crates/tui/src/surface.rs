//! The board as a drag surface.
//!
//! [`BoardSurface`] owns the [`Board`] and lays it out on the terminal. It
//! implements the engine's capability traits in geometry units (see
//! [`CELL_WIDTH`](crate::layout::CELL_WIDTH) and [`CELL_HEIGHT`]) and keeps
//! the nodes the engine creates (ghost, placeholder, live region) as
//! overlays the widgets draw.
//!
//! Columns stack their cards top to bottom. While a placeholder is attached
//! the dragged card leaves the flow and the placeholder stands in its slot;
//! cards after it shift down.

use std::collections::{BTreeMap, HashMap};

use ratatui::layout::{Constraint, Layout, Margin};
use snapboard_dnd::{
    CardBox, Grab, MeasurableSurface, NodeId, PlaceholderStyle, Point, Rect, Scene, Scroller,
    Visual,
};
use snapboard_protocol::{Board, TaskId, TaskStatus};
use tracing::{debug, trace};

use crate::layout::{CELL_HEIGHT, TASK_CARD_HEIGHT, cells_to_units};

/// Height of a card in geometry units.
pub const CARD_HEIGHT: f64 = TASK_CARD_HEIGHT as f64 * CELL_HEIGHT;

/// A node the engine created on the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// The floating clone of a card.
    Ghost {
        task_id: TaskId,
        rect: Rect,
        visual: Option<Visual>,
        class_name: Option<String>,
    },
    /// The box marking where the card will land.
    Placeholder {
        slot: Option<(TaskStatus, usize)>,
        rows: u16,
        visual: Option<Visual>,
    },
    /// Text for assistive technology, shown in the status bar.
    LiveRegion { text: String },
}

/// One laid-out entry of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowEntry {
    Card {
        task_id: TaskId,
        node: NodeId,
        rect: Rect,
        /// The card is being dragged and stays in the flow only because no
        /// placeholder replaces it.
        lifted: bool,
    },
    Placeholder { node: NodeId, rect: Rect },
}

impl FlowEntry {
    #[must_use]
    pub const fn rect(&self) -> Rect {
        match self {
            Self::Card { rect, .. } | Self::Placeholder { rect, .. } => *rect,
        }
    }
}

/// The terminal board host.
///
/// # Examples
///
/// ```
/// use ratatui::layout::Rect;
/// use snapboard_dnd::MeasurableSurface;
/// use snapboard_protocol::{dummy::dummy_board, TaskStatus};
/// use snapboard_tui::BoardSurface;
///
/// let mut surface = BoardSurface::new(dummy_board());
/// surface.set_area(Rect::new(0, 0, 80, 24));
/// assert_eq!(surface.cards(TaskStatus::Todo).len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct BoardSurface {
    board: Board,
    area: ratatui::layout::Rect,
    scroll: f64,
    card_nodes: HashMap<TaskId, NodeId>,
    card_visuals: HashMap<NodeId, Visual>,
    overlays: BTreeMap<NodeId, Overlay>,
    next_node: u64,
}

impl BoardSurface {
    #[must_use]
    pub fn new(board: Board) -> Self {
        let mut surface = Self {
            board: Board::new(),
            area: ratatui::layout::Rect::default(),
            scroll: 0.0,
            card_nodes: HashMap::new(),
            card_visuals: HashMap::new(),
            overlays: BTreeMap::new(),
            next_node: 1,
        };
        surface.replace_board(board);
        surface
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replaces the board. Card nodes are reassigned; overlays survive.
    pub fn replace_board(&mut self, board: Board) {
        self.board = board;
        self.card_nodes.clear();
        self.card_visuals.clear();
        self.sync_card_nodes();
        self.clamp_scroll();
    }

    /// Applies a drop to the board.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is no longer on the board.
    pub fn move_task(
        &mut self,
        id: TaskId,
        column: TaskStatus,
        index: usize,
    ) -> snapboard_protocol::Result<()> {
        self.board.move_task(id, column, index)?;
        self.clamp_scroll();
        Ok(())
    }

    /// Sets the board area in cells. Returns `true` if it changed.
    pub fn set_area(&mut self, area: ratatui::layout::Rect) -> bool {
        if self.area == area {
            return false;
        }
        trace!(?area, "board area changed");
        self.area = area;
        self.clamp_scroll();
        true
    }

    #[must_use]
    pub const fn area(&self) -> ratatui::layout::Rect {
        self.area
    }

    /// Vertical scroll in whole rows, expressed in geometry units.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        (self.scroll / CELL_HEIGHT).floor() * CELL_HEIGHT
    }

    /// Column rectangle in cells.
    #[must_use]
    pub fn column_cells(&self, column: TaskStatus) -> ratatui::layout::Rect {
        let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(self.area);
        columns[column.index()]
    }

    /// Card list rectangle in cells, inside the column border.
    #[must_use]
    pub fn list_cells(&self, column: TaskStatus) -> ratatui::layout::Rect {
        self.column_cells(column).inner(Margin::new(1, 1))
    }

    /// Node id of a task's card.
    #[must_use]
    pub fn card_node(&self, id: TaskId) -> Option<NodeId> {
        self.card_nodes.get(&id).copied()
    }

    /// Overlays in creation order.
    pub fn overlays(&self) -> impl Iterator<Item = (NodeId, &Overlay)> {
        self.overlays.iter().map(|(node, overlay)| (*node, overlay))
    }

    /// Current text of the live region, if any.
    #[must_use]
    pub fn live_text(&self) -> Option<&str> {
        self.overlays.values().find_map(|overlay| match overlay {
            Overlay::LiveRegion { text } if !text.is_empty() => Some(text.as_str()),
            _ => None,
        })
    }

    /// Lays out one column.
    ///
    /// While a placeholder is attached it takes over the lifted card's
    /// cell, so placeholder indices count only the cards left behind.
    #[must_use]
    pub fn flow(&self, column: TaskStatus) -> Vec<FlowEntry> {
        let list = cells_to_units(self.list_cells(column));
        let placeholder = self.overlays.iter().find_map(|(node, overlay)| match overlay {
            Overlay::Placeholder {
                slot: Some((status, index)),
                rows,
                ..
            } if *status == column => Some((*node, *index, *rows)),
            _ => None,
        });
        let placeholder_attached = self
            .overlays
            .values()
            .any(|o| matches!(o, Overlay::Placeholder { slot: Some(_), .. }));

        let mut entries = Vec::new();
        let mut top = list.top() - self.scroll_offset();
        let mut index = 0;
        let mut pending = placeholder;
        let place = |entries: &mut Vec<FlowEntry>, top: &mut f64, node: NodeId, rows: u16| {
            let height = f64::from(rows) * CELL_HEIGHT;
            entries.push(FlowEntry::Placeholder {
                node,
                rect: Rect::new(list.left(), *top, list.width, height),
            });
            *top += height;
        };

        for task in self.board.tasks(column) {
            let Some(node) = self.card_node(task.id) else {
                continue;
            };
            let lifted = self.card_visuals.contains_key(&node);
            if lifted && placeholder_attached {
                continue;
            }
            if !lifted {
                if let Some((p, at, rows)) = pending
                    && at == index
                {
                    place(&mut entries, &mut top, p, rows);
                    pending = None;
                }
                index += 1;
            }
            entries.push(FlowEntry::Card {
                task_id: task.id,
                node,
                rect: Rect::new(list.left(), top, list.width, CARD_HEIGHT),
                lifted,
            });
            top += CARD_HEIGHT;
        }
        if let Some((p, _, rows)) = pending {
            place(&mut entries, &mut top, p, rows);
        }
        entries
    }

    /// The visible card under `point`, ready to be picked up.
    #[must_use]
    pub fn card_at(&self, point: Point) -> Option<Grab> {
        TaskStatus::all().into_iter().find_map(|column| {
            let list = cells_to_units(self.list_cells(column));
            if !list.contains(point) {
                return None;
            }
            self.flow(column).into_iter().find_map(|entry| match entry {
                FlowEntry::Card {
                    task_id,
                    node,
                    rect,
                    ..
                } if rect.contains(point) => self.board.get_task(task_id).map(|task| Grab {
                    task: task.clone(),
                    element: node,
                }),
                _ => None,
            })
        })
    }

    /// The card at `index` in `column`, for keyboard pickup.
    #[must_use]
    pub fn grab(&self, column: TaskStatus, index: usize) -> Option<Grab> {
        let task = self.board.tasks(column).get(index)?;
        Some(Grab {
            task: task.clone(),
            element: self.card_node(task.id)?,
        })
    }

    /// Visual override of a card, set while it is being dragged.
    #[must_use]
    pub fn card_visual(&self, node: NodeId) -> Option<&Visual> {
        self.card_visuals.get(&node)
    }

    fn sync_card_nodes(&mut self) {
        for column in TaskStatus::all() {
            for task in self.board.tasks(column) {
                if !self.card_nodes.contains_key(&task.id) {
                    let node = NodeId(self.next_node);
                    self.next_node += 1;
                    self.card_nodes.insert(task.id, node);
                }
            }
        }
    }

    fn task_of(&self, node: NodeId) -> Option<TaskId> {
        self.card_nodes
            .iter()
            .find(|(id, n)| **n == node && self.board.get_task(**id).is_some())
            .map(|(id, _)| *id)
    }

    fn max_scroll(&self) -> f64 {
        let visible = f64::from(self.list_cells(TaskStatus::Todo).height) * CELL_HEIGHT;
        let content = TaskStatus::all()
            .into_iter()
            .map(|column| self.board.tasks(column).len() + 1)
            .max()
            .unwrap_or(0) as f64
            * CARD_HEIGHT;
        (content - visible).max(0.0)
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
    }

    fn create(&mut self, overlay: Overlay) -> NodeId {
        let node = NodeId(self.next_node);
        self.next_node += 1;
        self.overlays.insert(node, overlay);
        node
    }
}

impl MeasurableSurface for BoardSurface {
    fn columns(&self) -> Vec<TaskStatus> {
        TaskStatus::all().to_vec()
    }

    fn column_bounds(&self, column: TaskStatus) -> Option<Rect> {
        (!self.area.is_empty()).then(|| cells_to_units(self.column_cells(column)))
    }

    fn list_bounds(&self, column: TaskStatus) -> Option<Rect> {
        (!self.area.is_empty()).then(|| cells_to_units(self.list_cells(column)))
    }

    fn cards(&self, column: TaskStatus) -> Vec<CardBox> {
        self.flow(column)
            .into_iter()
            .filter_map(|entry| match entry {
                FlowEntry::Card {
                    task_id,
                    node,
                    rect,
                    ..
                } => Some(CardBox { task_id, node, rect }),
                FlowEntry::Placeholder { .. } => None,
            })
            .collect()
    }

    fn element_bounds(&self, node: NodeId) -> Option<Rect> {
        if let Some(id) = self.task_of(node) {
            let (column, _) = self.board.locate(id)?;
            let flow = self.flow(column);
            let own = flow.iter().find_map(|entry| match entry {
                FlowEntry::Card { node: n, rect, .. } if *n == node => Some(*rect),
                _ => None,
            });
            // Out of flow while lifted: the placeholder holds its place.
            return own.or_else(|| {
                flow.iter().find_map(|entry| match entry {
                    FlowEntry::Placeholder { rect, .. } => Some(*rect),
                    FlowEntry::Card { .. } => None,
                })
            });
        }
        self.node_bounds(node)
    }
}

impl Scene for BoardSurface {
    fn contains(&self, node: NodeId) -> bool {
        self.overlays.contains_key(&node) || self.task_of(node).is_some()
    }

    fn clone_visual(&mut self, element: NodeId, class_name: Option<&str>) -> Option<NodeId> {
        let task_id = self.task_of(element)?;
        let rect = self.element_bounds(element)?;
        let node = self.create(Overlay::Ghost {
            task_id,
            rect,
            visual: None,
            class_name: class_name.map(str::to_string),
        });
        debug!(%element, ghost = %node, "ghost created");
        Some(node)
    }

    fn create_placeholder(&mut self, style: &PlaceholderStyle) -> NodeId {
        let rows = (style.height / CELL_HEIGHT).round().max(1.0) as u16;
        self.create(Overlay::Placeholder {
            slot: None,
            rows,
            visual: None,
        })
    }

    fn insert_placeholder(&mut self, node: NodeId, column: TaskStatus, index: usize) {
        if let Some(Overlay::Placeholder { slot, .. }) = self.overlays.get_mut(&node) {
            *slot = Some((column, index));
        }
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(Overlay::Placeholder { slot, .. }) = self.overlays.get_mut(&node) {
            *slot = None;
        }
    }

    fn remove(&mut self, node: NodeId) {
        if self.overlays.remove(&node).is_some() {
            trace!(%node, "overlay removed");
        }
    }

    fn node_bounds(&self, node: NodeId) -> Option<Rect> {
        match self.overlays.get(&node)? {
            Overlay::Ghost { rect, visual, .. } => visual.and_then(|v| v.rect).or(Some(*rect)),
            Overlay::Placeholder { slot, .. } => {
                let (column, _) = (*slot)?;
                self.flow(column).into_iter().find_map(|entry| match entry {
                    FlowEntry::Placeholder { node: n, rect } if n == node => Some(rect),
                    _ => None,
                })
            }
            Overlay::LiveRegion { .. } => None,
        }
    }

    fn set_visual(&mut self, node: NodeId, visual: &Visual) {
        match self.overlays.get_mut(&node) {
            Some(Overlay::Ghost { visual: v, .. } | Overlay::Placeholder { visual: v, .. }) => {
                *v = Some(*visual);
            }
            Some(Overlay::LiveRegion { .. }) => {}
            None => {
                if self.task_of(node).is_some() {
                    self.card_visuals.insert(node, *visual);
                }
            }
        }
    }

    fn clear_visual(&mut self, node: NodeId) {
        match self.overlays.get_mut(&node) {
            Some(Overlay::Ghost { visual, .. } | Overlay::Placeholder { visual, .. }) => {
                *visual = None;
            }
            Some(Overlay::LiveRegion { .. }) => {}
            None => {
                self.card_visuals.remove(&node);
            }
        }
    }

    fn create_live_region(&mut self) -> NodeId {
        self.create(Overlay::LiveRegion {
            text: String::new(),
        })
    }

    fn set_live_text(&mut self, node: NodeId, text: &str) {
        if let Some(Overlay::LiveRegion { text: current }) = self.overlays.get_mut(&node) {
            *current = text.to_string();
        }
    }
}

impl Scroller for BoardSurface {
    fn viewport(&self) -> Rect {
        cells_to_units(self.area)
    }

    fn scroll_by(&mut self, _dx: f64, dy: f64) {
        // The four columns always fit horizontally.
        self.scroll = (self.scroll + dy).clamp(0.0, self.max_scroll());
    }
}
