//! Test utilities for the DnD crate.
//!
//! [`MockSurface`] is an in-memory host laid out with the
//! [`fixtures`](crate::geometry::fixtures) geometry. It implements all three
//! capability traits and records what the engine did to it.

use std::collections::{HashMap, HashSet};

use snapboard_protocol::{Board, Task, TaskId, TaskStatus};

use crate::animation::Visual;
use crate::autoscroll::Scroller;
use crate::geometry::fixtures::{card_rect, column_left, column_rect, list_rect, COLUMN_WIDTH};
use crate::geometry::{CardBox, MeasurableSurface, NodeId, Point, Rect};
use crate::visual::{PlaceholderStyle, Scene};

const FIRST_CREATED_NODE: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Ghost,
    Placeholder,
    LiveRegion,
}

#[derive(Debug, Clone)]
struct MockNode {
    kind: NodeKind,
    rect: Option<Rect>,
    visual: Option<Visual>,
    class: Option<String>,
    slot: Option<(TaskStatus, usize)>,
    height: f64,
    text: String,
}

impl MockNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            rect: None,
            visual: None,
            class: None,
            slot: None,
            height: 0.0,
            text: String::new(),
        }
    }
}

/// An in-memory board host.
#[derive(Debug, Clone)]
pub(crate) struct MockSurface {
    board: Board,
    card_nodes: HashMap<TaskId, NodeId>,
    removed_cards: HashSet<NodeId>,
    card_visuals: HashMap<NodeId, Visual>,
    nodes: HashMap<NodeId, MockNode>,
    next_node: u64,
    created: usize,
    inserts: usize,
    removes: usize,
    scroll: Point,
    scrolls: Vec<(f64, f64)>,
}

impl MockSurface {
    /// A board with `counts[i]` cards in the `i`-th column, titled `A`, `B`,
    /// `C`... in column order.
    pub fn with_counts(counts: &[usize]) -> Self {
        let mut board = Board::new();
        let mut letter = b'A';
        for (column, &count) in counts.iter().enumerate() {
            let status = TaskStatus::from_index(column).expect("at most four columns");
            for _ in 0..count {
                let id = TaskId::from_u128(u128::from(letter));
                let title = char::from(letter).to_string();
                board.add_task(Task::with_id(id, title).with_status(status));
                letter += 1;
            }
        }
        Self::from_board(board)
    }

    pub fn from_board(board: Board) -> Self {
        let mut card_nodes = HashMap::new();
        let mut next = 1;
        for status in TaskStatus::all() {
            for task in board.tasks(status) {
                card_nodes.insert(task.id, NodeId(next));
                next += 1;
            }
        }
        Self {
            board,
            card_nodes,
            removed_cards: HashSet::new(),
            card_visuals: HashMap::new(),
            nodes: HashMap::new(),
            next_node: FIRST_CREATED_NODE,
            created: 0,
            inserts: 0,
            removes: 0,
            scroll: Point::default(),
            scrolls: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Applies a move the way a host reacting to a drop would.
    pub fn move_task(&mut self, id: TaskId, column: TaskStatus, index: usize) {
        self.board.move_task(id, column, index).expect("task exists");
    }

    pub fn task(&self, column: usize, index: usize) -> Task {
        self.board
            .tasks(status(column))
            .get(index)
            .unwrap_or_else(|| panic!("column {column} has no card at {index}"))
            .clone()
    }

    pub fn card_node(&self, column: usize, index: usize) -> NodeId {
        self.card_nodes[&self.task(column, index).id]
    }

    pub fn rect_of(&self, node: NodeId) -> Rect {
        self.element_bounds(node).expect("node has bounds")
    }

    /// Centre of a card on screen.
    pub fn card_center(&self, column: usize, index: usize) -> Point {
        self.rect_of(self.card_node(column, index)).center()
    }

    /// Horizontal centre of a column on screen.
    pub fn column_center_x(&self, column: usize) -> f64 {
        column_left(column) + COLUMN_WIDTH / 2.0 - self.scroll.x
    }

    /// Simulates the host removing a card element mid-drag.
    pub fn remove_card(&mut self, column: usize, index: usize) {
        let node = self.card_node(column, index);
        self.removed_cards.insert(node);
    }

    pub fn class_of(&self, node: NodeId) -> Option<String> {
        self.nodes.get(&node).and_then(|n| n.class.clone())
    }

    pub fn visual_of(&self, node: NodeId) -> Option<Visual> {
        match self.nodes.get(&node) {
            Some(created) => created.visual,
            None => self.card_visuals.get(&node).copied(),
        }
    }

    /// Number of nodes ever created through [`Scene`].
    pub fn created_nodes(&self) -> usize {
        self.created
    }

    /// Number of created nodes still alive.
    pub fn live_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn insert_count(&self) -> usize {
        self.inserts
    }

    pub fn remove_count(&self) -> usize {
        self.removes
    }

    pub fn placeholder_slot(&self, node: NodeId) -> Option<(TaskStatus, usize)> {
        self.nodes.get(&node).and_then(|n| n.slot)
    }

    pub fn has_ghost(&self) -> bool {
        self.nodes.values().any(|n| n.kind == NodeKind::Ghost)
    }

    pub fn has_placeholder(&self) -> bool {
        self.nodes.values().any(|n| n.kind == NodeKind::Placeholder)
    }

    /// Text of the live region, if one exists.
    pub fn live_text(&self) -> Option<String> {
        self.nodes
            .values()
            .find(|n| n.kind == NodeKind::LiveRegion)
            .map(|n| n.text.clone())
    }

    pub fn scrolls(&self) -> &[(f64, f64)] {
        &self.scrolls
    }

    fn create(&mut self, node: MockNode) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.created += 1;
        self.nodes.insert(id, node);
        id
    }

    fn shifted(&self, rect: Rect) -> Rect {
        rect.at(rect.origin() - self.scroll)
    }

    fn locate_card(&self, node: NodeId) -> Option<(usize, usize)> {
        if self.removed_cards.contains(&node) {
            return None;
        }
        TaskStatus::all().into_iter().find_map(|status| {
            self.board
                .tasks(status)
                .iter()
                .position(|task| self.card_nodes.get(&task.id) == Some(&node))
                .map(|index| (status.index(), index))
        })
    }
}

fn status(column: usize) -> TaskStatus {
    TaskStatus::from_index(column).expect("column in range")
}

impl MeasurableSurface for MockSurface {
    fn columns(&self) -> Vec<TaskStatus> {
        TaskStatus::all().to_vec()
    }

    fn column_bounds(&self, column: TaskStatus) -> Option<Rect> {
        Some(self.shifted(column_rect(column.index())))
    }

    fn list_bounds(&self, column: TaskStatus) -> Option<Rect> {
        Some(self.shifted(list_rect(column.index())))
    }

    fn cards(&self, column: TaskStatus) -> Vec<CardBox> {
        self.board
            .tasks(column)
            .iter()
            .enumerate()
            .filter_map(|(index, task)| {
                let node = self.card_nodes[&task.id];
                (!self.removed_cards.contains(&node)).then(|| CardBox {
                    task_id: task.id,
                    node,
                    rect: self.shifted(card_rect(column.index(), index)),
                })
            })
            .collect()
    }

    fn element_bounds(&self, node: NodeId) -> Option<Rect> {
        if let Some((column, index)) = self.locate_card(node) {
            return Some(self.shifted(card_rect(column, index)));
        }
        self.node_bounds(node)
    }
}

impl Scene for MockSurface {
    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node) || self.locate_card(node).is_some()
    }

    fn clone_visual(&mut self, element: NodeId, class_name: Option<&str>) -> Option<NodeId> {
        let rect = self.element_bounds(element)?;
        let mut ghost = MockNode::new(NodeKind::Ghost);
        ghost.rect = Some(rect);
        ghost.class = class_name.map(str::to_string);
        Some(self.create(ghost))
    }

    fn create_placeholder(&mut self, style: &PlaceholderStyle) -> NodeId {
        let mut placeholder = MockNode::new(NodeKind::Placeholder);
        placeholder.height = style.height;
        self.create(placeholder)
    }

    fn insert_placeholder(&mut self, node: NodeId, column: TaskStatus, index: usize) {
        if let Some(placeholder) = self.nodes.get_mut(&node) {
            placeholder.slot = Some((column, index));
            self.inserts += 1;
        }
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(placeholder) = self.nodes.get_mut(&node) {
            placeholder.slot = None;
        }
    }

    fn remove(&mut self, node: NodeId) {
        if self.nodes.remove(&node).is_some() {
            self.removes += 1;
        } else if self.locate_card(node).is_some() {
            self.removed_cards.insert(node);
            self.removes += 1;
        }
    }

    fn node_bounds(&self, node: NodeId) -> Option<Rect> {
        let created = self.nodes.get(&node)?;
        match created.kind {
            NodeKind::Ghost => created.visual.and_then(|v| v.rect).or(created.rect),
            NodeKind::Placeholder => created.slot.map(|(column, index)| {
                let rect = self.shifted(card_rect(column.index(), index));
                Rect::new(rect.x, rect.y, rect.width, created.height)
            }),
            NodeKind::LiveRegion => None,
        }
    }

    fn set_visual(&mut self, node: NodeId, visual: &Visual) {
        match self.nodes.get_mut(&node) {
            Some(created) => created.visual = Some(*visual),
            None => {
                self.card_visuals.insert(node, *visual);
            }
        }
    }

    fn clear_visual(&mut self, node: NodeId) {
        match self.nodes.get_mut(&node) {
            Some(created) => created.visual = None,
            None => {
                self.card_visuals.remove(&node);
            }
        }
    }

    fn create_live_region(&mut self) -> NodeId {
        self.create(MockNode::new(NodeKind::LiveRegion))
    }

    fn set_live_text(&mut self, node: NodeId, text: &str) {
        if let Some(region) = self.nodes.get_mut(&node) {
            region.text = text.to_string();
        }
    }
}

impl Scroller for MockSurface {
    fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 1000.0)
    }

    fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.scroll = self.scroll.offset_by(dx, dy);
        self.scrolls.push((dx, dy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_card_column_has_only_index_zero() {
        let surface = MockSurface::with_counts(&[1, 0, 0, 0]);
        assert_eq!(surface.task(0, 0).title, "A");
        assert_eq!(surface.card_center(0, 0), card_rect(0, 0).center());
    }

    #[test]
    #[should_panic(expected = "column 0 has no card at 1")]
    fn missing_card_names_the_slot() {
        let surface = MockSurface::with_counts(&[1, 0, 0, 0]);
        let _ = surface.task(0, 1);
    }
}
