//! Main application struct and run loop.
//!
//! This module provides the `App` struct which wires terminal messages to
//! the drag engine, applies drops to the board, and renders the result.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use snapboard_config::DndConfig;
use snapboard_dnd::{
    Clock, DndEvent, DragEngine, DragKey, Grab, InputAdapter, InputOutcome, PointerId,
    PointerInput, SystemClock,
};
use snapboard_protocol::{Board, Message, PointerAction, dummy::dummy_board};
use tracing::{debug, info, instrument, trace, warn};

use crate::{
    AppState, BoardSurface,
    event::{FRAME_POLL_TIMEOUT, IDLE_POLL_TIMEOUT, event_to_message, poll_event},
    layout::{
        HEADER_HEIGHT, MIN_HEIGHT, MIN_HEIGHT_WITH_HEADER, MIN_WIDTH, STATUS_BAR_HEIGHT,
        cell_center,
    },
    terminal::AppTerminal,
    widgets::{render_board, render_status_bar},
};

/// The main application struct.
///
/// Owns the board surface, the drag engine driving it, and the keyboard
/// selection.
#[derive(Debug)]
pub struct App<C: Clock = SystemClock> {
    surface: BoardSurface,
    engine: DragEngine<C>,
    input: InputAdapter,
    state: AppState,
    should_quit: bool,
    /// Last known terminal area.
    last_area: Rect,
    /// Whether the header was shown in the last render.
    header_visible: bool,
    /// Whether the engine asked for more frames on the last tick.
    animating: bool,
}

impl App<SystemClock> {
    /// Creates a new application over `board`.
    ///
    /// # Examples
    ///
    /// ```
    /// use snapboard_config::DndConfig;
    /// use snapboard_protocol::dummy::dummy_board;
    /// use snapboard_tui::App;
    ///
    /// let app = App::new(dummy_board(), DndConfig::default());
    /// assert!(!app.should_quit());
    /// ```
    #[must_use]
    pub fn new(board: Board, config: DndConfig) -> Self {
        Self::with_clock(board, config, SystemClock)
    }
}

impl<C: Clock> App<C> {
    /// Creates a new application whose engine reads time from `clock`.
    #[must_use]
    pub fn with_clock(board: Board, config: DndConfig, clock: C) -> Self {
        Self {
            surface: BoardSurface::new(board),
            engine: DragEngine::with_clock(config, clock),
            input: InputAdapter::new(),
            state: AppState::new(),
            should_quit: false,
            last_area: Rect::default(),
            header_visible: true,
            animating: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn surface(&self) -> &BoardSurface {
        &self.surface
    }

    #[must_use]
    pub fn engine(&self) -> &DragEngine<C> {
        &self.engine
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Updates the application based on a message.
    ///
    /// While a card is held with the keyboard, the arrow keys move the card
    /// instead of the selection.
    pub fn update(&mut self, msg: Message) {
        match msg {
            Message::Quit => {
                self.should_quit = true;
            }
            Message::Escape => {
                let outcome = self.key(DragKey::Escape);
                if !outcome.is_consumed() {
                    self.state.clear_selection();
                }
            }
            Message::Select => {
                let outcome = self.key(DragKey::Enter);
                trace!(?outcome, "select");
            }
            Message::NavigateLeft
            | Message::NavigateRight
            | Message::NavigateUp
            | Message::NavigateDown => self.navigate(msg),
            Message::Pointer {
                action,
                column,
                row,
            } => self.handle_pointer(action, column, row),
            Message::Reset => {
                if self.engine.state().is_idle() {
                    info!("board reset");
                    self.surface.replace_board(dummy_board());
                    self.state = AppState::new();
                }
            }
            Message::Resize => {
                // The new size is picked up by the next render.
            }
        }
        self.apply_events();
    }

    fn navigate(&mut self, msg: Message) {
        if self.input.is_keyboard_drag() {
            let key = match msg {
                Message::NavigateLeft => DragKey::ArrowLeft,
                Message::NavigateRight => DragKey::ArrowRight,
                Message::NavigateUp => DragKey::ArrowUp,
                _ => DragKey::ArrowDown,
            };
            self.key(key);
            return;
        }
        if self.engine.is_dragging() {
            return;
        }
        let board = self.surface.board();
        match msg {
            Message::NavigateLeft => self.state.navigate_left(board),
            Message::NavigateRight => self.state.navigate_right(board),
            Message::NavigateUp => self.state.navigate_up(board),
            _ => self.state.navigate_down(board),
        }
    }

    fn focused_grab(&self) -> Option<Grab> {
        self.state
            .selected_task
            .and_then(|index| self.surface.grab(self.state.selected_column, index))
    }

    fn key(&mut self, key: DragKey) -> InputOutcome {
        let focused = self.focused_grab();
        self.input
            .key(&mut self.engine, &mut self.surface, key, focused.as_ref())
    }

    /// Feeds a mouse gesture at terminal coordinates to the input adapter.
    ///
    /// A click without a drag selects the card under the pointer.
    fn handle_pointer(&mut self, action: PointerAction, column: u16, row: u16) {
        let position = cell_center(column, row);
        let pointer = PointerId::Mouse;
        let input = match action {
            PointerAction::Press => PointerInput::Down {
                pointer,
                position,
                target: self.surface.card_at(position),
            },
            PointerAction::Drag => PointerInput::Move { pointer, position },
            PointerAction::Release => PointerInput::Up { pointer, position },
        };

        let outcome = self
            .input
            .pointer(&mut self.engine, &mut self.surface, input);
        if outcome == InputOutcome::Clicked
            && let Some(grab) = self.surface.card_at(position)
        {
            self.state.follow_task(self.surface.board(), grab.task.id);
        }
    }

    /// Applies drops to the board and logs the rest of the lifecycle.
    fn apply_events(&mut self) {
        for event in self.engine.drain_events() {
            match event {
                DndEvent::Drop(drop) => {
                    let id = drop.task.id;
                    match self
                        .surface
                        .move_task(id, drop.target_column, drop.target_index)
                    {
                        Ok(()) => {
                            info!(
                                task = %id,
                                from = %drop.source_column,
                                to = %drop.target_column,
                                index = drop.target_index,
                                "card moved"
                            );
                            self.state.follow_task(self.surface.board(), id);
                        }
                        Err(err) => warn!(%err, "drop could not be applied"),
                    }
                }
                DndEvent::Cancel(cancel) => {
                    debug!(reason = %cancel.reason, "drag cancelled");
                }
                other => trace!(event = other.name(), "drag event"),
            }
        }
    }

    /// Advances engine animations by one frame.
    pub fn tick(&mut self) {
        self.animating = self.engine.on_frame(&mut self.surface);
        self.apply_events();
    }

    fn needs_frames(&self) -> bool {
        self.animating || self.engine.is_dragging() || self.surface.live_text().is_some()
    }

    /// Renders the application UI to the given frame.
    ///
    /// Implements graceful degradation for small terminal sizes:
    /// - If terminal is below minimum dimensions, shows a "terminal too small" message.
    /// - If terminal is tight (below `MIN_HEIGHT_WITH_HEADER`), hides the header to reclaim space.
    /// - Otherwise, renders normally with header.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.last_area = area;

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.header_visible = false;
            if self.surface.set_area(Rect::default()) {
                self.engine.refresh_geometry(&mut self.surface);
            }
            self.render_terminal_too_small(frame, area);
            return;
        }

        let show_header = area.height >= MIN_HEIGHT_WITH_HEADER;
        self.header_visible = show_header;

        let content_area = if show_header {
            let [header, content] =
                Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
                    .areas(area);
            self.render_header(frame, header);
            content
        } else {
            area
        };

        let [board_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)])
                .areas(content_area);

        if self.surface.set_area(board_area) {
            self.engine.refresh_geometry(&mut self.surface);
        }

        let drag_target = self
            .engine
            .state()
            .target_column
            .filter(|_| self.engine.is_dragging());
        let buf = frame.buffer_mut();
        render_board(&self.surface, &self.state, drag_target, buf);
        render_status_bar(
            self.surface.live_text(),
            self.engine.phase(),
            status_area,
            buf,
        );
    }

    /// Renders a message indicating the terminal is too small.
    fn render_terminal_too_small(&self, frame: &mut Frame, area: Rect) {
        let message = format!(
            "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );

        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: false });

        let vertical_offset = area.height.saturating_sub(2) / 2;
        let centered_area = Rect {
            x: area.x,
            y: area.y + vertical_offset,
            width: area.width,
            height: area.height.saturating_sub(vertical_offset),
        };

        frame.render_widget(paragraph, centered_area);
    }

    /// Renders the header bar with the title and the card count.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, count_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(12)]).areas(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "snapboard",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled("Kanban Board", Style::default().fg(Color::White)),
        ]));
        frame.render_widget(title, title_area);

        let count = Paragraph::new(Span::styled(
            format!("{} cards", self.surface.board().total_tasks()),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right);
        frame.render_widget(count, count_area);
    }

    /// Runs the main application loop until the user quits.
    ///
    /// Polls quickly while a drag, a settle animation or an announcement
    /// needs frames, and slowly otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use snapboard_config::DndConfig;
    /// use snapboard_protocol::dummy::dummy_board;
    /// use snapboard_tui::{App, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(dummy_board(), DndConfig::default());
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip_all)]
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| self.view(frame))?;

            let timeout = if self.needs_frames() {
                FRAME_POLL_TIMEOUT
            } else {
                IDLE_POLL_TIMEOUT
            };
            if let Some(event) = poll_event(timeout)?
                && let Some(msg) = event_to_message(&event)
            {
                self.update(msg);
            }

            self.tick();

            if self.should_quit {
                break;
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Tears down any drag session and its overlays.
    pub fn shutdown(&mut self) {
        self.engine.teardown(&mut self.surface);
        self.input = InputAdapter::new();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use snapboard_dnd::{DragPhase, ManualClock};
    use snapboard_protocol::TaskStatus;

    use super::*;
    use crate::test_utils::buffer_to_string;

    fn app() -> App {
        App::new(dummy_board(), DndConfig::default())
    }

    fn render<C: Clock>(app: &mut App<C>, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn titles(app: &App<impl Clock>, column: TaskStatus) -> Vec<String> {
        app.surface()
            .board()
            .tasks(column)
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    fn pointer(action: PointerAction, column: u16, row: u16) -> Message {
        Message::Pointer {
            action,
            column,
            row,
        }
    }

    #[test]
    fn app_quit_message_sets_should_quit() {
        let mut app = app();

        assert!(!app.should_quit());
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn app_navigation_updates_state() {
        let mut app = app();

        app.update(Message::NavigateRight);
        assert_eq!(app.state.selected_column, TaskStatus::InProgress);

        app.update(Message::NavigateLeft);
        assert_eq!(app.state.selected_column, TaskStatus::Todo);
    }

    #[test]
    fn app_select_without_task_does_nothing() {
        let mut app = app();

        app.update(Message::Select);
        assert_eq!(app.engine.phase(), DragPhase::Idle);
    }

    #[test]
    fn app_escape_clears_selection_when_not_dragging() {
        let mut app = app();
        app.update(Message::NavigateDown);
        assert!(app.state.selected_task.is_some());

        app.update(Message::Escape);
        assert!(app.state.selected_task.is_none());
        assert!(!app.should_quit());
    }

    #[test]
    fn app_keyboard_drag_moves_card_to_next_column() {
        let clock = ManualClock::new();
        let mut app = App::with_clock(dummy_board(), DndConfig::default(), clock.clone());
        render(&mut app, 80, 24);

        app.update(Message::NavigateDown);
        app.update(Message::Select);
        assert!(app.engine.is_dragging());

        // Each step is 10 units: from x=80 to x=200, within 60 of the
        // second column's centre at 240.
        for _ in 0..12 {
            app.update(Message::NavigateRight);
        }
        assert_eq!(app.state.selected_column, TaskStatus::Todo);
        assert_eq!(
            app.engine.state().target_column,
            Some(TaskStatus::InProgress)
        );

        app.update(Message::Select);
        assert_eq!(app.engine.phase(), DragPhase::Dropping);
        assert!(titles(&app, TaskStatus::InProgress).contains(&"Set up dev environment".into()));
        assert_eq!(titles(&app, TaskStatus::Todo).len(), 2);
        assert_eq!(app.state.selected_column, TaskStatus::InProgress);
        assert_eq!(
            app.state.selected_task(app.surface.board()).map(|t| t.title.as_str()),
            Some("Set up dev environment")
        );

        for _ in 0..20 {
            clock.advance(Duration::from_millis(100));
            app.tick();
        }
        assert_eq!(app.engine.phase(), DragPhase::Idle);
        assert!(app.surface.overlays().all(|(_, o)| !matches!(
            o,
            crate::surface::Overlay::Ghost { .. } | crate::surface::Overlay::Placeholder { .. }
        )));
    }

    #[test]
    fn app_escape_cancels_keyboard_drag() {
        let mut app = app();
        render(&mut app, 80, 24);

        app.update(Message::NavigateDown);
        app.update(Message::Select);
        assert!(app.engine.is_dragging());

        app.update(Message::Escape);
        assert_eq!(app.engine.phase(), DragPhase::Cancelling);
        // Escape went to the drag, not the selection.
        assert!(app.state.selected_task.is_some());
        assert_eq!(titles(&app, TaskStatus::Todo).len(), 3);
    }

    #[test]
    fn app_mouse_drag_moves_card() {
        let mut app = app();
        render(&mut app, 80, 24);

        // Header is 3 rows, the column border 1; the first card starts at row 4.
        app.update(pointer(PointerAction::Press, 5, 5));
        app.update(pointer(PointerAction::Drag, 65, 5));
        assert!(app.engine.is_dragging());
        assert_eq!(app.engine.state().target_column, Some(TaskStatus::Done));

        app.update(pointer(PointerAction::Release, 65, 5));
        assert_eq!(titles(&app, TaskStatus::Todo).len(), 2);
        assert_eq!(titles(&app, TaskStatus::Done).len(), 3);
        assert!(titles(&app, TaskStatus::Done).contains(&"Set up dev environment".into()));
    }

    #[test]
    fn app_click_selects_card_without_dragging() {
        let mut app = app();
        render(&mut app, 80, 24);

        // Second card of the second column: rows 8..12.
        app.update(pointer(PointerAction::Press, 25, 9));
        app.update(pointer(PointerAction::Release, 25, 9));

        assert_eq!(app.engine.phase(), DragPhase::Idle);
        assert_eq!(app.state.selected_column, TaskStatus::InProgress);
        assert_eq!(app.state.selected_task, Some(1));
    }

    #[test]
    fn app_reset_restores_sample_board() {
        let mut app = app();
        render(&mut app, 80, 24);
        app.update(pointer(PointerAction::Press, 5, 5));
        app.update(pointer(PointerAction::Drag, 65, 5));
        app.update(pointer(PointerAction::Release, 65, 5));
        app.shutdown();

        app.update(Message::Reset);
        assert_eq!(titles(&app, TaskStatus::Todo).len(), 3);
        assert_eq!(titles(&app, TaskStatus::Done).len(), 2);
    }

    // --- Graceful degradation tests ---

    #[test]
    fn app_view_shows_too_small_message_when_height_below_minimum() {
        let mut app = app();
        let content = render(&mut app, 80, 6);

        assert!(!app.header_visible);
        assert!(
            content.contains("Terminal too small"),
            "Buffer should contain 'Terminal too small' message"
        );
    }

    #[test]
    fn app_view_shows_too_small_message_when_width_below_minimum() {
        let mut app = app();
        let content = render(&mut app, 30, 24);

        assert!(!app.header_visible);
        assert!(content.contains("Terminal too small"));
    }

    #[test]
    fn app_view_hides_header_in_compact_mode() {
        let mut app = app();
        let content = render(&mut app, 80, MIN_HEIGHT_WITH_HEADER - 1);

        assert!(!app.header_visible);
        assert!(
            content.contains("To Do"),
            "Buffer should contain board content"
        );
    }

    #[test]
    fn app_view_shows_header_when_terminal_large_enough() {
        let mut app = app();
        let content = render(&mut app, 80, 24);

        assert!(app.header_visible);
        assert!(content.contains("snapboard"), "{content}");
        assert!(content.contains("8 cards"), "{content}");
        assert!(content.contains("To Do"), "{content}");
        assert!(content.contains("Enter pick up/drop"), "{content}");
    }
}
