//! Screen-reader announcements.
//!
//! Announcements go to a live region the [`Announcer`] creates on first use.
//! Each one is cleared again [`ANNOUNCEMENT_TTL`] later, on the first frame
//! past its deadline.

use std::time::{Duration, Instant};

use snapboard_config::KeyboardConfig;
use snapboard_protocol::TaskStatus;
use tracing::debug;

use crate::geometry::NodeId;
use crate::visual::Scene;

/// How long an announcement stays in the live region.
pub const ANNOUNCEMENT_TTL: Duration = Duration::from_secs(1);

/// Values substituted into announcement templates.
///
/// Positions are zero-based here and rendered one-based.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnouncementContext {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub column: Option<TaskStatus>,
    pub position: Option<usize>,
    pub total: Option<usize>,
    pub from_column: Option<TaskStatus>,
    pub to_column: Option<TaskStatus>,
    pub original_column: Option<TaskStatus>,
    pub original_position: Option<usize>,
}

impl AnnouncementContext {
    fn lookup(&self, key: &str) -> Option<String> {
        let column = |c: Option<TaskStatus>| c.map(|c| c.display_name().to_string());
        let ordinal = |p: Option<usize>| p.map(|p| (p + 1).to_string());
        match key {
            "title" => self.title.clone(),
            "status" => column(self.status),
            "column" => column(self.column),
            "position" => ordinal(self.position),
            "total" => self.total.map(|t| t.to_string()),
            "from_column" => column(self.from_column),
            "to_column" => column(self.to_column),
            "original_column" => column(self.original_column),
            "original_position" => ordinal(self.original_position),
            _ => None,
        }
    }
}

/// Fills `{placeholder}`s in `template`.
///
/// Unknown placeholders and ones without a value are left as written.
///
/// # Examples
///
/// ```
/// use snapboard_dnd::announce::{render, AnnouncementContext};
/// use snapboard_protocol::TaskStatus;
///
/// let context = AnnouncementContext {
///     column: Some(TaskStatus::InReview),
///     position: Some(0),
///     ..Default::default()
/// };
/// assert_eq!(
///     render("Moving to {column}, position {position}", &context),
///     "Moving to In Review, position 1"
/// );
/// ```
#[must_use]
pub fn render(template: &str, context: &AnnouncementContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match context.lookup(key) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Owner of the live region.
#[derive(Debug, Clone, Default)]
pub struct Announcer {
    region: Option<NodeId>,
    clear_at: Option<Instant>,
}

impl Announcer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            region: None,
            clear_at: None,
        }
    }

    #[must_use]
    pub const fn region(&self) -> Option<NodeId> {
        self.region
    }

    /// Writes `text` to the live region.
    ///
    /// Does nothing when announcements are off or `text` is empty. Returns
    /// `true` if something was announced.
    pub fn announce<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        keyboard: &KeyboardConfig,
        text: &str,
        now: Instant,
    ) -> bool {
        if !keyboard.announce_changes || text.is_empty() {
            return false;
        }
        let region = match self.region.filter(|r| scene.contains(*r)) {
            Some(region) => region,
            None => {
                let region = scene.create_live_region();
                self.region = Some(region);
                region
            }
        };
        debug!(%text, "announce");
        scene.set_live_text(region, text);
        self.clear_at = Some(now + ANNOUNCEMENT_TTL);
        true
    }

    /// Clears the live region once the last announcement has expired.
    pub fn tick<S: Scene + ?Sized>(&mut self, scene: &mut S, now: Instant) {
        if let Some(deadline) = self.clear_at
            && now >= deadline
        {
            self.clear_at = None;
            if let Some(region) = self.region.filter(|r| scene.contains(*r)) {
                scene.set_live_text(region, "");
            }
        }
    }

    /// Removes the live region and drops the pending clear.
    pub fn teardown<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        self.clear_at = None;
        if let Some(region) = self.region.take()
            && scene.contains(region)
        {
            scene.remove(region);
        }
    }
}
