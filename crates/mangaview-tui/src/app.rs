//! Application state management for mangaview.
//!
//! This module holds the `App` struct: the slide controller, the terminal's
//! stand-in for the fullscreen capability, and what the status bar shows.

use mangaview_core::models::SlideDeck;
use mangaview_core::viewer::{
    FullscreenCapability, FullscreenMode, FullscreenPlatform, GestureOutcome, SlideController,
};
use tracing::{debug, warn};

// ============================================================================
// Constants
// ============================================================================

/// Pixel height assumed for one terminal row when mapping mouse drags to
/// touch coordinates.
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Rows taken by the title bar and status bar when not fullscreen.
pub const CHROME_ROWS: u16 = 5;

// ============================================================================
// Fullscreen
// ============================================================================

/// Fullscreen in a terminal means hiding the title and status bars.
#[derive(Debug, Default)]
pub struct TerminalScreen {
    pub chrome_hidden: bool,
}

impl FullscreenCapability for TerminalScreen {
    fn request_fullscreen(&mut self) {
        self.chrome_hidden = true;
    }

    fn exit_fullscreen(&mut self) {
        self.chrome_hidden = false;
    }
}

impl FullscreenPlatform for TerminalScreen {
    fn fullscreen(&mut self) -> Option<&mut dyn FullscreenCapability> {
        Some(self)
    }
}

// ============================================================================
// Offline cache status
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfflineStatus {
    Disabled,
    Installed { age: Option<String> },
    Failed(String),
}

impl OfflineStatus {
    pub fn label(&self) -> String {
        match self {
            OfflineStatus::Disabled => "offline: off".to_string(),
            OfflineStatus::Installed { age: Some(age) } => format!("offline: ready ({})", age),
            OfflineStatus::Installed { age: None } => "offline: ready".to_string(),
            OfflineStatus::Failed(_) => "offline: unavailable".to_string(),
        }
    }
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub controller: SlideController,
    pub screen: TerminalScreen,
    pub offline: OfflineStatus,
    pub status_message: Option<String>,
    pub terminal_rows: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(deck: SlideDeck, offline: OfflineStatus, fullscreen_button: bool) -> Self {
        let mut controller = SlideController::new(deck);
        if fullscreen_button {
            controller = controller.with_fullscreen_control();
        }
        Self {
            controller,
            screen: TerminalScreen::default(),
            offline,
            status_message: None,
            terminal_rows: 0,
            should_quit: false,
        }
    }

    /// Rows available to the slide viewer.
    pub fn viewer_rows(&self) -> u16 {
        if self.screen.chrome_hidden {
            self.terminal_rows
        } else {
            self.terminal_rows.saturating_sub(CHROME_ROWS)
        }
    }

    fn row_to_px(row: u16) -> f64 {
        row as f64 * CELL_HEIGHT_PX
    }

    pub fn next_slide(&mut self) {
        self.status_message = None;
        self.controller.advance();
    }

    pub fn prev_slide(&mut self) {
        self.status_message = None;
        self.controller.retreat();
    }

    pub fn drag_start(&mut self, row: u16) {
        self.controller.touch_start(Self::row_to_px(row));
    }

    pub fn drag_move(&mut self, row: u16) {
        let viewport = Self::row_to_px(self.viewer_rows());
        self.controller.touch_move(Self::row_to_px(row), viewport);
    }

    pub fn drag_end(&mut self, row: u16) {
        let outcome = self.controller.touch_end(Self::row_to_px(row));
        debug!(?outcome, index = self.controller.current_index(), "Drag finished");
        if matches!(outcome, GestureOutcome::Advanced | GestureOutcome::Retreated) {
            self.status_message = None;
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        match self.controller.toggle_fullscreen(&mut self.screen) {
            Some(FullscreenMode::Fullscreen) => debug!("Entered fullscreen"),
            Some(FullscreenMode::Normal) => debug!("Left fullscreen"),
            None => {}
        }
    }

    /// Open the current slide's article in the system browser.
    pub fn open_link(&mut self) {
        let Some(link) = self.controller.frame().link.clone() else {
            self.status_message = Some("No article link for this slide".to_string());
            return;
        };
        match open::that(&link) {
            Ok(()) => self.status_message = Some(format!("Opened {}", link)),
            Err(e) => {
                warn!(url = %link, error = %e, "Failed to open article link");
                self.status_message = Some(format!("Could not open {}", link));
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mangaview_core::models::MangaItem;

    fn app(slides: usize) -> App {
        let items = (0..slides)
            .map(|i| MangaItem {
                article_url: Some(format!("https://news.example.com/{}", i)),
                manga_url: Some(format!("https://cdn.example.com/{}.png", i)),
            })
            .collect();
        let mut app = App::new(SlideDeck::from_items(items), OfflineStatus::Disabled, true);
        app.terminal_rows = 45;
        app
    }

    #[test]
    fn test_viewer_rows_follow_fullscreen() {
        let mut app = app(2);
        assert_eq!(app.viewer_rows(), 40);
        app.toggle_fullscreen();
        assert!(app.screen.chrome_hidden);
        assert_eq!(app.viewer_rows(), 45);
        app.toggle_fullscreen();
        assert_eq!(app.viewer_rows(), 40);
    }

    #[test]
    fn test_drag_of_four_rows_advances() {
        // 4 rows = 64px, past the 50px threshold
        let mut app = app(3);
        app.drag_start(30);
        app.drag_move(28);
        app.drag_end(26);
        assert_eq!(app.controller.current_index(), 1);
    }

    #[test]
    fn test_drag_of_three_rows_snaps_back() {
        // 3 rows = 48px, not enough to commit
        let mut app = app(3);
        app.drag_start(10);
        app.drag_end(13);
        assert_eq!(app.controller.current_index(), 0);
        assert_eq!(app.controller.frame().translations, vec![0.0, 100.0, 200.0]);
    }

    #[test]
    fn test_drag_preview_uses_viewer_height() {
        let mut app = app(2);
        app.drag_start(30);
        app.drag_move(26);
        // 64px of 640px viewport
        assert_eq!(app.controller.state().drag_offset_percent, -10.0);
    }

    #[test]
    fn test_open_link_without_slides_sets_status() {
        let mut app = app(0);
        app.open_link();
        assert_eq!(
            app.status_message.as_deref(),
            Some("No article link for this slide")
        );
    }

    #[test]
    fn test_offline_labels() {
        assert_eq!(OfflineStatus::Disabled.label(), "offline: off");
        assert_eq!(
            OfflineStatus::Installed { age: Some("5m ago".into()) }.label(),
            "offline: ready (5m ago)"
        );
        assert_eq!(OfflineStatus::Failed("x".into()).label(), "offline: unavailable");
    }
}
