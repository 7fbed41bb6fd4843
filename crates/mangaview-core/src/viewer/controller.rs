//! Slide controller: one viewer instance with its own deck and state.

use tracing::debug;

use crate::models::{SlideDeck, SlideRecord};

use super::fullscreen::{FullscreenGlyph, FullscreenMode, FullscreenPlatform, FullscreenToggle};
use super::gesture::{self, GestureOutcome, GestureState, SwipeDecision};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewerState {
    pub current_index: usize,
    pub drag_offset_percent: f64,
}

/// The visual state a surface should apply.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderFrame {
    /// Vertical translation in percent, one per slide in deck order.
    pub translations: Vec<f64>,
    /// Target of the navigation link.
    pub link: Option<String>,
}

/// `100 * (i - current) + offset` for every slide `i`.
pub fn translations(current_index: usize, offset: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 100.0 * (i as f64 - current_index as f64) + offset)
        .collect()
}

pub struct SlideController {
    deck: SlideDeck,
    state: ViewerState,
    gesture: GestureState,
    fullscreen: Option<FullscreenToggle>,
    frame: RenderFrame,
}

impl SlideController {
    /// Build a controller and render the initial frame.
    pub fn new(deck: SlideDeck) -> Self {
        let mut controller = Self {
            deck,
            state: ViewerState::default(),
            gesture: GestureState::Idle,
            fullscreen: None,
            frame: RenderFrame::default(),
        };
        controller.render(0.0);
        controller
    }

    /// Attach a fullscreen button. Without one, toggling does nothing.
    pub fn with_fullscreen_control(mut self) -> Self {
        self.fullscreen = Some(FullscreenToggle::new());
        self
    }

    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn current_slide(&self) -> Option<&SlideRecord> {
        self.deck.get(self.state.current_index)
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture
    }

    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub fn fullscreen_glyph(&self) -> Option<FullscreenGlyph> {
        self.fullscreen.map(|t| t.glyph())
    }

    pub fn render(&mut self, offset: f64) -> &RenderFrame {
        self.state.drag_offset_percent = offset;
        self.frame = RenderFrame {
            translations: translations(self.state.current_index, offset, self.deck.len()),
            link: self.current_slide().and_then(|s| s.link_url.clone()),
        };
        &self.frame
    }

    /// Move to the next slide. Returns false at the last slide.
    pub fn advance(&mut self) -> bool {
        if self.state.current_index + 1 >= self.deck.len() {
            return false;
        }
        self.state.current_index += 1;
        debug!(index = self.state.current_index, "Advanced to slide");
        self.render(0.0);
        true
    }

    /// Move to the previous slide. Returns false at the first slide.
    pub fn retreat(&mut self) -> bool {
        if self.state.current_index == 0 {
            return false;
        }
        self.state.current_index -= 1;
        debug!(index = self.state.current_index, "Retreated to slide");
        self.render(0.0);
        true
    }

    pub fn touch_start(&mut self, y: f64) -> GestureOutcome {
        self.gesture = GestureState::Dragging { start_y: y };
        GestureOutcome::Started
    }

    pub fn touch_move(&mut self, y: f64, viewport_height: f64) -> GestureOutcome {
        let Some(diff) = self.gesture.travel(y) else {
            return GestureOutcome::Ignored;
        };
        let offset = gesture::drag_offset(diff, viewport_height);
        self.render(offset);
        GestureOutcome::Preview(offset)
    }

    pub fn touch_end(&mut self, y: f64) -> GestureOutcome {
        let Some(diff) = self.gesture.travel(y) else {
            return GestureOutcome::Ignored;
        };
        self.gesture = GestureState::Idle;

        let moved = match gesture::classify(diff) {
            SwipeDecision::Next => self.advance().then_some(GestureOutcome::Advanced),
            SwipeDecision::Previous => self.retreat().then_some(GestureOutcome::Retreated),
            SwipeDecision::SnapBack => None,
        };

        // A swipe past either end has nowhere to go and snaps back too
        moved.unwrap_or_else(|| {
            self.render(0.0);
            GestureOutcome::SnappedBack
        })
    }

    /// Flip fullscreen if this viewer has a fullscreen control.
    pub fn toggle_fullscreen(
        &mut self,
        platform: &mut dyn FullscreenPlatform,
    ) -> Option<FullscreenMode> {
        let toggle = self.fullscreen.as_mut()?;
        Some(toggle.toggle(platform))
    }
}
