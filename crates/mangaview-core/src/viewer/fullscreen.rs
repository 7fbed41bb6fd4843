//! Fullscreen toggle.
//!
//! Platforms expose fullscreen through a single detection call that yields
//! a capability handle or nothing. Absence is not an error.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenMode {
    #[default]
    Normal,
    Fullscreen,
}

/// Icon shown on the fullscreen button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenGlyph {
    #[default]
    Expand,
    Compress,
}

impl FullscreenGlyph {
    pub fn for_mode(mode: FullscreenMode) -> Self {
        match mode {
            FullscreenMode::Normal => FullscreenGlyph::Expand,
            FullscreenMode::Fullscreen => FullscreenGlyph::Compress,
        }
    }

    /// Font Awesome class name.
    pub fn icon_class(&self) -> &'static str {
        match self {
            FullscreenGlyph::Expand => "fa-expand",
            FullscreenGlyph::Compress => "fa-compress",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            FullscreenGlyph::Expand => "⤢",
            FullscreenGlyph::Compress => "⤡",
        }
    }
}

pub trait FullscreenCapability {
    fn request_fullscreen(&mut self);
    fn exit_fullscreen(&mut self);
}

pub trait FullscreenPlatform {
    /// Detect fullscreen support on the root element.
    fn fullscreen(&mut self) -> Option<&mut dyn FullscreenCapability>;
}

/// State behind the optional fullscreen button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FullscreenToggle {
    mode: FullscreenMode,
}

impl FullscreenToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glyph(&self) -> FullscreenGlyph {
        FullscreenGlyph::for_mode(self.mode)
    }

    /// Request or exit fullscreen, then flip the mode. The flip happens even
    /// when the platform has no capability, so the glyph always alternates.
    pub fn toggle(&mut self, platform: &mut dyn FullscreenPlatform) -> FullscreenMode {
        let capability = platform.fullscreen();
        if capability.is_none() {
            debug!("Fullscreen not supported on this platform");
        }

        self.mode = match self.mode {
            FullscreenMode::Normal => {
                if let Some(cap) = capability {
                    cap.request_fullscreen();
                }
                FullscreenMode::Fullscreen
            }
            FullscreenMode::Fullscreen => {
                if let Some(cap) = capability {
                    cap.exit_fullscreen();
                }
                FullscreenMode::Normal
            }
        };
        self.mode
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every request it receives.
    #[derive(Default)]
    pub(crate) struct RecordingScreen {
        pub supported: bool,
        pub requests: Vec<&'static str>,
    }

    impl FullscreenCapability for RecordingScreen {
        fn request_fullscreen(&mut self) {
            self.requests.push("request");
        }

        fn exit_fullscreen(&mut self) {
            self.requests.push("exit");
        }
    }

    impl FullscreenPlatform for RecordingScreen {
        fn fullscreen(&mut self) -> Option<&mut dyn FullscreenCapability> {
            if self.supported {
                Some(self)
            } else {
                None
            }
        }
    }

    #[test]
    fn test_toggle_alternates_requests() {
        let mut screen = RecordingScreen {
            supported: true,
            ..Default::default()
        };
        let mut toggle = FullscreenToggle::new();
        assert_eq!(toggle.glyph(), FullscreenGlyph::Expand);

        assert_eq!(toggle.toggle(&mut screen), FullscreenMode::Fullscreen);
        assert_eq!(toggle.glyph().icon_class(), "fa-compress");

        assert_eq!(toggle.toggle(&mut screen), FullscreenMode::Normal);
        assert_eq!(toggle.glyph().icon_class(), "fa-expand");

        assert_eq!(screen.requests, vec!["request", "exit"]);
    }

    #[test]
    fn test_toggle_without_capability_is_silent() {
        let mut screen = RecordingScreen::default();
        let mut toggle = FullscreenToggle::new();

        assert_eq!(toggle.toggle(&mut screen), FullscreenMode::Fullscreen);
        assert_eq!(toggle.glyph(), FullscreenGlyph::Compress);
        assert!(screen.requests.is_empty());
    }
}
