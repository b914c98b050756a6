//! Header Collapse State Machine
//!
//! Hide-on-scroll-down, reveal-on-scroll-up-at-touch-end. A reveal arms
//! a short suppression window so the rubber-band bounce that follows a
//! touch release cannot immediately re-hide the header.

use std::time::{Duration, Instant};

/// Scroll deltas smaller than this are jitter and are ignored
pub const SCROLL_JITTER_PX: f32 = 4.0;
/// The header never hides above this offset
pub const MIN_HIDE_OFFSET_PX: f32 = 60.0;
/// How long hiding stays suppressed after a touch-end reveal
pub const REVEAL_SUPPRESS_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderVisibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollDirection {
    Up,
    Down,
}

pub struct HeaderCollapse {
    visibility: HeaderVisibility,
    direction: ScrollDirection,
    last_y: f32,
    suppress_until: Option<Instant>,
}

impl HeaderCollapse {
    pub fn new() -> Self {
        Self {
            visibility: HeaderVisibility::Visible,
            direction: ScrollDirection::Up,
            last_y: 0.0,
            suppress_until: None,
        }
    }

    pub fn visibility(&self) -> HeaderVisibility {
        self.visibility
    }

    fn suppressed(&self, now: Instant) -> bool {
        self.suppress_until.map_or(false, |until| now < until)
    }

    /// Feed a scroll position sample
    pub fn on_scroll(&mut self, y: f32, now: Instant) {
        let delta = y - self.last_y;
        if delta.abs() < SCROLL_JITTER_PX {
            return;
        }

        self.direction = if delta > 0.0 {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };

        if self.direction == ScrollDirection::Down
            && y > MIN_HIDE_OFFSET_PX
            && self.visibility == HeaderVisibility::Visible
            && !self.suppressed(now)
        {
            self.visibility = HeaderVisibility::Hidden;
        }

        self.last_y = y;
    }

    /// The finger lifted; reveal if the last movement was upward
    pub fn on_touch_end(&mut self, now: Instant) {
        if self.direction == ScrollDirection::Up && self.visibility == HeaderVisibility::Hidden {
            self.visibility = HeaderVisibility::Visible;
            self.suppress_until = Some(now + REVEAL_SUPPRESS_WINDOW);
        }
    }
}

impl Default for HeaderCollapse {
    fn default() -> Self {
        Self::new()
    }
}
