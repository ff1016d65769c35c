//! Page scroll position for the hero overlay
//!
//! The window shows the top of a virtual page `page_heights` viewports tall.
//! The wheel moves through it, driving the progress bar and the scroll hint.

/// Scroll offset past which the scroll hint fades out
pub const INDICATOR_HIDE_OFFSET: f32 = 80.0;

/// Logical pixels scrolled per wheel line
pub const LINE_HEIGHT: f32 = 40.0;

#[derive(Clone, Copy, Debug)]
pub struct ScrollProgress {
    offset: f32,
    viewport_height: f32,
    page_heights: f32,
}

impl ScrollProgress {
    pub fn new(viewport_height: f32, page_heights: f32) -> Self {
        Self {
            offset: 0.0,
            viewport_height: viewport_height.max(0.0),
            page_heights: page_heights.max(1.0),
        }
    }

    pub fn page_height(&self) -> f32 {
        self.viewport_height * self.page_heights
    }

    /// Distance that can actually be scrolled
    fn scrollable(&self) -> f32 {
        self.page_height() - self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(0.0);
        self.offset = self.offset.clamp(0.0, self.scrollable().max(0.0));
    }

    /// Scroll by `delta` logical pixels; positive moves down the page
    pub fn scroll_by(&mut self, delta: f32) {
        self.offset = (self.offset + delta).clamp(0.0, self.scrollable().max(0.0));
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Fraction of the page scrolled, or 0 when the page fits the viewport
    pub fn progress(&self) -> f32 {
        let scrollable = self.scrollable();
        if scrollable > 0.0 {
            self.offset / scrollable
        } else {
            0.0
        }
    }

    pub fn indicator_visible(&self) -> bool {
        self.offset <= INDICATOR_HIDE_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_spans_page() {
        let mut scroll = ScrollProgress::new(800.0, 4.0);
        assert_eq!(scroll.progress(), 0.0);

        scroll.scroll_by(1200.0);
        assert_eq!(scroll.progress(), 0.5);

        scroll.scroll_by(10_000.0);
        assert_eq!(scroll.offset(), 2400.0);
        assert_eq!(scroll.progress(), 1.0);

        scroll.scroll_by(-10_000.0);
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn test_page_that_fits_has_zero_progress() {
        let mut scroll = ScrollProgress::new(800.0, 1.0);
        scroll.scroll_by(500.0);
        assert_eq!(scroll.offset(), 0.0);
        assert_eq!(scroll.progress(), 0.0);
    }

    #[test]
    fn test_indicator_hides_past_threshold() {
        let mut scroll = ScrollProgress::new(600.0, 3.0);
        assert!(scroll.indicator_visible());
        scroll.scroll_by(80.0);
        assert!(scroll.indicator_visible());
        scroll.scroll_by(1.0);
        assert!(!scroll.indicator_visible());
    }

    #[test]
    fn test_shrinking_viewport_clamps_offset() {
        let mut scroll = ScrollProgress::new(1000.0, 2.0);
        scroll.scroll_by(1000.0);
        scroll.set_viewport_height(400.0);
        assert_eq!(scroll.offset(), 400.0);
        assert_eq!(scroll.progress(), 1.0);
    }
}
