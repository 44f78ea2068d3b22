/// Viewport offset for one pane.
///
/// The offset is recomputed from the selection, the item count and the
/// visible height each time, never nudged by a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollTracker {
    offset: usize,
    height: usize,
}

impl ScrollTracker {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Bring `selected` into `[offset, offset + height)` with the smallest
    /// shift, keeping `offset <= max(0, len - height)`.
    pub fn follow(&mut self, selected: Option<usize>, len: usize) {
        if self.height == 0 || len == 0 {
            self.offset = 0;
            return;
        }

        let mut offset = self.offset;
        if let Some(sel) = selected {
            if sel < offset {
                offset = sel;
            } else if sel >= offset + self.height {
                offset = sel + 1 - self.height;
            }
        }

        self.offset = offset.min(len.saturating_sub(self.height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(height: usize) -> ScrollTracker {
        let mut t = ScrollTracker::default();
        t.set_height(height);
        t
    }

    #[test]
    fn test_scrolls_down_minimally() {
        let mut t = tracker(3);
        for sel in 0..3 {
            t.follow(Some(sel), 10);
            assert_eq!(t.offset(), 0);
        }
        t.follow(Some(3), 10);
        assert_eq!(t.offset(), 1);
        t.follow(Some(9), 10);
        assert_eq!(t.offset(), 7);
    }

    #[test]
    fn test_scrolls_up_minimally() {
        let mut t = tracker(3);
        t.follow(Some(9), 10);
        t.follow(Some(8), 10);
        assert_eq!(t.offset(), 7);
        t.follow(Some(6), 10);
        assert_eq!(t.offset(), 6);
        t.follow(Some(0), 10);
        assert_eq!(t.offset(), 0);
    }

    #[test]
    fn test_offset_clamped_when_content_fits_or_shrinks() {
        let mut t = tracker(5);
        t.follow(Some(2), 3);
        assert_eq!(t.offset(), 0);

        t.follow(Some(19), 20);
        assert_eq!(t.offset(), 15);
        // List shrank underneath the viewport.
        t.follow(None, 8);
        assert_eq!(t.offset(), 3);
    }

    #[test]
    fn test_resize_recomputes() {
        let mut t = tracker(2);
        t.follow(Some(5), 10);
        assert_eq!(t.offset(), 4);

        t.set_height(8);
        t.follow(Some(5), 10);
        assert_eq!(t.offset(), 2);
    }

    #[test]
    fn test_unmeasured_viewport_keeps_offset_zero() {
        let mut t = ScrollTracker::default();
        t.follow(Some(30), 40);
        assert_eq!(t.offset(), 0);
    }
}
