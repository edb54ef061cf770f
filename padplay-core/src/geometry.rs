//! Shared geometry helpers
//!
//! Screen-space rectangles in signed pixels. Entities may sit partially
//! off-screen (e.g. obstacles entering from above), hence `i16`.

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
}

impl Rect {
    pub const fn new(x: i16, y: i16, width: i16, height: i16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding-box overlap test
    ///
    /// Edges are inclusive: rectangles that merely touch count as
    /// overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x + self.width < other.x
            || self.x > other.x + other.width
            || self.y + self.height < other.y
            || self.y > other.y + other.height)
    }

    /// Vertical extent test against a single row, inclusive of both edges
    pub fn spans_y(&self, y: i16) -> bool {
        self.y <= y && y <= self.y + self.height
    }

    /// Draw as a filled rectangle
    pub fn fill(&self, frame: &mut padplay_display::FrameBuffer) {
        frame.fill_rect(
            self.x as i32,
            self.y as i32,
            self.width as i32,
            self.height as i32,
            true,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_same_lane() {
        let car = Rect::new(59, 50, 20, 12);
        let obstacle = Rect::new(59, 40, 20, 12);
        assert!(car.overlaps(&obstacle));
        assert!(obstacle.overlaps(&car));
    }

    #[test]
    fn test_touching_edges_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 10, 5, 5);
        assert!(a.overlaps(&b));

        let c = Rect::new(11, 0, 5, 5);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_adjacent_lanes_do_not_overlap() {
        // Lanes are 31 px apart, cars are 20 px wide
        let left = Rect::new(28, 50, 20, 12);
        let centre = Rect::new(59, 50, 20, 12);
        assert!(!left.overlaps(&centre));
    }

    #[test]
    fn test_spans_y() {
        let paddle = Rect::new(0, 24, 3, 16);
        assert!(paddle.spans_y(24));
        assert!(paddle.spans_y(40));
        assert!(!paddle.spans_y(41));
        assert!(!paddle.spans_y(23));
    }
}
