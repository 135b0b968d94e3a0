use glam::Vec2;
use crate::geometry::Rect;

/// The window edge the icon lies beyond; the window collapses through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    /// Pick the edge a window should collapse through to reach `target`.
    ///
    /// A target entirely past one edge wins outright. Otherwise (the icon
    /// overlaps the window's extent) the dominant axis of the offset between
    /// centres decides, measured relative to the window size.
    pub fn towards(window: &Rect, target: &Rect) -> Self {
        if target.top() >= window.bottom() {
            return Direction::Bottom;
        }
        if target.bottom() <= window.top() {
            return Direction::Top;
        }
        if target.left() >= window.right() {
            return Direction::Right;
        }
        if target.right() <= window.left() {
            return Direction::Left;
        }

        let delta = (target.center() - window.center()) / window.size();
        if delta.y.abs() >= delta.x.abs() {
            if delta.y >= 0.0 { Direction::Bottom } else { Direction::Top }
        } else if delta.x >= 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    /// Whether travel happens along the Y axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Top | Direction::Bottom)
    }

    /// Coordinates of the far and near edges of `rect` along the travel axis.
    pub fn along_span(self, rect: &Rect) -> (f32, f32) {
        match self {
            Direction::Bottom => (rect.top(), rect.bottom()),
            Direction::Top => (rect.bottom(), rect.top()),
            Direction::Right => (rect.left(), rect.right()),
            Direction::Left => (rect.right(), rect.left()),
        }
    }

    /// Low and high coordinates of `rect` across the travel axis.
    pub fn lateral_span(self, rect: &Rect) -> (f32, f32) {
        if self.is_vertical() {
            (rect.left(), rect.right())
        } else {
            (rect.top(), rect.bottom())
        }
    }

    /// Split a screen point into (along, lateral) coordinates.
    pub fn split(self, p: Vec2) -> (f32, f32) {
        if self.is_vertical() { (p.y, p.x) } else { (p.x, p.y) }
    }

    /// Inverse of [`Direction::split`].
    pub fn join(self, along: f32, lateral: f32) -> Vec2 {
        if self.is_vertical() {
            Vec2::new(lateral, along)
        } else {
            Vec2::new(along, lateral)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Rect {
        Rect::new(100.0, 100.0, 400.0, 300.0)
    }

    #[test]
    fn icon_past_an_edge() {
        let w = window();
        assert_eq!(Direction::towards(&w, &Rect::new(200.0, 450.0, 32.0, 32.0)), Direction::Bottom);
        assert_eq!(Direction::towards(&w, &Rect::new(200.0, 0.0, 32.0, 32.0)), Direction::Top);
        assert_eq!(Direction::towards(&w, &Rect::new(600.0, 200.0, 32.0, 32.0)), Direction::Right);
        assert_eq!(Direction::towards(&w, &Rect::new(0.0, 200.0, 32.0, 32.0)), Direction::Left);
    }

    #[test]
    fn overlapping_icon_uses_dominant_axis() {
        let w = Rect::new(0.0, 0.0, 800.0, 600.0);
        // Near the bottom-middle of the window.
        assert_eq!(Direction::towards(&w, &Rect::new(380.0, 560.0, 40.0, 20.0)), Direction::Bottom);
        // Near the left edge, vertically centred.
        assert_eq!(Direction::towards(&w, &Rect::new(5.0, 290.0, 20.0, 20.0)), Direction::Left);
    }

    #[test]
    fn split_join_round_trip() {
        let p = Vec2::new(12.0, 34.0);
        for dir in [Direction::Top, Direction::Bottom, Direction::Left, Direction::Right] {
            let (a, l) = dir.split(p);
            assert_eq!(dir.join(a, l), p);
        }
    }

    #[test]
    fn spans_are_oriented_towards_the_icon() {
        let w = window();
        assert_eq!(Direction::Bottom.along_span(&w), (100.0, 400.0));
        assert_eq!(Direction::Top.along_span(&w), (400.0, 100.0));
        assert_eq!(Direction::Left.lateral_span(&w), (100.0, 400.0));
    }
}
