use axisview_common::Axis;
use glam::Vec2;

/// Pointer travel, in screen pixels, beyond which a press becomes a drag.
pub const DRAG_THRESHOLD_PX: f32 = 5.0;

/// Per-gesture pointer state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerSession {
    pub button_down: bool,
    pub down_position: Vec2,
    /// Latched once the pointer travels past the threshold; cleared on release.
    pub dragging: bool,
    /// Plane currently carrying hover opacity. Survives across gestures.
    pub hovered: Option<Axis>,
}

impl PointerSession {
    pub fn press(&mut self, position: Vec2) {
        self.button_down = true;
        self.down_position = position;
    }

    /// Latch the drag flag if `position` is far enough from the press.
    /// Returns true only on the event that starts the drag.
    pub fn track(&mut self, position: Vec2) -> bool {
        if !self.button_down || self.dragging {
            return false;
        }
        if self.down_position.distance(position) > DRAG_THRESHOLD_PX {
            self.dragging = true;
            return true;
        }
        false
    }

    /// End the gesture, reporting whether it was a drag.
    pub fn release(&mut self) -> bool {
        let was_dragging = self.dragging;
        self.button_down = false;
        self.dragging = false;
        was_dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_moves_never_drag() {
        let mut s = PointerSession::default();
        s.press(Vec2::new(100.0, 100.0));
        for p in [(103.0, 104.0), (105.0, 100.0), (96.0, 97.0), (100.0, 95.0)] {
            assert!(!s.track(Vec2::new(p.0, p.1)));
        }
        assert!(!s.dragging);
    }

    #[test]
    fn drag_latches_once() {
        let mut s = PointerSession::default();
        s.press(Vec2::new(100.0, 100.0));
        assert!(s.track(Vec2::new(104.0, 104.0)));
        assert!(s.dragging);
        // Coming back inside the threshold keeps the drag.
        assert!(!s.track(Vec2::new(100.0, 100.0)));
        assert!(s.dragging);
        assert!(s.release());
        assert!(!s.dragging);
        assert!(!s.button_down);
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut s = PointerSession::default();
        assert!(!s.track(Vec2::new(500.0, 500.0)));
        assert!(!s.dragging);
    }

    #[test]
    fn release_keeps_hover() {
        let mut s = PointerSession {
            hovered: Some(Axis::Y),
            ..PointerSession::default()
        };
        s.press(Vec2::ZERO);
        assert!(!s.release());
        assert_eq!(s.hovered, Some(Axis::Y));
    }
}
