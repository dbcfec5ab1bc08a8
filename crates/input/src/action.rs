use axisview_camera::CameraPose;
use axisview_common::Axis;
use glam::Vec2;

/// A raw pointer event in window pixels (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
}

/// What the interaction layer did in response to an event.
///
/// Hosts use this for logging and to decide follow-up work; the scene and
/// animator have already been updated when an action is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Button pressed; the gesture is not yet a drag.
    Press,
    /// Movement passed the drag threshold during this event.
    DragStarted,
    /// Movement during an established drag.
    Dragging,
    /// The pointer is over a plane, which now carries hover opacity.
    Hover(Axis),
    /// The pointer left the previously hovered plane.
    HoverCleared,
    /// A click locked the view onto an axis and started a fly-to.
    Lock { axis: Axis, pose: CameraPose },
    /// The locked view was released.
    Unlock,
    /// Nothing changed.
    Noop,
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn lock_carries_pose() {
        let pose = CameraPose::new(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO);
        let a = Action::Lock {
            axis: Axis::X,
            pose,
        };
        assert!(matches!(a, Action::Lock { axis: Axis::X, .. }));
    }

    #[test]
    fn pointer_events_carry_position() {
        let e = PointerEvent::Move(Vec2::new(3.0, 4.0));
        assert!(matches!(e, PointerEvent::Move(p) if p.x == 3.0));
    }
}
