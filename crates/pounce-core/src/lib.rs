pub mod error;
pub mod geometry;
pub mod input;
pub mod render;

pub use error::{PounceError, Result};
pub use geometry::{Rect, Segment, Side};
pub use input::PlayerInput;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use glam::IVec2;

    use crate::geometry::Rect;
    use crate::input::PlayerInput;
    use crate::render::{Canvas, Color};

    /// One recorded drawing call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Rect(Rect, Color),
        Polygon(Vec<IVec2>, Color),
        Circle(IVec2, i32, Color),
    }

    /// Canvas that records every call instead of painting.
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        pub calls: Vec<DrawCall>,
    }

    impl Canvas for RecordingCanvas {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.calls.push(DrawCall::Rect(rect, color));
        }

        fn fill_polygon(&mut self, points: &[IVec2], color: Color) {
            self.calls.push(DrawCall::Polygon(points.to_vec(), color));
        }

        fn fill_circle(&mut self, center: IVec2, radius: i32, color: Color) {
            self.calls.push(DrawCall::Circle(center, radius, color));
        }
    }

    /// Input with nothing pressed.
    pub fn idle_input() -> PlayerInput {
        PlayerInput::default()
    }

    /// Input holding right.
    pub fn right_input() -> PlayerInput {
        PlayerInput {
            right: true,
            ..Default::default()
        }
    }

    /// Input holding left.
    pub fn left_input() -> PlayerInput {
        PlayerInput {
            left: true,
            ..Default::default()
        }
    }

    /// Input pressing jump, optionally with the high-jump modifier.
    pub fn jump_input(high: bool) -> PlayerInput {
        PlayerInput {
            jump: true,
            high_jump: high,
            ..Default::default()
        }
    }

    /// Input pressing the ground-pound action.
    pub fn pound_input() -> PlayerInput {
        PlayerInput {
            pound: true,
            ..Default::default()
        }
    }

}
