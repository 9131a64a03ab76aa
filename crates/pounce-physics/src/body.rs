use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use pounce_core::Rect;

use crate::platform::Platform;

/// Physical state shared by every platform-colliding character.
///
/// `pos` is the canonical top-left position. The integer box used for all
/// collision math is derived from it with [`Body::rect`] and is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: IVec2,
    pub x_speed: f32,
    /// Positive is downward.
    pub y_speed: f32,
    pub grounded: bool,
    pub gravity: f32,
    pub max_fall_speed: f32,
}

impl Body {
    pub fn new(pos: Vec2, size: IVec2, gravity: f32, max_fall_speed: f32) -> Self {
        Self {
            pos,
            size,
            x_speed: 0.0,
            y_speed: 0.0,
            grounded: false,
            gravity,
            max_fall_speed,
        }
    }

    /// Integer box, rounding half-up so integer shifts of `pos` shift the box
    /// by exactly the same amount.
    pub fn rect(&self) -> Rect {
        Rect::new(
            (self.pos.x + 0.5).floor() as i32,
            (self.pos.y + 0.5).floor() as i32,
            self.size.x,
            self.size.y,
        )
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size.as_vec2() / 2.0
    }

    /// Canonical bottom edge.
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y as f32
    }

    /// Accelerate downward, capped at the fall speed limit.
    pub fn fall(&mut self) {
        self.y_speed = (self.y_speed + self.gravity).min(self.max_fall_speed);
    }

    /// Advance the position by one tick of velocity.
    pub fn integrate(&mut self) {
        self.pos.x += self.x_speed;
        self.pos.y += self.y_speed;
    }

    /// Shift by whole pixels.
    pub fn shift(&mut self, delta: IVec2) {
        self.pos += delta.as_vec2();
    }
}

/// Behavior hooks invoked by the resolver.
///
/// Implementors expose their [`Body`]; every hook defaults to doing nothing.
pub trait CollisionCharacter {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Landed on a platform's top side or a semi-solid.
    fn on_top_collision(&mut self) {}
    /// Pushed back out of a platform's left side.
    fn on_left_collision(&mut self) {}
    /// Pushed back out of a platform's right side.
    fn on_right_collision(&mut self) {}
    /// Bumped a platform's bottom side.
    fn on_bottom_collision(&mut self) {}
    /// Touched the hazardous side of a spiked platform.
    fn on_spike_collision(&mut self, _is_top_side: bool, _platform: &Platform) {}
}

impl CollisionCharacter for Body {
    fn body(&self) -> &Body {
        self
    }

    fn body_mut(&mut self) -> &mut Body {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fall_clamps_at_max() {
        let mut body = Body::new(Vec2::ZERO, IVec2::new(10, 10), 0.3, 1.0);
        for _ in 0..10 {
            body.fall();
        }
        assert_eq!(body.y_speed, 1.0);
    }

    #[test]
    fn rect_rounds_half_up() {
        let mut body = Body::new(Vec2::new(2.5, -2.5), IVec2::new(4, 4), 0.3, 7.5);
        assert_eq!(body.rect(), Rect::new(3, -2, 4, 4));
        body.shift(IVec2::new(-1, 1));
        assert_eq!(body.rect(), Rect::new(2, -1, 4, 4));
    }

    #[test]
    fn integrate_keeps_subpixel_remainder() {
        let mut body = Body::new(Vec2::ZERO, IVec2::new(4, 4), 0.3, 7.5);
        body.x_speed = 0.3;
        body.integrate();
        assert_eq!(body.rect().x, 0);
        body.integrate();
        assert_eq!(body.rect().x, 1, "Two 0.3 steps should round to one pixel");
    }
}
