use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use pounce_core::Rect;

use crate::config::EnemyConfig;

/// One tick of constant-speed pursuit from `from` toward `to`.
///
/// The heading is built from a unit horizontal step and the vertical gradient,
/// then mirrored to face the target. A co-located target yields no movement.
pub fn pursuit_step(from: Vec2, to: Vec2, max_speed: f32) -> Vec2 {
    let delta = to - from;
    let heading = if delta.x != 0.0 {
        Vec2::new(1.0, delta.y / delta.x) * delta.x.signum()
    } else {
        delta
    };
    // A near-zero horizontal offset overflows the gradient.
    let direction = heading
        .try_normalize()
        .or_else(|| delta.try_normalize())
        .unwrap_or(Vec2::ZERO);
    direction * max_speed
}

/// Enemy that drifts through platforms toward the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostPursuer {
    pub pos: Vec2,
    pub size: IVec2,
    pub max_speed: f32,
    hitbox_scale: f32,
}

impl GhostPursuer {
    pub fn new(pos: Vec2, config: &EnemyConfig) -> Self {
        Self {
            pos,
            size: IVec2::splat(config.ghost_size),
            max_speed: config.ghost_max_speed,
            hitbox_scale: config.ghost_hitbox_scale,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            (self.pos.x + 0.5).floor() as i32,
            (self.pos.y + 0.5).floor() as i32,
            self.size.x,
            self.size.y,
        )
    }

    /// Inset box used only for player contact.
    pub fn contact_box(&self) -> Rect {
        self.rect().scaled(self.hitbox_scale)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size.as_vec2() / 2.0
    }

    pub fn steer_toward(&mut self, target: Vec2) {
        self.pos += pursuit_step(self.center(), target, self.max_speed);
    }
}
