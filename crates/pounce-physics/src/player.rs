use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use pounce_core::PlayerInput;

use crate::body::{Body, CollisionCharacter};
use crate::config::PlayerConfig;
use crate::platform::Platform;

const FULL_TURN_DEGREES: f32 = 360.0;

/// The player character.
///
/// States are grounded, airborne and spinning (ground pound). Damage opens an
/// invulnerability window made of a fixed number of blink toggles; while it is
/// open spike and enemy contact deal nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub health: i32,
    pub max_horizontal_speed: f32,
    /// Blink toggles left in the current invulnerability window.
    pub invulnerability_ticks_remaining: u32,
    pub blink_elapsed_ms: f32,
    pub is_visible: bool,
    /// Re-armed by any top landing.
    pub can_ground_pound: bool,
    pub is_spinning: bool,
    pub spin_angle: f32,
    config: PlayerConfig,
}

impl Player {
    pub fn new(spawn: Vec2, config: &PlayerConfig, gravity: f32) -> Self {
        Self {
            body: Body::new(
                spawn,
                IVec2::new(config.width, config.height),
                gravity,
                config.jump_speed,
            ),
            health: config.health,
            max_horizontal_speed: config.max_horizontal_speed,
            invulnerability_ticks_remaining: 0,
            blink_elapsed_ms: 0.0,
            is_visible: true,
            can_ground_pound: true,
            is_spinning: false,
            spin_angle: 0.0,
            config: *config,
        }
    }

    /// Apply one tick of horizontal input. With no direction held the player
    /// decelerates instead.
    pub fn steer(&mut self, input: &PlayerInput) {
        let dir = input.horizontal();
        if dir == 0.0 {
            self.decelerate();
            return;
        }

        let accel = if self.body.grounded {
            self.config.ground_acceleration
        } else {
            self.config.air_acceleration
        };
        let max = self.max_horizontal_speed;
        self.body.x_speed = (self.body.x_speed + dir * accel).clamp(-max, max);
    }

    /// Bleed off horizontal speed toward zero without overshooting.
    pub fn decelerate(&mut self) {
        let rate = if self.body.grounded {
            self.config.ground_deceleration
        } else {
            self.config.air_deceleration
        };
        let speed = self.body.x_speed;
        if speed > 0.0 {
            self.body.x_speed = (speed - rate).max(0.0);
        } else if speed < 0.0 {
            self.body.x_speed = (speed + rate).min(0.0);
        }
    }

    /// Jump if grounded. The jump magnitude also becomes the fall-speed cap
    /// for the rest of the arc.
    pub fn jump(&mut self, high: bool) -> bool {
        if !self.body.grounded {
            return false;
        }
        let speed = if high {
            self.config.high_jump_speed
        } else {
            self.config.jump_speed
        };
        self.body.max_fall_speed = speed;
        self.body.y_speed = -speed;
        self.body.grounded = false;
        true
    }

    /// Begin spinning if airborne, not already spinning, and armed.
    pub fn start_ground_pound(&mut self) -> bool {
        if self.body.grounded || self.is_spinning || !self.can_ground_pound {
            return false;
        }
        self.is_spinning = true;
        self.spin_angle = 0.0;
        tracing::debug!(pos = ?self.body.pos, "ground pound started");
        true
    }

    /// Advance the spin. Returns `true` on the tick the spin completes and
    /// the downward burst is applied.
    pub fn advance_ground_pound(&mut self, elapsed_ms: f32) -> bool {
        if !self.is_spinning {
            return false;
        }
        self.body.x_speed = 0.0;
        self.body.y_speed = 0.0;

        self.spin_angle += self.config.spin_degrees_per_ms * elapsed_ms;
        if self.spin_angle < FULL_TURN_DEGREES {
            return false;
        }

        self.is_spinning = false;
        self.spin_angle = 0.0;
        self.can_ground_pound = false;
        self.body.y_speed = self.config.pound_speed;
        self.body.max_fall_speed = self.config.pound_max_fall_speed;
        tracing::debug!(pos = ?self.body.pos, "ground pound released");
        true
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
        self.invulnerability_ticks_remaining = self.config.invulnerability_blinks;
        self.blink_elapsed_ms = 0.0;
        tracing::debug!(health = self.health, "player damaged");
    }

    /// Take one damage unless invulnerable. Returns whether damage landed.
    pub fn hurt(&mut self) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.take_damage(1);
        true
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability_ticks_remaining > 0
    }

    /// Count the invulnerability window down by elapsed time, toggling
    /// visibility once per blink interval.
    pub fn tick_invulnerability(&mut self, elapsed_ms: f32) {
        if !self.is_invulnerable() {
            return;
        }
        let interval = self.config.blink_interval_ms;
        if interval <= 0.0 {
            self.invulnerability_ticks_remaining = 0;
        }

        self.blink_elapsed_ms += elapsed_ms;
        while self.invulnerability_ticks_remaining > 0 && self.blink_elapsed_ms >= interval {
            self.blink_elapsed_ms -= interval;
            self.invulnerability_ticks_remaining -= 1;
            self.is_visible = !self.is_visible;
        }

        if self.invulnerability_ticks_remaining == 0 {
            self.blink_elapsed_ms = 0.0;
            self.is_visible = true;
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

impl CollisionCharacter for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn on_top_collision(&mut self) {
        self.can_ground_pound = true;
        self.body.max_fall_speed = self.config.jump_speed;
    }

    fn on_spike_collision(&mut self, is_top_side: bool, platform: &Platform) {
        if self.is_invulnerable() {
            return;
        }
        // Upright spikes only hurt when the player's center is over the row,
        // so standing next to it on the same floor is safe.
        if is_top_side {
            let area = platform.rect();
            let cx = self.body.rect().center().x;
            if !(area.left() < cx && cx < area.right()) {
                return;
            }
        }
        tracing::debug!(top = is_top_side, "player touched spikes");
        self.take_damage(1);
    }
}
