use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use pounce_core::Rect;

use crate::body::{Body, CollisionCharacter};
use crate::config::EnemyConfig;
use crate::platform::{Platform, SemiSolidPlatform};
use crate::pursuit::GhostPursuer;
use crate::resolver::resolve;

/// Enemy type codes used by level files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Fool,
    GhostPursuer,
    JumpingFool,
}

impl EnemyKind {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Fool),
            1 => Some(Self::GhostPursuer),
            2 => Some(Self::JumpingFool),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoolVariant {
    /// Patrols and can be squished.
    Walker,
    /// Bounces on every landing; a stomp removes it outright.
    Jumper,
}

/// Ground enemy that patrols and turns around at walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fool {
    pub body: Body,
    pub variant: FoolVariant,
    patrol_speed: f32,
    bounce_speed: f32,
    squish_interval_ms: f32,
    /// Time into the current squish step; `Some` once stomped.
    squish_elapsed_ms: Option<f32>,
}

impl Fool {
    pub fn new(pos: Vec2, variant: FoolVariant, config: &EnemyConfig, gravity: f32) -> Self {
        let max_fall = match variant {
            FoolVariant::Walker => config.fool_max_fall_speed,
            FoolVariant::Jumper => config.jumping_fool_max_fall_speed,
        };
        let mut body = Body::new(pos, IVec2::splat(config.fool_size), gravity, max_fall);
        body.x_speed = config.fool_initial_speed;
        body.grounded = true;
        Self {
            body,
            variant,
            patrol_speed: config.fool_patrol_speed,
            bounce_speed: config.jumping_fool_bounce_speed,
            squish_interval_ms: config.squish_interval_ms,
            squish_elapsed_ms: None,
        }
    }

    /// Move and collide for one tick. Squishing Fools stay put.
    pub fn update(&mut self, platforms: &[Platform], semisolids: &[SemiSolidPlatform]) {
        if self.is_squished() {
            return;
        }
        self.body.integrate();
        resolve(self, platforms, semisolids);
    }

    pub fn is_squished(&self) -> bool {
        self.squish_elapsed_ms.is_some()
    }

    pub fn begin_squish(&mut self) {
        if self.squish_elapsed_ms.is_none() {
            self.squish_elapsed_ms = Some(0.0);
            self.body.x_speed = 0.0;
            self.body.y_speed = 0.0;
        }
    }

    /// Halve the height once per interval with the bottom edge fixed.
    /// Returns `true` once nothing is left.
    pub fn advance_squish(&mut self, elapsed_ms: f32) -> bool {
        let Some(mut elapsed) = self.squish_elapsed_ms else {
            return false;
        };
        if self.squish_interval_ms <= 0.0 {
            return true;
        }

        elapsed += elapsed_ms;
        while elapsed >= self.squish_interval_ms {
            elapsed -= self.squish_interval_ms;
            let height = self.body.size.y / 2;
            self.body.pos.y += (self.body.size.y - height) as f32;
            self.body.size.y = height;
            if height == 0 {
                return true;
            }
        }
        self.squish_elapsed_ms = Some(elapsed);
        false
    }
}

impl CollisionCharacter for Fool {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn on_top_collision(&mut self) {
        if self.variant == FoolVariant::Jumper {
            self.body.y_speed = -self.bounce_speed;
            self.body.grounded = false;
        }
    }

    fn on_left_collision(&mut self) {
        self.body.x_speed = -self.patrol_speed;
    }

    fn on_right_collision(&mut self) {
        self.body.x_speed = self.patrol_speed;
    }
}

/// Any enemy in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Enemy {
    Fool(Fool),
    Ghost(GhostPursuer),
}

impl Enemy {
    pub fn spawn(kind: EnemyKind, pos: Vec2, config: &EnemyConfig, gravity: f32) -> Self {
        match kind {
            EnemyKind::Fool => Enemy::Fool(Fool::new(pos, FoolVariant::Walker, config, gravity)),
            EnemyKind::JumpingFool => {
                Enemy::Fool(Fool::new(pos, FoolVariant::Jumper, config, gravity))
            },
            EnemyKind::GhostPursuer => Enemy::Ghost(GhostPursuer::new(pos, config)),
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self {
            Enemy::Fool(fool) => match fool.variant {
                FoolVariant::Walker => EnemyKind::Fool,
                FoolVariant::Jumper => EnemyKind::JumpingFool,
            },
            Enemy::Ghost(_) => EnemyKind::GhostPursuer,
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            Enemy::Fool(fool) => fool.body.rect(),
            Enemy::Ghost(ghost) => ghost.rect(),
        }
    }
}
