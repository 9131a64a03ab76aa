pub mod body;
pub mod config;
pub mod draw;
pub mod enemy;
pub mod level;
pub mod platform;
pub mod player;
pub mod pursuit;
pub mod resolver;

#[cfg(test)]
mod test_support;

use serde::{Deserialize, Serialize};

use pounce_core::render::{Canvas, Drawable};
use pounce_core::{PlayerInput, Rect, Result};

use config::SimConfig;
use enemy::{Enemy, EnemyKind, FoolVariant};
use level::Level;
use platform::{Platform, SemiSolidPlatform};
use player::Player;
use resolver::resolve;

/// Something that happened during a tick, reported to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    PlayerDamaged { health: i32 },
    PlayerDied,
    /// `index` is the enemy's position in the level's spawn list.
    EnemyStomped { index: usize },
    EnemyRemoved { index: usize },
    GroundPoundStarted,
    GroundPoundFinished,
}

/// Serializable view of the world for an external renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub objective: i32,
    pub player: PlayerSnapshot,
    pub enemies: Vec<EnemySnapshot>,
    pub platforms: Vec<Rect>,
    pub semisolids: Vec<Rect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub rect: Rect,
    pub health: i32,
    pub grounded: bool,
    pub invulnerable: bool,
    pub visible: bool,
    pub spinning: bool,
    pub spin_angle: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    pub index: usize,
    pub kind: EnemyKind,
    pub rect: Rect,
    pub squished: bool,
}

#[derive(Debug, Clone)]
struct ActiveEnemy {
    index: usize,
    enemy: Enemy,
}

/// The whole simulation: one player, its enemies and the level geometry.
///
/// Platform order is the level's file order and decides how overlapping
/// platforms resolve.
#[derive(Debug, Clone)]
pub struct World {
    config: SimConfig,
    player: Player,
    enemies: Vec<ActiveEnemy>,
    platforms: Vec<Platform>,
    semisolids: Vec<SemiSolidPlatform>,
    objective: i32,
    tick: u64,
}

impl World {
    pub fn new(
        config: SimConfig,
        player: Player,
        enemies: Vec<Enemy>,
        platforms: Vec<Platform>,
        semisolids: Vec<SemiSolidPlatform>,
    ) -> Self {
        Self {
            config,
            player,
            enemies: enemies
                .into_iter()
                .enumerate()
                .map(|(index, enemy)| ActiveEnemy { index, enemy })
                .collect(),
            platforms,
            semisolids,
            objective: 0,
            tick: 0,
        }
    }

    /// Build every entity a level describes. Fails without partial state if
    /// any platform is invalid.
    pub fn from_level(level: &Level, config: SimConfig) -> Result<Self> {
        let (platforms, semisolids) = level.build(&config.platforms)?;
        let gravity = config.physics.gravity;
        let player = Player::new(level.respawn.as_vec2(), &config.player, gravity);
        let enemies = level
            .enemies
            .iter()
            .map(|spawn| Enemy::spawn(spawn.kind, spawn.pos.as_vec2(), &config.enemies, gravity))
            .collect();

        let mut world = Self::new(config, player, enemies, platforms, semisolids);
        world.objective = level.objective;
        Ok(world)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().map(|active| &active.enemy)
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn semisolids(&self) -> &[SemiSolidPlatform] {
        &self.semisolids
    }

    pub fn objective(&self) -> i32 {
        self.objective
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn is_over(&self) -> bool {
        self.player.is_dead()
    }

    /// Advance the simulation by one tick of `elapsed_ms`.
    ///
    /// Does nothing once the player is dead.
    pub fn tick(&mut self, input: &PlayerInput, elapsed_ms: f32) -> Vec<SimEvent> {
        if self.player.is_dead() {
            return Vec::new();
        }
        let mut events = Vec::new();
        let health_before = self.player.health;

        if input.pound && self.player.start_ground_pound() {
            events.push(SimEvent::GroundPoundStarted);
        }
        self.player.steer(input);
        if input.jump {
            self.player.jump(input.high_jump);
        }

        if self.player.advance_ground_pound(elapsed_ms) {
            events.push(SimEvent::GroundPoundFinished);
        }

        self.player.body.integrate();
        if self.config.physics.clamp_to_screen {
            self.clamp_player_to_screen();
        }

        self.update_enemies(elapsed_ms, &mut events);

        resolve(&mut self.player, &self.platforms, &self.semisolids);

        if self.player.health < health_before {
            events.push(SimEvent::PlayerDamaged {
                health: self.player.health,
            });
        }

        self.player.tick_invulnerability(elapsed_ms);

        for platform in &mut self.platforms {
            platform.advance(elapsed_ms);
        }

        self.tick += 1;
        if self.player.is_dead() {
            tracing::info!(tick = self.tick, "player died");
            events.push(SimEvent::PlayerDied);
        }
        events
    }

    fn clamp_player_to_screen(&mut self) {
        let body = &mut self.player.body;
        let max_x = self.config.physics.screen_width - body.size.x as f32;
        if body.pos.x > max_x {
            body.pos.x = max_x;
            body.x_speed = 0.0;
        } else if body.pos.x < 0.0 {
            body.pos.x = 0.0;
            body.x_speed = 0.0;
        }

        let max_y = self.config.physics.screen_height;
        if body.pos.y > max_y {
            body.pos.y = max_y;
            body.y_speed = 0.0;
        }
    }

    fn update_enemies(&mut self, elapsed_ms: f32, events: &mut Vec<SimEvent>) {
        let player_rect = self.player.body.rect();
        let player_center = self.player.body.center();
        let mut removed = Vec::new();

        for active in &mut self.enemies {
            let index = active.index;
            match &mut active.enemy {
                Enemy::Fool(fool) if fool.is_squished() => {
                    if fool.advance_squish(elapsed_ms) {
                        removed.push(index);
                    }
                },
                Enemy::Fool(fool) => {
                    fool.update(&self.platforms, &self.semisolids);
                    let fool_rect = fool.body.rect();
                    if !fool_rect.overlaps(&player_rect) {
                        continue;
                    }

                    // Falling onto the upper half is a stomp; anything else hurts.
                    let stomped = player_rect.bottom() <= fool_rect.center().y
                        && self.player.body.y_speed > 0.0;
                    if stomped {
                        tracing::debug!(index, "enemy stomped");
                        events.push(SimEvent::EnemyStomped { index });
                        match fool.variant {
                            FoolVariant::Walker => fool.begin_squish(),
                            FoolVariant::Jumper => removed.push(index),
                        }
                    } else {
                        self.player.hurt();
                    }
                },
                Enemy::Ghost(ghost) => {
                    ghost.steer_toward(player_center);
                    if ghost.contact_box().overlaps(&player_rect) {
                        self.player.hurt();
                        removed.push(index);
                    }
                },
            }
        }

        if removed.is_empty() {
            return;
        }
        self.enemies.retain(|active| !removed.contains(&active.index));
        for index in removed {
            tracing::debug!(index, "enemy removed");
            events.push(SimEvent::EnemyRemoved { index });
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let player = &self.player;
        WorldSnapshot {
            tick: self.tick,
            objective: self.objective,
            player: PlayerSnapshot {
                rect: player.body.rect(),
                health: player.health,
                grounded: player.body.grounded,
                invulnerable: player.is_invulnerable(),
                visible: player.is_visible,
                spinning: player.is_spinning,
                spin_angle: player.spin_angle,
            },
            enemies: self
                .enemies
                .iter()
                .map(|active| EnemySnapshot {
                    index: active.index,
                    kind: active.enemy.kind(),
                    rect: active.enemy.rect(),
                    squished: matches!(&active.enemy, Enemy::Fool(f) if f.is_squished()),
                })
                .collect(),
            platforms: self.platforms.iter().map(Platform::rect).collect(),
            semisolids: self.semisolids.iter().map(SemiSolidPlatform::rect).collect(),
        }
    }

    /// MessagePack encoding of [`World::snapshot`].
    pub fn serialize_snapshot(&self) -> std::result::Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec(&self.snapshot())
    }
}

impl Drawable for World {
    fn draw(&self, canvas: &mut dyn Canvas) {
        for platform in &self.platforms {
            platform.draw(canvas);
        }
        for semisolid in &self.semisolids {
            semisolid.draw(canvas);
        }
        for active in &self.enemies {
            active.enemy.draw(canvas);
        }
        self.player.draw(canvas);
    }
}
