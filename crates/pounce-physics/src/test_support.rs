use glam::{IVec2, Vec2};

use crate::body::{Body, CollisionCharacter};
use crate::config::GRAVITY;
use crate::platform::Platform;

/// Body at `(x, y)` with default gravity and the standard fall cap.
pub fn body_at(x: f32, y: f32, w: i32, h: i32) -> Body {
    Body::new(Vec2::new(x, y), IVec2::new(w, h), GRAVITY, 7.5)
}

/// Character that records every hook the resolver fires.
#[derive(Debug)]
pub struct Probe {
    pub body: Body,
    pub tops: usize,
    pub lefts: usize,
    pub rights: usize,
    pub bottoms: usize,
    /// `is_top_side` of each spike hook, in order.
    pub spikes: Vec<bool>,
}

impl Probe {
    pub fn new(body: Body) -> Self {
        Self {
            body,
            tops: 0,
            lefts: 0,
            rights: 0,
            bottoms: 0,
            spikes: Vec::new(),
        }
    }
}

impl CollisionCharacter for Probe {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn on_top_collision(&mut self) {
        self.tops += 1;
    }

    fn on_left_collision(&mut self) {
        self.lefts += 1;
    }

    fn on_right_collision(&mut self) {
        self.rights += 1;
    }

    fn on_bottom_collision(&mut self) {
        self.bottoms += 1;
    }

    fn on_spike_collision(&mut self, is_top_side: bool, _platform: &Platform) {
        self.spikes.push(is_top_side);
    }
}
