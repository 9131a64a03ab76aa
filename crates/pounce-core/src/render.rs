use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const PLAYER: Color = Color::rgb(0, 0, 255);
    pub const PLATFORM: Color = Color::rgb(0, 255, 0);
    pub const SEMI_SOLID: Color = Color::rgb(255, 0, 255);
    pub const ENEMY: Color = Color::rgb(255, 0, 0);
    pub const SPIKES: Color = Color::rgb(255, 0, 0);
    pub const GHOST: Color = Color::rgba(255, 0, 0, 50);
}

/// Drawing surface supplied by the rendering layer.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_polygon(&mut self, points: &[IVec2], color: Color);
    fn fill_circle(&mut self, center: IVec2, radius: i32, color: Color);
}

/// An entity that can paint itself once per tick.
pub trait Drawable {
    fn draw(&self, canvas: &mut dyn Canvas);
}
