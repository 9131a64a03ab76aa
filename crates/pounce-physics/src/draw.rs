use pounce_core::render::{Canvas, Color, Drawable};

use crate::enemy::{Enemy, Fool};
use crate::platform::{Platform, SemiSolidPlatform};
use crate::player::Player;
use crate::pursuit::GhostPursuer;

impl Drawable for Platform {
    fn draw(&self, canvas: &mut dyn Canvas) {
        match self.teeth() {
            Some(teeth) => {
                for tooth in teeth.polygons(self.rect().top_left()) {
                    canvas.fill_polygon(&tooth, Color::SPIKES);
                }
            },
            None => canvas.fill_rect(self.rect(), Color::PLATFORM),
        }
    }
}

impl Drawable for SemiSolidPlatform {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.rect(), Color::SEMI_SOLID);
    }
}

impl Drawable for Player {
    fn draw(&self, canvas: &mut dyn Canvas) {
        // Invisible half of an invulnerability blink.
        if self.is_visible {
            canvas.fill_rect(self.body.rect(), Color::PLAYER);
        }
    }
}

impl Drawable for Fool {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.body.rect(), Color::ENEMY);
    }
}

impl Drawable for GhostPursuer {
    fn draw(&self, canvas: &mut dyn Canvas) {
        let rect = self.rect();
        canvas.fill_circle(rect.center(), rect.w / 2, Color::GHOST);
    }
}

impl Drawable for Enemy {
    fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            Enemy::Fool(fool) => fool.draw(canvas),
            Enemy::Ghost(ghost) => ghost.draw(canvas),
        }
    }
}
