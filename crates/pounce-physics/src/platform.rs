use glam::IVec2;
use serde::{Deserialize, Serialize};

use pounce_core::{PounceError, Rect, Result, Segment, Side};

/// Collidable box with four boundary sides.
///
/// Spikes and moving platforms are ordinary platforms carrying an optional
/// hazard side or an optional travel route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    rect: Rect,
    /// Kept for level data; collision sides are always axis-aligned.
    orientation: i32,
    sides: [Segment; 4],
    hazard_side: Option<Side>,
    teeth: Option<Teeth>,
    route: Option<Route>,
}

impl Platform {
    pub fn solid(top_left: IVec2, size: IVec2) -> Self {
        let rect = Rect::new(top_left.x, top_left.y, size.x, size.y);
        Self {
            rect,
            orientation: 0,
            sides: rect.sides(),
            hazard_side: None,
            teeth: None,
            route: None,
        }
    }

    /// Row of spike teeth. `orientation` is the clockwise rotation from
    /// upright and must be 0, 90, 180 or 270.
    pub fn spikes(
        top_left: IVec2,
        tooth_count: i32,
        tooth_height: i32,
        tooth_width: i32,
        orientation: i32,
    ) -> Result<Self> {
        if orientation % 90 != 0 || !(0..=270).contains(&orientation) {
            return Err(PounceError::InvalidOrientation(orientation));
        }

        let (hazard_side, size) = match orientation {
            0 => (Side::Top, IVec2::new(tooth_count * tooth_width, tooth_height)),
            90 => (Side::Right, IVec2::new(tooth_height, tooth_count * tooth_width)),
            180 => (Side::Bottom, IVec2::new(tooth_count * tooth_width, tooth_height)),
            _ => (Side::Left, IVec2::new(tooth_height, tooth_count * tooth_width)),
        };

        let mut platform = Self::solid(top_left, size);
        platform.orientation = orientation;
        platform.hazard_side = Some(hazard_side);
        platform.teeth = Some(Teeth {
            count: tooth_count,
            width: tooth_width,
            height: tooth_height,
            facing: hazard_side,
        });
        Ok(platform)
    }

    /// Turn this platform into one that shuttles between two waypoint
    /// centers, starting at `start` and dwelling there first.
    pub fn with_route(mut self, start: IVec2, end: IVec2, dwell_ms: f32) -> Self {
        let rect = Rect::from_center(start, self.rect.w, self.rect.h);
        self.set_rect(rect);
        self.route = Some(Route::new(rect, [start, end], dwell_ms));
        self
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn orientation(&self) -> i32 {
        self.orientation
    }

    pub fn sides(&self) -> &[Segment; 4] {
        &self.sides
    }

    pub fn side(&self, side: Side) -> Segment {
        self.sides[side.index()]
    }

    pub fn hazard_side(&self) -> Option<Side> {
        self.hazard_side
    }

    pub fn teeth(&self) -> Option<&Teeth> {
        self.teeth.as_ref()
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Current per-tick velocity; zero for static platforms.
    pub fn velocity(&self) -> IVec2 {
        self.route.as_ref().map_or(IVec2::ZERO, |r| r.velocity)
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.sides = rect.sides();
    }

    /// Advance the travel schedule by `elapsed_ms`. No-op for static platforms.
    pub fn advance(&mut self, elapsed_ms: f32) {
        let Some(route) = self.route.as_mut() else {
            return;
        };
        if let Some(delta) = route.advance(self.rect.center(), elapsed_ms) {
            let rect = self.rect.translated(delta);
            self.set_rect(rect);
        }
    }
}

/// Visual zig-zag of a spiked platform. Collision ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teeth {
    pub count: i32,
    pub width: i32,
    pub height: i32,
    pub facing: Side,
}

impl Teeth {
    /// Tooth triangles in screen space for a platform whose top-left is
    /// `origin`. The row overhangs by half a tooth at each end.
    pub fn polygons(&self, origin: IVec2) -> Vec<[IVec2; 3]> {
        let w = self.width;
        let h = self.height;
        let offset = w / 2;
        (0..=self.count)
            .map(|i| {
                let a = w * i - offset;
                let tip = a + w / 2;
                let b = a + w;
                let points = match self.facing {
                    Side::Top => [IVec2::new(a, h), IVec2::new(tip, 0), IVec2::new(b, h)],
                    Side::Bottom => [IVec2::new(a, 0), IVec2::new(tip, h), IVec2::new(b, 0)],
                    Side::Right => [IVec2::new(0, a), IVec2::new(h, tip), IVec2::new(0, b)],
                    Side::Left => [IVec2::new(h, a), IVec2::new(0, tip), IVec2::new(h, b)],
                };
                points.map(|p| p + origin)
            })
            .collect()
    }
}

/// Where a moving platform is in its shuttle cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RouteState {
    Dwelling { remaining_ms: f32 },
    Traveling,
}

/// Travel schedule of a moving platform.
///
/// Velocity is zero exactly while dwelling. While traveling each axis moves
/// one pixel per tick toward the target until that axis lines up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    waypoints: [IVec2; 2],
    target: usize,
    velocity: IVec2,
    state: RouteState,
    dwell_ms: f32,
    carry_sensor: Rect,
}

impl Route {
    fn new(rect: Rect, waypoints: [IVec2; 2], dwell_ms: f32) -> Self {
        Self {
            waypoints,
            target: 1,
            velocity: IVec2::ZERO,
            state: RouteState::Dwelling {
                remaining_ms: dwell_ms,
            },
            dwell_ms,
            carry_sensor: carry_sensor_for(rect),
        }
    }

    pub fn waypoints(&self) -> [IVec2; 2] {
        self.waypoints
    }

    /// Waypoint the platform is heading to (or will head to after dwelling).
    pub fn target(&self) -> IVec2 {
        self.waypoints[self.target]
    }

    pub fn velocity(&self) -> IVec2 {
        self.velocity
    }

    pub fn state(&self) -> RouteState {
        self.state
    }

    pub fn is_dwelling(&self) -> bool {
        matches!(self.state, RouteState::Dwelling { .. })
    }

    /// One-pixel strip just above the platform's top, inset by one pixel on
    /// each end. Characters overlapping it ride along.
    pub fn carry_sensor(&self) -> Rect {
        self.carry_sensor
    }

    /// Returns the translation to apply to the platform this tick.
    fn advance(&mut self, center: IVec2, elapsed_ms: f32) -> Option<IVec2> {
        match &mut self.state {
            RouteState::Dwelling { remaining_ms } => {
                *remaining_ms -= elapsed_ms;
                if *remaining_ms <= 0.0 {
                    if center == self.target() {
                        self.arrive();
                    } else {
                        self.velocity = (self.target() - center).signum();
                        self.state = RouteState::Traveling;
                        tracing::debug!(target = ?self.target(), velocity = ?self.velocity, "platform departing");
                    }
                }
                None
            },
            RouteState::Traveling => {
                let delta = self.velocity;
                let moved = center + delta;
                self.carry_sensor.translate(delta);

                let target = self.target();
                if moved.x == target.x {
                    self.velocity.x = 0;
                }
                if moved.y == target.y {
                    self.velocity.y = 0;
                }
                if moved == target {
                    self.arrive();
                }
                Some(delta)
            },
        }
    }

    fn arrive(&mut self) {
        self.velocity = IVec2::ZERO;
        self.target = 1 - self.target;
        self.state = RouteState::Dwelling {
            remaining_ms: self.dwell_ms,
        };
        tracing::debug!(next = ?self.target(), "platform dwelling");
    }
}

fn carry_sensor_for(rect: Rect) -> Rect {
    Rect::new(rect.left() + 1, rect.top() - 1, rect.w - 2, 1)
}

/// One-way platform: only its top side collides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemiSolidPlatform {
    rect: Rect,
    top_side: Segment,
}

impl SemiSolidPlatform {
    pub fn new(top_left: IVec2, size: IVec2) -> Self {
        let rect = Rect::new(top_left.x, top_left.y, size.x, size.y);
        Self {
            rect,
            top_side: Segment::new(rect.top_left(), rect.top_right()),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn top_side(&self) -> Segment {
        self.top_side
    }
}
