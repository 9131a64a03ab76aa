use glam::IVec2;

use pounce_core::{Rect, Side};

use crate::body::{Body, CollisionCharacter};
use crate::platform::{Platform, SemiSolidPlatform};

/// Extra gap left between a character and a wall it was pushed out of.
const WALL_GAP: i32 = 1;
/// Extra gap left below a ceiling the character bumped.
const CEILING_GAP: i32 = 2;
/// Walls ignore characters whose bottom is within this many pixels below the
/// platform top, so standing on a corner does not snag.
const CORNER_TOLERANCE_TOP: i32 = 1;
/// Walls ignore characters whose top is within this many pixels above the
/// platform bottom, so jumping up past an edge does not snag.
const CORNER_TOLERANCE_BOTTOM: i32 = 3;
const HALF_PIXEL: f32 = 0.5;
/// How far outside the box a hazard side still counts as touched.
const HAZARD_REACH: i32 = 1;

/// Resolve one character against the level for one tick.
///
/// Platforms are processed in slice order and each side is evaluated
/// independently, so overlapping platforms can produce order-dependent
/// results.
pub fn resolve<C: CollisionCharacter + ?Sized>(
    character: &mut C,
    platforms: &[Platform],
    semisolids: &[SemiSolidPlatform],
) {
    let mut rect = character.body().rect();

    let supported = platforms.iter().any(|p| rect.rests_on(&p.rect()))
        || semisolids.iter().any(|s| rect.rests_on(&s.rect()));
    if !supported {
        character.body_mut().grounded = false;
    }

    if !character.body().grounded {
        character.body_mut().fall();
    }

    for platform in platforms {
        for side in Side::ALL {
            let segment = platform.side(side);
            if let Some((contact, _)) = rect.clip_segment(&segment) {
                resolve_side(character, &mut rect, platform, side, contact);
            }

            // Resting flush against the hazard counts as touching it.
            if platform.hazard_side() == Some(side)
                && rect.inflated(HAZARD_REACH).clip_segment(&segment).is_some()
            {
                character.on_spike_collision(side == Side::Top, platform);
            }
        }

        if let Some(route) = platform.route()
            && rect.overlaps(&route.carry_sensor())
        {
            shift(character.body_mut(), &mut rect, route.velocity());
        }
    }

    for semisolid in semisolids {
        let top = semisolid.top_side();
        if !rect.overlaps_horizontally(&semisolid.rect()) || rect.clip_segment(&top).is_none() {
            continue;
        }
        // Only a character whose previous bottom was at or above the
        // surface lands; anything coming from below passes through. The box
        // rounds half-up, so a canonical bottom under `surface + 0.5` kept the
        // box clear of the surface row.
        let body = character.body();
        if body.bottom() - body.y_speed < top.start.y as f32 + HALF_PIXEL {
            let dy = top.start.y - rect.bottom();
            land(character.body_mut(), &mut rect, dy);
            character.on_top_collision();
        }
    }
}

fn resolve_side<C: CollisionCharacter + ?Sized>(
    character: &mut C,
    rect: &mut Rect,
    platform: &Platform,
    side: Side,
    contact: IVec2,
) {
    match side {
        Side::Top => resolve_floor(character, rect, platform.rect(), contact),
        Side::Left => {
            if spans_overlap(*rect, platform.rect()) {
                let depth = rect.right() - contact.x;
                shift(character.body_mut(), rect, IVec2::new(-depth - WALL_GAP, 0));
                character.body_mut().x_speed = 0.0;
                character.on_left_collision();
            }
        },
        Side::Right => {
            if spans_overlap(*rect, platform.rect()) {
                let depth = rect.left() - contact.x;
                shift(character.body_mut(), rect, IVec2::new(-depth + WALL_GAP, 0));
                character.body_mut().x_speed = 0.0;
                character.on_right_collision();
            }
        },
        Side::Bottom => {
            let depth = contact.y - rect.top();
            shift(character.body_mut(), rect, IVec2::new(0, depth + CEILING_GAP));
            character.body_mut().y_speed = 0.0;
            character.on_bottom_collision();
        },
    }
}

fn resolve_floor<C: CollisionCharacter + ?Sized>(
    character: &mut C,
    rect: &mut Rect,
    platform: Rect,
    contact: IVec2,
) {
    // The top side's end point lies one column past the box, so a body
    // flush beside the platform still clips it.
    let falling = character.body().y_speed > 0.0;
    if falling && rect.center().y <= platform.top() && rect.overlaps_horizontally(&platform) {
        let depth = rect.bottom() - contact.y;
        land(character.body_mut(), rect, -depth);
        character.on_top_collision();
    }
}

/// Vertical spans overlap by more than the corner tolerance band.
fn spans_overlap(rect: Rect, platform: Rect) -> bool {
    rect.bottom() - CORNER_TOLERANCE_TOP > platform.top()
        && rect.top() < platform.bottom() - CORNER_TOLERANCE_BOTTOM
}

fn shift(body: &mut Body, rect: &mut Rect, delta: IVec2) {
    body.shift(delta);
    rect.translate(delta);
}

/// Move vertically by `dy` and come to rest exactly on the surface.
fn land(body: &mut Body, rect: &mut Rect, dy: i32) {
    rect.translate(IVec2::new(0, dy));
    body.pos.y = rect.y as f32;
    body.y_speed = 0.0;
    body.grounded = true;
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::test_support::*;

    #[test]
    fn landing_snaps_bottom_to_platform_top() {
        let floor = [Platform::solid(IVec2::new(0, 100), IVec2::new(200, 50))];
        let mut body = body_at(50.0, 75.0, 20, 30); // bottom at 105
        body.y_speed = 5.0;

        resolve(&mut body, &floor, &[]);

        assert!(body.grounded);
        assert_eq!(body.y_speed, 0.0);
        assert_eq!(body.rect().bottom(), 100);
        assert_eq!(body.bottom(), 100.0, "Canonical position snaps too");
    }

    #[test]
    fn rising_body_does_not_land() {
        let floor = [Platform::solid(IVec2::new(0, 100), IVec2::new(200, 50))];
        let mut body = body_at(50.0, 75.0, 20, 30);
        body.y_speed = -5.0;

        resolve(&mut body, &floor, &[]);

        assert!(!body.grounded);
        assert_eq!(body.rect().y, 75);
    }

    #[test]
    fn body_with_center_below_top_does_not_land() {
        let floor = [Platform::solid(IVec2::new(0, 100), IVec2::new(200, 50))];
        // Center at y = 101, below the top edge.
        let mut body = body_at(50.0, 86.0, 20, 30);
        body.y_speed = 2.0;

        resolve(&mut body, &floor, &[]);

        assert!(!body.grounded, "Must not pop up onto a platform it is inside");
    }

    #[test]
    fn resting_body_stays_grounded() {
        let floor = [Platform::solid(IVec2::new(0, 100), IVec2::new(200, 50))];
        let mut body = body_at(50.0, 70.0, 20, 30);
        body.grounded = true;

        for _ in 0..10 {
            resolve(&mut body, &floor, &[]);
        }

        assert!(body.grounded);
        assert_eq!(body.y_speed, 0.0, "Resting contact must not accumulate gravity");
    }

    #[test]
    fn airborne_body_falls() {
        let mut body = body_at(0.0, 0.0, 10, 10);
        body.grounded = true;
        resolve(&mut body, &[], &[]);
        assert!(!body.grounded);
        assert!((body.y_speed - 0.3).abs() < 1e-6);
    }

    #[test]
    fn body_stopped_flush_past_a_ledge_falls() {
        let floor = [Platform::solid(IVec2::new(0, 100), IVec2::new(100, 50))];
        let mut body = body_at(90.0, 80.0, 20, 20);
        body.grounded = true;
        body.x_speed = 1.0;

        for _ in 0..10 {
            body.integrate();
            resolve(&mut body, &floor, &[]);
        }
        assert_eq!(body.rect().left(), floor[0].rect().right());
        assert!(!body.grounded, "Corner contact is not support");

        body.x_speed = 0.0;
        for _ in 0..60 {
            body.integrate();
            resolve(&mut body, &floor, &[]);
        }

        assert!(!body.grounded);
        assert!(body.rect().left() >= 100);
        assert!(body.rect().top() > 150, "Body should drop past the ledge, at {:?}", body.rect());
    }

    #[test]
    fn body_flush_past_a_semi_solid_falls() {
        let ledge = [SemiSolidPlatform::new(IVec2::new(0, 100), IVec2::new(80, 10))];
        let mut body = body_at(80.0, 80.0, 20, 20);
        body.grounded = true;

        for _ in 0..30 {
            body.integrate();
            resolve(&mut body, &[], &ledge);
        }

        assert!(!body.grounded);
        assert!(body.rect().top() > 110);
    }

    #[test]
    fn moving_right_into_left_side_pushes_back_with_gap() {
        let wall = [Platform::solid(IVec2::new(100, 0), IVec2::new(20, 200))];
        let mut body = body_at(85.0, 50.0, 20, 20); // right edge at 105
        body.x_speed = 3.0;
        body.grounded = true;

        resolve(&mut body, &wall, &[]);

        assert_eq!(body.rect().right(), 99);
        assert_eq!(body.x_speed, 0.0);
    }

    #[test]
    fn moving_left_into_right_side_pushes_back_with_gap() {
        let wall = [Platform::solid(IVec2::new(0, 0), IVec2::new(20, 200))];
        let mut body = body_at(15.0, 50.0, 20, 20);
        body.x_speed = -3.0;
        body.grounded = true;

        resolve(&mut body, &wall, &[]);

        assert_eq!(body.rect().left(), 21);
        assert_eq!(body.x_speed, 0.0);
    }

    #[test]
    fn wall_resolution_is_idempotent() {
        let wall = [Platform::solid(IVec2::new(100, 0), IVec2::new(20, 200))];
        let mut body = body_at(85.0, 50.0, 20, 20);
        body.x_speed = 3.0;
        resolve(&mut body, &wall, &[]);
        let x_after_first = body.rect().x;

        body.x_speed = 3.0;
        resolve(&mut body, &wall, &[]);

        assert_eq!(body.rect().x, x_after_first);
    }

    #[test]
    fn standing_on_corner_does_not_snag_on_wall() {
        let block = [Platform::solid(IVec2::new(100, 100), IVec2::new(50, 50))];
        // Sunk one pixel into the top while overhanging the left edge.
        let mut body = body_at(85.0, 81.0, 20, 20);
        body.grounded = true;

        resolve(&mut body, &block, &[]);

        assert_eq!(body.rect().x, 85, "Corner contact must not push sideways");
    }

    #[test]
    fn jumping_into_ceiling_pushes_down_with_margin() {
        let ceiling = [Platform::solid(IVec2::new(0, 0), IVec2::new(200, 50))];
        let mut body = body_at(50.0, 45.0, 20, 20);
        body.y_speed = -6.0;

        resolve(&mut body, &ceiling, &[]);

        assert_eq!(body.rect().top(), 52);
        assert_eq!(body.y_speed, 0.0);
    }

    #[test]
    fn spike_hook_fires_on_hazard_side_only() {
        let spikes = [Platform::spikes(IVec2::new(0, 100), 5, 20, 20, 0).unwrap()];
        let mut probe = Probe::new(body_at(30.0, 75.0, 20, 30));
        probe.body.y_speed = 4.0;

        resolve(&mut probe, &spikes, &[]);

        assert_eq!(probe.spikes, vec![true]);
        assert_eq!(probe.tops, 1);

        // Bumping the bottom of upright spikes is harmless.
        let mut below = Probe::new(body_at(30.0, 115.0, 20, 20));
        below.body.y_speed = -4.0;
        resolve(&mut below, &spikes, &[]);
        assert!(below.spikes.is_empty());
        assert_eq!(below.bottoms, 1);
    }

    #[test]
    fn spike_hook_fires_even_without_push_out() {
        let spikes = [Platform::spikes(IVec2::new(0, 100), 5, 20, 20, 0).unwrap()];
        // Rising through the top edge: no floor resolution, but still contact.
        let mut probe = Probe::new(body_at(30.0, 75.0, 20, 30));
        probe.body.y_speed = -1.0;

        resolve(&mut probe, &spikes, &[]);

        assert_eq!(probe.tops, 0);
        assert_eq!(probe.spikes, vec![true]);
    }

    #[test]
    fn resting_on_spikes_keeps_touching_hazard() {
        let spikes = [Platform::spikes(IVec2::new(0, 100), 5, 20, 20, 0).unwrap()];
        let mut probe = Probe::new(body_at(30.0, 80.0, 20, 20));
        probe.body.grounded = true;

        resolve(&mut probe, &spikes, &[]);
        resolve(&mut probe, &spikes, &[]);

        assert_eq!(probe.spikes, vec![true, true]);
        assert_eq!(probe.tops, 0, "Resting contact is not a landing");
    }

    #[test]
    fn rider_moves_with_platform_velocity() {
        let mut lift = Platform::solid(IVec2::ZERO, IVec2::new(80, 15)).with_route(
            IVec2::new(100, 100),
            IVec2::new(200, 100),
            0.0,
        );
        lift.advance(16.0);
        assert_eq!(lift.velocity(), IVec2::new(1, 0));

        let top = lift.rect().top();
        let mut body = body_at(90.0, (top - 20) as f32, 20, 20);
        body.grounded = true;
        let before = body.rect();

        resolve(&mut body, std::slice::from_ref(&lift), &[]);

        assert_eq!(body.rect().x, before.x + 1);
        assert_eq!(body.rect().y, before.y);
    }

    #[test]
    fn rider_stays_flush_on_vertical_route() {
        for (end_y, dy) in [(60, -1), (140, 1)] {
            let mut lift = Platform::solid(IVec2::ZERO, IVec2::new(80, 15)).with_route(
                IVec2::new(100, 100),
                IVec2::new(100, end_y),
                0.0,
            );
            lift.advance(16.0);
            assert_eq!(lift.velocity(), IVec2::new(0, dy));

            let mut body = body_at(90.0, (lift.rect().top() - 20) as f32, 20, 20);
            body.grounded = true;

            for _ in 0..10 {
                let before = body.rect();
                body.integrate();
                resolve(&mut body, std::slice::from_ref(&lift), &[]);
                lift.advance(16.0);

                assert_eq!(body.rect().y, before.y + dy, "Rider moves with the lift");
                assert_eq!(body.rect().bottom(), lift.rect().top());
                assert!(body.grounded);
            }
        }
    }

    #[test]
    fn semi_solid_stops_falling_body() {
        let ledge = [SemiSolidPlatform::new(IVec2::new(0, 100), IVec2::new(80, 10))];
        let mut body = body_at(10.0, 74.0, 20, 30); // bottom at 104, came from 100
        body.y_speed = 3.7;

        resolve(&mut body, &[], &ledge);

        assert!(body.grounded);
        assert_eq!(body.rect().bottom(), 100);
        assert_eq!(body.y_speed, 0.0);
    }

    #[test]
    fn semi_solid_lets_rising_body_through() {
        let ledge = [SemiSolidPlatform::new(IVec2::new(0, 100), IVec2::new(80, 10))];
        let mut body = body_at(10.0, 90.0, 20, 30);
        body.y_speed = -7.0;

        resolve(&mut body, &[], &ledge);

        assert!(!body.grounded);
        assert_eq!(body.rect().y, 90);
    }

    #[test]
    fn semi_solid_ignores_body_below() {
        let ledge = [SemiSolidPlatform::new(IVec2::new(0, 100), IVec2::new(80, 10))];
        let mut body = body_at(10.0, 120.0, 20, 20);
        body.y_speed = 2.0;
        let before = body.rect();

        resolve(&mut body, &[], &ledge);

        assert_eq!(body.rect(), before);
        assert!(!body.grounded);
    }

    #[test]
    fn overlapping_platforms_resolve_in_slice_order() {
        let a = Platform::solid(IVec2::new(0, 100), IVec2::new(100, 20));
        let b = Platform::solid(IVec2::new(0, 95), IVec2::new(100, 20));
        let mut first = body_at(10.0, 82.0, 20, 20);
        first.y_speed = 2.0;
        let mut second = first.clone();

        resolve(&mut first, &[a.clone(), b.clone()], &[]);
        resolve(&mut second, &[b, a], &[]);

        // `a` lands the body first; `b` is then skipped because the body is
        // no longer falling, leaving it embedded in `b`.
        assert_eq!(first.rect().bottom(), 100);
        assert_eq!(second.rect().bottom(), 95);
        assert!(first.grounded && second.grounded);
    }

    #[test]
    fn fractional_approach_lands_exactly() {
        let floor = [Platform::solid(IVec2::new(0, 100), IVec2::new(200, 50))];
        let mut body = body_at(10.0, 20.0, 20, 20);
        body.pos += Vec2::new(0.0, 0.37);

        for _ in 0..200 {
            body.integrate();
            resolve(&mut body, &floor, &[]);
        }

        assert!(body.grounded);
        assert_eq!(body.y_speed, 0.0);
        assert_eq!(body.rect().bottom(), 100);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn falling_onto_platform_converges(
                x in 0.0f32..150.0,
                start_y in -200.0f32..60.0,
                y_speed in 0.0f32..7.5,
                w in 4i32..40,
                h in 16i32..40,
            ) {
                let floor = [Platform::solid(IVec2::new(0, 100), IVec2::new(200, 50))];
                let mut body = body_at(x, start_y.min(100.0 - h as f32 - 1.0), w, h);
                body.y_speed = y_speed;

                for _ in 0..300 {
                    body.integrate();
                    resolve(&mut body, &floor, &[]);
                }

                prop_assert!(body.grounded);
                prop_assert_eq!(body.y_speed, 0.0);
                prop_assert_eq!(body.rect().bottom(), 100);
            }

            #[test]
            fn semi_solid_never_stops_rising_body(
                x in 0.0f32..60.0,
                y in 60.0f32..140.0,
                y_speed in -7.5f32..-0.5,
                h in 4i32..40,
            ) {
                let ledge = [SemiSolidPlatform::new(IVec2::new(0, 100), IVec2::new(80, 10))];
                let mut body = body_at(x, y, 20, h);
                body.y_speed = y_speed;
                let before = body.rect();

                resolve(&mut body, &[], &ledge);

                prop_assert_eq!(body.rect(), before);
                prop_assert!(!body.grounded);
            }

            #[test]
            fn semi_solid_catches_body_from_above(
                x in 0.0f32..60.0,
                gap in 0.0f32..6.0,
                y_speed in 0.5f32..7.5,
                h in 12i32..40,
            ) {
                let ledge = [SemiSolidPlatform::new(IVec2::new(0, 100), IVec2::new(80, 10))];
                let mut body = body_at(x, 100.0 - h as f32 - gap, 20, h);
                body.y_speed = y_speed;

                for _ in 0..60 {
                    body.integrate();
                    resolve(&mut body, &[], &ledge);
                }

                prop_assert!(body.grounded);
                prop_assert_eq!(body.rect().bottom(), 100);
            }
        }
    }
}
