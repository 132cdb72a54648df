// src/draw/belt_draw.rs
//
// Draws one tile: a dark base square with light diagonal stripes
// scrolling in the tile's direction, or a plain slab for platforms.
//
// Stripes are lines of constant x+y (up-right / down-left tiles) or
// constant x-y (up-left / down-right tiles), clipped to the tile
// square analytically. The stripe phase advances one full period per
// scroll cycle, signed so the surface appears to run with the belt.

use nannou::prelude::*;

use crate::draw::BeltDrawParams;
use crate::models::Direction;
use crate::views::{BeltTile, TileKind};

// Which diagonal family the stripes belong to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StripeFamily {
    Sum,  // x + y = c
    Diff, // x - y = c
}

pub fn draw_tile(draw: &Draw, tile: &BeltTile, params: &BeltDrawParams, time: f32) {
    let size = params.tile_size;

    if tile.kind == TileKind::Platform {
        draw.rect()
            .xy(tile.center)
            .w_h(size, size)
            .color(params.platform);
        return;
    }

    draw.rect().xy(tile.center).w_h(size, size).color(params.dark);

    let (family, sign) = stripe_orientation(tile.direction());
    let half = size / 2.0;

    // stripe spacing measured perpendicular to the stripes, like the
    // period of a repeating gradient
    let c_step = params.stripe_period * std::f32::consts::SQRT_2;
    let phase = (time / params.scroll_cycle).fract() * c_step * sign;

    // enough bands to cover the whole diagonal span either way
    let band_count = (4.0 * half / c_step).ceil() as i32 + 2;
    for band in -band_count..=band_count {
        let c = band as f32 * c_step + phase;
        if let Some((a, b)) = stripe_span(c, half, family) {
            draw.line()
                .start(tile.center + a)
                .end(tile.center + b)
                .stroke_weight(params.stripe_period / 2.0)
                .color(params.light);
        }
    }
}

// Up-right and down-left belts share one stripe angle, up-left and
// down-right the other; the sign makes the phase run with the belt.
fn stripe_orientation(direction: Direction) -> (StripeFamily, f32) {
    match direction {
        Direction::UpRight => (StripeFamily::Sum, 1.0),
        Direction::DownLeft => (StripeFamily::Sum, -1.0),
        Direction::DownRight => (StripeFamily::Diff, 1.0),
        Direction::UpLeft => (StripeFamily::Diff, -1.0),
    }
}

/// Clip one stripe line to the tile-local square [-half, half]^2.
/// Returns the two endpoints, or None when the line misses the square.
pub fn stripe_span(c: f32, half: f32, family: StripeFamily) -> Option<(Point2, Point2)> {
    let x_min = (-half).max(c - half);
    let x_max = half.min(c + half);
    if x_min > x_max {
        return None;
    }

    let point = |x: f32| match family {
        StripeFamily::Sum => pt2(x, c - x),
        StripeFamily::Diff => pt2(x, x - c),
    };

    Some((point(x_min), point(x_max)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_stripe_runs_corner_to_corner() {
        let (a, b) = stripe_span(0.0, 50.0, StripeFamily::Sum).unwrap();
        assert_eq!(a, pt2(-50.0, 50.0));
        assert_eq!(b, pt2(50.0, -50.0));

        let (a, b) = stripe_span(0.0, 50.0, StripeFamily::Diff).unwrap();
        assert_eq!(a, pt2(-50.0, -50.0));
        assert_eq!(b, pt2(50.0, 50.0));
    }

    #[test]
    fn test_offset_stripe_is_clipped() {
        let (a, b) = stripe_span(50.0, 50.0, StripeFamily::Sum).unwrap();
        assert_eq!(a, pt2(0.0, 50.0));
        assert_eq!(b, pt2(50.0, 0.0));
    }

    #[test]
    fn test_far_stripe_misses_the_square() {
        assert!(stripe_span(101.0, 50.0, StripeFamily::Sum).is_none());
        assert!(stripe_span(-101.0, 50.0, StripeFamily::Diff).is_none());
    }

    #[test]
    fn test_span_points_stay_on_the_stripe_line() {
        let (a, b) = stripe_span(30.0, 50.0, StripeFamily::Sum).unwrap();
        assert!((a.x + a.y - 30.0).abs() < 1e-6);
        assert!((b.x + b.y - 30.0).abs() < 1e-6);

        let (a, b) = stripe_span(-20.0, 50.0, StripeFamily::Diff).unwrap();
        assert!((a.x - a.y + 20.0).abs() < 1e-6);
        assert!((b.x - b.y + 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_paired_directions_share_a_family() {
        assert_eq!(stripe_orientation(Direction::UpRight).0, StripeFamily::Sum);
        assert_eq!(stripe_orientation(Direction::DownLeft).0, StripeFamily::Sum);
        assert_eq!(
            stripe_orientation(Direction::UpLeft).0,
            StripeFamily::Diff
        );
        assert_eq!(
            stripe_orientation(Direction::DownRight).0,
            StripeFamily::Diff
        );

        // opposite directions scroll opposite ways
        let (_, up) = stripe_orientation(Direction::UpRight);
        let (_, down) = stripe_orientation(Direction::DownLeft);
        assert_eq!(up, -down);
    }
}
