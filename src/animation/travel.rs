// src/animation/travel.rs
//
// The token travel engine. A TokenTravel is a one-shot crossing of a
// single tile: it enters from the corner opposite the tile's direction
// and leaves through the near corner, covering two tile-lengths so the
// entry and exit visibly overlap the neighboring tiles.

use crate::config::TravelSettings;
use crate::models::Direction;
use nannou::prelude::*;

#[derive(Debug, Clone)]
pub enum EasingType {
    Linear,
    EaseInOut,
    EaseIn,
    EaseOut,
}

impl EasingType {
    pub fn from_attr(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "ease-in-out" => EasingType::EaseInOut,
            "ease-in" => EasingType::EaseIn,
            "ease-out" => EasingType::EaseOut,
            _ => EasingType::Linear,
        }
    }

    fn apply(&self, t: f32) -> f32 {
        match self {
            EasingType::Linear => t,
            EasingType::EaseInOut => ease_in_out(t),
            EasingType::EaseIn => ease_in(t),
            EasingType::EaseOut => ease_out(t),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenTravel {
    pub start_time: f32,
    pub duration: f32,
    from: Point2,
    to: Point2,
    easing: EasingType,
}

impl TokenTravel {
    pub fn progress(&self, time: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((time - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    pub fn position(&self, time: f32) -> Point2 {
        let t = self.easing.apply(self.progress(time));
        self.from + (self.to - self.from) * t
    }

    pub fn is_complete(&self, time: f32) -> bool {
        self.progress(time) >= 1.0
    }
}

pub struct TravelEngine {
    pub duration: f32,
    pub handoff_fraction: f32,
    easing: EasingType,
}

impl TravelEngine {
    pub fn new(settings: &TravelSettings) -> Self {
        Self {
            duration: settings.duration,
            handoff_fraction: settings.handoff_fraction,
            easing: EasingType::from_attr(&settings.easing),
        }
    }

    pub fn build(
        &self,
        center: Point2,
        tile_size: f32,
        direction: Direction,
        start_time: f32,
    ) -> TokenTravel {
        let (ux, uy) = direction.unit();
        let offset = vec2(ux, uy) * tile_size;

        TokenTravel {
            start_time,
            duration: self.duration,
            from: center - offset,
            to: center + offset,
            easing: self.easing.clone(),
        }
    }

    // When the relay to the neighbor fires, relative to a spawn at
    // start_time. The token itself keeps animating past this point.
    pub fn handoff_at(&self, start_time: f32) -> f32 {
        start_time + self.duration * self.handoff_fraction
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

fn ease_in(t: f32) -> f32 {
    t * t
}

fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}
