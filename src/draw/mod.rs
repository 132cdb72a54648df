// src/draw/mod.rs

pub mod belt_draw;
pub mod token_draw;

pub use belt_draw::draw_tile;
pub use token_draw::draw_token;

use crate::config::{BeltConfig, GridConfig, StyleConfig};
use nannou::prelude::*;

// Everything the per-tile draw calls need, lifted out of the config
// once at startup.
pub struct BeltDrawParams {
    pub tile_size: f32,
    pub dark: Rgb<f32>,
    pub light: Rgb<f32>,
    pub platform: Rgb<f32>,
    pub stripe_period: f32,
    pub scroll_cycle: f32,
    pub token_glyph: String,
    pub token_font_size: u32,
}

impl BeltDrawParams {
    pub fn from_config(style: &StyleConfig, belt: &BeltConfig, grid: &GridConfig) -> Self {
        let [dr, dg, db] = style.belt_dark;
        let [lr, lg, lb] = style.belt_light;
        let [pr, pg, pb] = style.platform;

        Self {
            tile_size: grid.tile_size,
            dark: rgb(dr, dg, db),
            light: rgb(lr, lg, lb),
            platform: rgb(pr, pg, pb),
            stripe_period: style.stripe_period,
            scroll_cycle: belt.scroll_cycle,
            token_glyph: style.token_glyph.clone(),
            token_font_size: style.token_font_size,
        }
    }
}
