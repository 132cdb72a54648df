// src/config/config_types.rs
//
// Config types for the app

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct PathConfig {
    pub layout_file: String,
}

#[derive(Debug, Deserialize)]
pub struct StyleConfig {
    pub background: [f32; 3],
    pub belt_dark: [f32; 3],
    pub belt_light: [f32; 3],
    pub platform: [f32; 3],
    pub stripe_period: f32,
    pub token_glyph: String,
    pub token_font_size: u32,
}

#[derive(Debug, Deserialize)]
pub struct OscConfig {
    pub rx_port: u16,
}

/************************* Animation Configs ********************/

// The belt surface scroll: one full stripe period per cycle.
#[derive(Debug, Deserialize)]
pub struct BeltConfig {
    pub scroll_cycle: f32,
}

// Token travel across one tile. handoff_fraction is the share of the
// travel duration after which the neighbor's spawn fires; the token
// itself always runs to the full duration.
#[derive(Debug, Deserialize, Clone)]
pub struct TravelSettings {
    pub duration: f32,
    pub handoff_fraction: f32,
    #[serde(default)]
    pub easing: String,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    pub tile_size: f32,
    pub gap: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}
