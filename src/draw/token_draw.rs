// src/draw/token_draw.rs
// Draws the travelling token glyph on top of its tile.

use nannou::prelude::*;

use crate::draw::BeltDrawParams;
use crate::views::Token;

pub fn draw_token(draw: &Draw, token: &Token, params: &BeltDrawParams, time: f32) {
    let position = token.travel.position(time);
    let color = token.tint.unwrap_or_else(|| rgb(1.0, 1.0, 1.0));

    draw.text(&params.token_glyph)
        .x_y(position.x, position.y)
        .font_size(params.token_font_size)
        .color(color);
}
