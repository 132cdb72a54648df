// src/views/grid/tile.rs
//
// BeltTile is the per-tile updating entity in the visualisation.
//
// It holds the state that makes one tile unique (address, kind,
// direction, autospawn, live tokens) and provides methods for updating
// that state. The stripe field and tokens are drawn from current state
// every frame, so a direction change shows up on the next frame without
// touching tokens already in flight.

use nannou::prelude::*;

use crate::{
    animation::{TokenTravel, TravelEngine},
    models::{Direction, TileAddress},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Belt,
    Platform,
}

// A token snapshots its tile's direction at spawn time; the tile's
// direction may change underneath it without effect.
#[derive(Debug, Clone)]
pub struct Token {
    pub direction: Direction,
    pub travel: TokenTravel,
    pub tint: Option<Rgb<f32>>,
}

pub struct BeltTile {
    pub address: Option<TileAddress>,
    pub raw_id: String,
    pub kind: TileKind,
    pub autospawn: bool,
    pub center: Point2,
    pub tokens: Vec<Token>,

    direction: Direction,

    // set at creation when autospawn is on; cleared when the one
    // initial spawn fires on the following update frame
    pub pending_autospawn: bool,
}

impl BeltTile {
    pub fn new(
        raw_id: &str,
        kind: TileKind,
        direction: Direction,
        autospawn: bool,
        center: Point2,
    ) -> Self {
        Self {
            address: TileAddress::parse(raw_id),
            raw_id: raw_id.to_string(),
            kind,
            autospawn,
            center,
            tokens: Vec::new(),
            direction,
            pending_autospawn: autospawn,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn can_spawn(&self) -> bool {
        self.kind == TileKind::Belt
    }

    /// Create one token travelling in the tile's current direction.
    /// Every call appends an independent token; there is no dedup and
    /// no rate limit.
    pub fn spawn(
        &mut self,
        engine: &TravelEngine,
        tile_size: f32,
        time: f32,
        tint: Option<Rgb<f32>>,
    ) {
        let direction = self.direction;
        self.tokens.push(Token {
            direction,
            travel: engine.build(self.center, tile_size, direction, time),
            tint,
        });
    }

    /// Drop tokens whose travel has completed. Each token's lifecycle
    /// is independent of its siblings and of any handoff.
    pub fn update(&mut self, time: f32) {
        self.tokens.retain(|token| !token.travel.is_complete(time));
    }

    pub fn is_at_rest(&self) -> bool {
        self.tokens.is_empty() && !self.pending_autospawn
    }
}
