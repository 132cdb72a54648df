// src/views/grid/registry.rs
//
// TileRegistry is the explicit address-to-tile index for the whole
// grid. Tiles are entered when they are created and leave when they
// are removed, so a handoff timer firing against a tile that has since
// been torn down resolves to Vacant instead of reaching into thin air.
//
// Tiles whose id does not match the addressing pattern still live here
// (in the unaddressed list): they render and spawn, but they can never
// be found by a relay.

use nannou::prelude::*;
use std::collections::HashMap;

use crate::{
    animation::TravelEngine,
    config::GridConfig,
    models::{Direction, TileAddress},
    views::grid::tile::{BeltTile, TileKind},
};

/// Every way a spawn-plus-relay can end. Only Relayed continues the
/// chain; the caller schedules the returned handoff. Everything else
/// is a silent stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelayOutcome {
    /// The onward neighbor is a belt; hand off to it at fire_at.
    Relayed { next: TileAddress, fire_at: f32 },
    /// The computed neighbor address has no tile in the registry.
    NoNeighbor(TileAddress),
    /// A tile was found at the address but it cannot spawn
    /// (spawn target or onward neighbor of Platform kind).
    Incapable(TileAddress),
    /// The neighbor arithmetic left the addressable range.
    EdgeOfGrid,
    /// The spawning tile has no grid address, so it cannot relay.
    Unaddressed,
    /// The spawn target itself is no longer present.
    Vacant,
}

pub struct TileRegistry {
    tiles: HashMap<TileAddress, BeltTile>,
    unaddressed: Vec<BeltTile>,

    // grid geometry, fixed at startup
    tile_size: f32,
    stride: f32,
    origin: Point2,
}

impl TileRegistry {
    pub fn new(grid: &GridConfig) -> Self {
        Self {
            tiles: HashMap::new(),
            unaddressed: Vec::new(),
            tile_size: grid.tile_size,
            stride: grid.tile_size + grid.gap,
            origin: pt2(grid.origin_x, grid.origin_y),
        }
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Screen center of an address slot. Row a is the top row; columns
    /// grow to the right.
    pub fn slot_center(&self, address: &TileAddress) -> Point2 {
        pt2(
            self.origin.x + address.col as f32 * self.stride,
            self.origin.y - address.row_index() as f32 * self.stride,
        )
    }

    /// Build and register a tile. An id matching the addressing
    /// pattern lands in its grid slot; anything else renders at the
    /// grid origin and never relays. Re-using an address replaces the
    /// previous tile.
    pub fn add_tile(
        &mut self,
        raw_id: &str,
        kind: TileKind,
        direction: Direction,
        autospawn: bool,
    ) -> Option<TileAddress> {
        let mut tile = BeltTile::new(raw_id, kind, direction, autospawn, self.origin);

        match tile.address {
            Some(address) => {
                tile.center = self.slot_center(&address);
                if self.tiles.insert(address, tile).is_some() {
                    println!("belt: replacing tile at {}", address);
                }
                Some(address)
            }
            None => {
                self.unaddressed.push(tile);
                None
            }
        }
    }

    pub fn remove(&mut self, address: &TileAddress) -> Option<BeltTile> {
        self.tiles.remove(address)
    }

    pub fn get(&self, address: &TileAddress) -> Option<&BeltTile> {
        self.tiles.get(address)
    }

    pub fn get_mut(&mut self, address: &TileAddress) -> Option<&mut BeltTile> {
        self.tiles.get_mut(address)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len() + self.unaddressed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty() && self.unaddressed.is_empty()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
        self.unaddressed.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &BeltTile> {
        self.tiles.values().chain(self.unaddressed.iter())
    }

    /// Spawn a token on the addressed tile and resolve the onward
    /// handoff. Never panics; every failure mode is a RelayOutcome.
    pub fn spawn_at(
        &mut self,
        address: &TileAddress,
        engine: &TravelEngine,
        time: f32,
        tint: Option<Rgb<f32>>,
    ) -> RelayOutcome {
        let tile_size = self.tile_size;

        // spawn on the target first; the relay resolves afterwards so
        // the source token exists whether or not the chain continues
        let direction = match self.tiles.get_mut(address) {
            None => return RelayOutcome::Vacant,
            Some(tile) => {
                if !tile.can_spawn() {
                    return RelayOutcome::Incapable(*address);
                }
                tile.spawn(engine, tile_size, time, tint);
                tile.direction()
            }
        };

        match address.step(direction) {
            None => RelayOutcome::EdgeOfGrid,
            Some(next) => match self.tiles.get(&next) {
                None => RelayOutcome::NoNeighbor(next),
                Some(neighbor) if neighbor.can_spawn() => RelayOutcome::Relayed {
                    next,
                    fire_at: engine.handoff_at(time),
                },
                Some(_) => RelayOutcome::Incapable(next),
            },
        }
    }

    /// Fire the one-shot autospawns armed at tile creation. Runs on
    /// the first update frame after the tile appeared, so creation is
    /// settled before animation starts.
    pub fn fire_autospawns(
        &mut self,
        engine: &TravelEngine,
        time: f32,
        tint: Option<Rgb<f32>>,
    ) -> Vec<RelayOutcome> {
        let armed: Vec<TileAddress> = self
            .tiles
            .iter()
            .filter(|(_, tile)| tile.pending_autospawn)
            .map(|(address, _)| *address)
            .collect();

        let mut outcomes = Vec::new();

        for address in armed {
            if let Some(tile) = self.tiles.get_mut(&address) {
                tile.pending_autospawn = false;
            }
            outcomes.push(self.spawn_at(&address, engine, time, tint));
        }

        let tile_size = self.tile_size;
        for tile in self.unaddressed.iter_mut() {
            if tile.pending_autospawn {
                tile.pending_autospawn = false;
                if tile.can_spawn() {
                    tile.spawn(engine, tile_size, time, tint);
                }
                outcomes.push(RelayOutcome::Unaddressed);
            }
        }

        outcomes
    }

    /// Per-frame token cleanup across the whole grid.
    pub fn update(&mut self, time: f32) {
        for tile in self.tiles.values_mut() {
            tile.update(time);
        }
        for tile in self.unaddressed.iter_mut() {
            tile.update(time);
        }
    }

    pub fn is_at_rest(&self) -> bool {
        self.iter().all(|tile| tile.is_at_rest())
    }

    pub fn live_token_count(&self) -> usize {
        self.iter().map(|tile| tile.tokens.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TravelSettings;

    fn test_grid() -> GridConfig {
        GridConfig {
            tile_size: 100.0,
            gap: 0.0,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }

    fn test_engine() -> TravelEngine {
        TravelEngine::new(&TravelSettings {
            duration: 6.0,
            handoff_fraction: 0.55,
            easing: String::new(),
        })
    }

    fn addr(s: &str) -> TileAddress {
        TileAddress::parse(s).unwrap()
    }

    #[test]
    fn test_slot_centers() {
        let registry = TileRegistry::new(&test_grid());
        assert_eq!(registry.slot_center(&addr("a0")), pt2(0.0, 0.0));
        assert_eq!(registry.slot_center(&addr("a3")), pt2(300.0, 0.0));
        assert_eq!(registry.slot_center(&addr("c1")), pt2(100.0, -200.0));
    }

    #[test]
    fn test_add_and_lookup() {
        let mut registry = TileRegistry::new(&test_grid());
        let address = registry
            .add_tile("b2", TileKind::Belt, Direction::UpRight, false)
            .unwrap();
        assert_eq!(address, addr("b2"));
        assert!(registry.get(&address).is_some());
        assert_eq!(registry.tile_count(), 1);

        // duplicate address replaces the previous tile
        registry.add_tile("B2", TileKind::Platform, Direction::DownLeft, false);
        assert_eq!(registry.tile_count(), 1);
        assert!(!registry.get(&address).unwrap().can_spawn());

        registry.remove(&address);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unaddressed_tiles_are_kept_but_unreachable() {
        let mut registry = TileRegistry::new(&test_grid());
        assert_eq!(
            registry.add_tile("side-belt", TileKind::Belt, Direction::UpRight, false),
            None
        );
        assert_eq!(registry.tile_count(), 1);
        assert_eq!(registry.iter().count(), 1);
    }

    #[test]
    fn test_spawn_at_missing_tile_is_vacant() {
        let mut registry = TileRegistry::new(&test_grid());
        let outcome = registry.spawn_at(&addr("a0"), &test_engine(), 0.0, None);
        assert_eq!(outcome, RelayOutcome::Vacant);
        assert_eq!(registry.live_token_count(), 0);
    }

    #[test]
    fn test_spawn_relays_to_belt_neighbor() {
        let mut registry = TileRegistry::new(&test_grid());
        registry.add_tile("b0", TileKind::Belt, Direction::UpRight, false);
        registry.add_tile("a1", TileKind::Belt, Direction::UpRight, false);

        let outcome = registry.spawn_at(&addr("b0"), &test_engine(), 10.0, None);
        match outcome {
            RelayOutcome::Relayed { next, fire_at } => {
                assert_eq!(next, addr("a1"));
                assert!((fire_at - 13.3).abs() < 1e-4);
            }
            other => panic!("expected Relayed, got {:?}", other),
        }

        // only the source tile has a token until the handoff fires
        assert_eq!(registry.get(&addr("b0")).unwrap().tokens.len(), 1);
        assert_eq!(registry.get(&addr("a1")).unwrap().tokens.len(), 0);
    }

    #[test]
    fn test_spawn_with_no_tile_at_neighbor_address() {
        let mut registry = TileRegistry::new(&test_grid());
        registry.add_tile("b0", TileKind::Belt, Direction::DownRight, false);

        let outcome = registry.spawn_at(&addr("b0"), &test_engine(), 0.0, None);
        assert_eq!(outcome, RelayOutcome::NoNeighbor(addr("c1")));
        assert_eq!(registry.live_token_count(), 1);
    }

    #[test]
    fn test_spawn_against_platform_neighbor_is_incapable() {
        let mut registry = TileRegistry::new(&test_grid());
        registry.add_tile("b0", TileKind::Belt, Direction::UpRight, false);
        registry.add_tile("a1", TileKind::Platform, Direction::UpRight, false);

        let outcome = registry.spawn_at(&addr("b0"), &test_engine(), 0.0, None);
        assert_eq!(outcome, RelayOutcome::Incapable(addr("a1")));

        // the source still animates its own token
        assert_eq!(registry.get(&addr("b0")).unwrap().tokens.len(), 1);
    }

    #[test]
    fn test_spawn_on_platform_target_is_incapable_and_tokenless() {
        let mut registry = TileRegistry::new(&test_grid());
        registry.add_tile("b0", TileKind::Platform, Direction::UpRight, false);

        let outcome = registry.spawn_at(&addr("b0"), &test_engine(), 0.0, None);
        assert_eq!(outcome, RelayOutcome::Incapable(addr("b0")));
        assert_eq!(registry.live_token_count(), 0);
    }

    #[test]
    fn test_spawn_off_the_top_edge() {
        let mut registry = TileRegistry::new(&test_grid());
        registry.add_tile("a0", TileKind::Belt, Direction::UpRight, false);

        let outcome = registry.spawn_at(&addr("a0"), &test_engine(), 0.0, None);
        assert_eq!(outcome, RelayOutcome::EdgeOfGrid);
        assert_eq!(registry.live_token_count(), 1);
    }

    #[test]
    fn test_autospawn_fires_once_and_relays() {
        let mut registry = TileRegistry::new(&test_grid());
        registry.add_tile("b0", TileKind::Belt, Direction::UpRight, true);
        registry.add_tile("a1", TileKind::Belt, Direction::UpRight, false);
        let engine = test_engine();

        // first update frame: the armed spawn fires and reports the relay
        let outcomes = registry.fire_autospawns(&engine, 0.1, None);
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], RelayOutcome::Relayed { .. }));
        assert_eq!(registry.get(&addr("b0")).unwrap().tokens.len(), 1);

        // second frame: nothing left armed
        assert!(registry.fire_autospawns(&engine, 0.2, None).is_empty());
        assert_eq!(registry.get(&addr("b0")).unwrap().tokens.len(), 1);
    }

    #[test]
    fn test_chain_returns_to_rest_without_neighbor() {
        let mut registry = TileRegistry::new(&test_grid());
        registry.add_tile("m5", TileKind::Belt, Direction::DownLeft, true);
        let engine = test_engine();

        let outcomes = registry.fire_autospawns(&engine, 0.0, None);
        assert_eq!(outcomes, vec![RelayOutcome::NoNeighbor(addr("n4"))]);

        registry.update(5.9);
        assert_eq!(registry.live_token_count(), 1);

        registry.update(6.1);
        assert_eq!(registry.live_token_count(), 0);
        assert!(registry.is_at_rest());
    }

    #[test]
    fn test_handoff_chain_reaches_neighbor_within_window() {
        use crate::services::RelayScheduler;

        let mut registry = TileRegistry::new(&test_grid());
        registry.add_tile("b0", TileKind::Belt, Direction::UpRight, true);
        registry.add_tile("a1", TileKind::Belt, Direction::UpRight, false);
        let engine = test_engine();
        let mut scheduler = RelayScheduler::new();

        // first update frame after mount
        for outcome in registry.fire_autospawns(&engine, 0.1, None) {
            if let RelayOutcome::Relayed { next, fire_at } = outcome {
                scheduler.schedule(next, fire_at);
            }
        }
        assert_eq!(registry.live_token_count(), 1);

        // before the handoff window nothing fires
        assert!(scheduler.take_due(3.0).is_empty());

        // inside the window the neighbor spawns while the source token
        // is still mid-travel
        for pending in scheduler.take_due(3.5) {
            registry.spawn_at(&pending.target, &engine, pending.fire_at, None);
        }
        assert_eq!(registry.get(&addr("b0")).unwrap().tokens.len(), 1);
        assert_eq!(registry.get(&addr("a1")).unwrap().tokens.len(), 1);
    }

    #[test]
    fn test_token_isolation_across_tiles_and_spawns() {
        let mut registry = TileRegistry::new(&test_grid());
        registry.add_tile("b0", TileKind::Belt, Direction::UpRight, false);
        registry.add_tile("a1", TileKind::Belt, Direction::UpRight, false);
        let engine = test_engine();

        registry.spawn_at(&addr("b0"), &engine, 0.0, None);
        registry.spawn_at(&addr("b0"), &engine, 2.0, None);
        registry.spawn_at(&addr("a1"), &engine, 2.0, None);
        assert_eq!(registry.live_token_count(), 3);

        // t=6.5: only the t=0 token has finished
        registry.update(6.5);
        assert_eq!(registry.get(&addr("b0")).unwrap().tokens.len(), 1);
        assert_eq!(registry.get(&addr("a1")).unwrap().tokens.len(), 1);
    }
}
