//! Terrain grid and forage items
//!
//! Tiles are generated once and never change type; only the food items on
//! top of them toggle between visible and respawning.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::sim::SimRng;

/// Terrain type of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Grass,
    Mud,
    Water,
    Dirt,
    /// Impassable
    DeepWater,
}

impl TileKind {
    /// Drinking is possible from both shallow and deep water
    #[inline]
    pub fn is_water(self) -> bool {
        matches!(self, TileKind::Water | TileKind::DeepWater)
    }

    #[inline]
    pub fn is_passable(self) -> bool {
        self != TileKind::DeepWater
    }

    /// Movement multiplier while standing on this tile
    #[inline]
    pub fn speed_factor(self) -> f32 {
        match self {
            TileKind::Mud => MUD_SLOW,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    /// Cosmetic variation index (0-3)
    pub variant: u8,
}

/// Row-major tile grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// A map filled with a single tile kind
    pub fn filled(width: usize, height: usize, kind: TileKind) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            tiles: vec![Tile { kind, variant: 0 }; width.max(1) * height.max(1)],
        }
    }

    /// Build from rows (`rows[y][x]`). Short rows are padded with grass.
    pub fn from_rows(rows: Vec<Vec<TileKind>>) -> Self {
        let height = rows.len().max(1);
        let width = rows.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let mut map = Self::filled(width, height, TileKind::Grass);
        for (y, row) in rows.into_iter().enumerate() {
            for (x, kind) in row.into_iter().enumerate() {
                map.tiles[y * width + x].kind = kind;
            }
        }
        map
    }

    /// The river valley: a meandering river with deep water in the channel,
    /// shallows on both banks, mud near the water and scattered dirt.
    pub fn generate(seed: u64) -> Self {
        let mut rng = SimRng::new(seed);
        let mut tiles = Vec::with_capacity(WORLD_TILES_W * WORLD_TILES_H);

        for y in 0..WORLD_TILES_H {
            let river_center = 20.0 + (y as f32 * 0.4).sin() * 2.0;
            for x in 0..WORLD_TILES_W {
                let n = rng.unit();
                let dist = (x as f32 - river_center).abs();
                let kind = if dist < 1.5 {
                    TileKind::DeepWater
                } else if dist < 3.0 {
                    TileKind::Water
                } else if dist < 5.0 && n > 0.4 {
                    TileKind::Mud
                } else if n > 0.85 {
                    TileKind::Dirt
                } else if n > 0.78 {
                    TileKind::Mud
                } else {
                    TileKind::Grass
                };
                tiles.push(Tile {
                    kind,
                    variant: rng.index(4) as u8,
                });
            }
        }

        Self {
            width: WORLD_TILES_W,
            height: WORLD_TILES_H,
            tiles,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// World size in pixels
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * TILE_SIZE
    }

    /// Tile at grid coordinates; out-of-range indices are clamped to the edge
    pub fn get(&self, tx: usize, ty: usize) -> &Tile {
        let tx = tx.min(self.width - 1);
        let ty = ty.min(self.height - 1);
        &self.tiles[ty * self.width + tx]
    }

    /// Tile under a world-space point (clamped to the grid)
    pub fn at(&self, pos: Vec2) -> &Tile {
        let tx = (pos.x / TILE_SIZE).floor().max(0.0) as usize;
        let ty = (pos.y / TILE_SIZE).floor().max(0.0) as usize;
        self.get(tx, ty)
    }

    /// Keep a point inside the playable area
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        let max = self.world_size() - Vec2::splat(WORLD_MARGIN);
        crate::clamp_vec(pos, Vec2::splat(WORLD_MARGIN), max)
    }
}

/// Forage types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodKind {
    Acorn,
    Mushroom,
    Berry,
    Root,
}

impl FoodKind {
    pub const ALL: [FoodKind; 4] = [
        FoodKind::Acorn,
        FoodKind::Mushroom,
        FoodKind::Berry,
        FoodKind::Root,
    ];

    /// Hunger restored (and score gained) when eaten
    pub fn value(self) -> f32 {
        match self {
            FoodKind::Acorn => 18.0,
            FoodKind::Mushroom => 28.0,
            FoodKind::Berry => 22.0,
            FoodKind::Root => 15.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FoodKind::Acorn => "Acorn +Hunger",
            FoodKind::Mushroom => "Mushroom +Hunger",
            FoodKind::Berry => "Berry +Hunger",
            FoodKind::Root => "Root +Hunger",
        }
    }
}

/// A forage item. Eaten items hide and come back after `respawn_timer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: u32,
    pub pos: Vec2,
    pub kind: FoodKind,
    pub value: f32,
    pub respawn_timer: f32,
    pub visible: bool,
}

impl Food {
    pub fn new(id: u32, pos: Vec2, kind: FoodKind) -> Self {
        Self {
            id,
            pos,
            kind,
            value: kind.value(),
            respawn_timer: 0.0,
            visible: true,
        }
    }

    /// Hide and start the respawn countdown
    pub fn consume(&mut self, respawn_after: f32) {
        self.visible = false;
        self.respawn_timer = respawn_after;
    }

    /// Count down while hidden; returns true on the tick it reappears
    pub fn tick_respawn(&mut self, dt: f32) -> bool {
        if self.visible {
            return false;
        }
        self.respawn_timer -= dt;
        if self.respawn_timer <= 0.0 {
            self.respawn_timer = 0.0;
            self.visible = true;
            return true;
        }
        false
    }
}

/// Scatter forage on dry tiles, centred in their cell
pub fn generate_foods(tiles: &TileMap, seed: u64) -> Vec<Food> {
    let mut rng = SimRng::new(seed);
    let mut foods = Vec::new();

    for _ in 0..FOOD_PLACEMENT_ATTEMPTS {
        let tx = rng.index(tiles.width());
        let ty = rng.index(tiles.height());
        if tiles.get(tx, ty).kind.is_water() {
            continue;
        }
        let kind = FoodKind::ALL[rng.index(FoodKind::ALL.len())];
        let pos = Vec2::new(
            tx as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            ty as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        );
        foods.push(Food::new(foods.len() as u32, pos, kind));
    }

    foods
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_map_has_river_channel() {
        let map = TileMap::generate(TILE_SEED);
        assert_eq!(map.width(), WORLD_TILES_W);
        assert_eq!(map.height(), WORLD_TILES_H);
        // Row 0: river centre is exactly column 20
        assert_eq!(map.get(20, 0).kind, TileKind::DeepWater);
        assert!(map.get(22, 0).kind.is_water());
        assert!(!map.get(0, 0).kind.is_water());
    }

    #[test]
    fn test_lookup_clamps_out_of_range() {
        let map = TileMap::filled(4, 4, TileKind::Mud);
        assert_eq!(map.get(100, 100).kind, TileKind::Mud);
        assert_eq!(map.at(Vec2::new(-500.0, 1.0e9)).kind, TileKind::Mud);
    }

    #[test]
    fn test_foods_avoid_water() {
        let map = TileMap::generate(TILE_SEED);
        let foods = generate_foods(&map, FOOD_SEED);
        assert!(!foods.is_empty());
        for food in &foods {
            assert!(!map.at(food.pos).kind.is_water());
            assert_eq!(food.value, food.kind.value());
        }
    }

    #[test]
    fn test_food_respawn_cycle() {
        let mut food = Food::new(0, Vec2::ZERO, FoodKind::Berry);
        food.consume(2.0);
        assert!(!food.visible);
        assert!(!food.tick_respawn(1.5));
        assert!(food.tick_respawn(0.6));
        assert!(food.visible);
    }
}
