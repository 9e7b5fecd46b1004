//! Authored level layouts
//!
//! Platform order matters: the last platform is always the goal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::consts::{VIEW_H, WALL_THICKNESS};
use crate::sim::{Rect, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    /// Can be picked up and carried; casts floor shadows
    Candle,
    /// Fixed ambient light, never casts platform shadows
    Moon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub id: u32,
    pub kind: LightKind,
    pub pos: Vec2,
    pub radius: f32,
    pub intensity: f32,
    pub color: Rgb,
    pub held: bool,
}

impl Light {
    fn candle(id: u32, pos: Vec2, radius: f32, intensity: f32, color: Rgb) -> Self {
        Self {
            id,
            kind: LightKind::Candle,
            pos,
            radius,
            intensity,
            color,
            held: false,
        }
    }

    fn moon(id: u32, pos: Vec2, radius: f32, intensity: f32, color: Rgb) -> Self {
        Self {
            kind: LightKind::Moon,
            ..Self::candle(id, pos, radius, intensity, color)
        }
    }

    pub fn can_carry(&self) -> bool {
        self.kind == LightKind::Candle
    }
}

/// A static, authored platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    /// Window sills are not solid; they only anchor shadow ribs
    pub window: bool,
}

impl Platform {
    pub const fn solid(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            window: false,
        }
    }

    pub const fn window(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            window: true,
        }
    }
}

/// How a level turns tones into platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    /// Candle shadows cast onto the ground line
    Floor,
    /// Horizontal ribs from window sills to the opposite wall
    WindowRibs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub number: u32,
    pub ground_y: f32,
    pub world_w: f32,
    pub world_h: f32,
    pub projection: Projection,
    pub spawn: Vec2,
    pub camera: Vec2,
    pub tutorial_step: u8,
    pub lights: Vec<Light>,
    pub platforms: Vec<Platform>,
}

pub const LEVEL_COUNT: u32 = 2;

const CANDLE: Rgb = Rgb(0xf9a825);
const CANDLE_BRIGHT: Rgb = Rgb(0xffc107);

impl Level {
    /// Look up a level by its 1-based number
    pub fn load(number: u32) -> Option<Level> {
        match number {
            1 => Some(Self::meadow()),
            2 => Some(Self::chamber()),
            _ => None,
        }
    }

    pub fn goal(&self) -> Option<&Rect> {
        self.platforms.last().map(|p| &p.rect)
    }

    pub fn is_last(&self) -> bool {
        self.number >= LEVEL_COUNT
    }

    /// Level 1: a long outdoor run lit by three candles
    pub fn meadow() -> Level {
        const G: f32 = 530.0;
        const W: f32 = 2600.0;
        Level {
            number: 1,
            ground_y: G,
            world_w: W,
            world_h: 600.0,
            projection: Projection::Floor,
            spawn: Vec2::new(120.0, G - 2.0),
            camera: Vec2::ZERO,
            tutorial_step: 0,
            lights: vec![
                Light::candle(1, Vec2::new(320.0, G - 2.0), 200.0, 1.0, CANDLE),
                Light::candle(2, Vec2::new(1050.0, 350.0), 210.0, 1.0, CANDLE),
                Light::candle(3, Vec2::new(1860.0, 200.0), 220.0, 1.05, CANDLE_BRIGHT),
                Light::moon(4, Vec2::new(2000.0, -200.0), 900.0, 0.35, Rgb(0xb0c4de)),
            ],
            platforms: vec![
                Platform::solid(0.0, G, W, 80.0),
                Platform::solid(280.0, 440.0, 110.0, 14.0),
                Platform::solid(460.0, 360.0, 100.0, 14.0),
                Platform::solid(620.0, 440.0, 80.0, 14.0),
                Platform::solid(760.0, 350.0, 100.0, 14.0),
                Platform::solid(950.0, 370.0, 120.0, 14.0),
                Platform::solid(1120.0, 280.0, 100.0, 14.0),
                Platform::solid(1300.0, 360.0, 90.0, 14.0),
                Platform::solid(1460.0, 260.0, 110.0, 14.0),
                Platform::solid(1640.0, 340.0, 90.0, 14.0),
                Platform::solid(1800.0, 240.0, 120.0, 14.0),
                Platform::solid(1980.0, 160.0, 100.0, 14.0),
                Platform::solid(2160.0, 240.0, 90.0, 14.0),
                Platform::solid(2330.0, 140.0, 110.0, 14.0),
                // goal
                Platform::solid(2470.0, 80.0, 100.0, 14.0),
            ],
        }
    }

    /// Level 2: a tall walled chamber climbed on window ribs
    pub fn chamber() -> Level {
        const G: f32 = 1720.0;
        const W: f32 = 900.0;
        const H: f32 = 1800.0;
        const SILL_W: f32 = 90.0;
        const SILL_H: f32 = 12.0;
        let left_sills = [1540.0, 1230.0, 920.0, 610.0, 320.0, 140.0];
        let right_sills = [1385.0, 1075.0, 765.0, 465.0, 230.0];
        let steps = [
            (200.0, 1610.0),
            (540.0, 1460.0),
            (240.0, 1310.0),
            (560.0, 1160.0),
            (240.0, 1010.0),
            (560.0, 860.0),
            (240.0, 710.0),
            (560.0, 560.0),
            (240.0, 420.0),
            (550.0, 290.0),
            (240.0, 175.0),
        ];

        let mut platforms = vec![
            Platform::solid(0.0, G, W, 100.0),
            Platform::solid(0.0, 0.0, WALL_THICKNESS, G),
            Platform::solid(W - WALL_THICKNESS, 0.0, WALL_THICKNESS, G),
        ];
        platforms.extend(
            left_sills
                .iter()
                .map(|&y| Platform::window(WALL_THICKNESS, y, SILL_W, SILL_H)),
        );
        platforms.extend(
            right_sills
                .iter()
                .map(|&y| Platform::window(W - WALL_THICKNESS - SILL_W, y, SILL_W, SILL_H)),
        );
        platforms.extend(steps.iter().map(|&(x, y)| Platform::solid(x, y, 120.0, 14.0)));
        // goal
        platforms.push(Platform::solid(380.0, 60.0, 140.0, 14.0));

        Level {
            number: 2,
            ground_y: G,
            world_w: W,
            world_h: H,
            projection: Projection::WindowRibs,
            spawn: Vec2::new(200.0, G - 2.0),
            camera: Vec2::new(0.0, H - VIEW_H),
            // controls were taught on level 1
            tutorial_step: 5,
            lights: vec![
                Light::candle(1, Vec2::new(500.0, G - 2.0), 200.0, 1.0, CANDLE),
                Light::candle(2, Vec2::new(600.0, 745.0), 210.0, 1.0, CANDLE_BRIGHT),
                Light::moon(3, Vec2::new(-1200.0, -600.0), 2200.0, 0.5, Rgb(0xc0d8ff)),
            ],
            platforms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_load_by_number() {
        assert_eq!(Level::load(1).map(|l| l.number), Some(1));
        assert_eq!(Level::load(2).map(|l| l.number), Some(2));
        assert!(Level::load(0).is_none());
        assert!(Level::load(3).is_none());
    }

    #[test]
    fn test_goal_is_last_platform() {
        let level = Level::load(1).unwrap();
        assert_eq!(level.goal(), Some(&Rect::new(2470.0, 80.0, 100.0, 14.0)));
        let level = Level::load(2).unwrap();
        assert_eq!(level.goal(), Some(&Rect::new(380.0, 60.0, 140.0, 14.0)));
        assert!(level.is_last());
    }

    #[test]
    fn test_chamber_sills_touch_walls() {
        let level = Level::load(2).unwrap();
        let sills: Vec<_> = level.platforms.iter().filter(|p| p.window).collect();
        assert_eq!(sills.len(), 11);
        for sill in sills {
            let on_left = sill.rect.x == WALL_THICKNESS;
            let on_right = sill.rect.right() == level.world_w - WALL_THICKNESS;
            assert!(on_left || on_right);
        }
    }

    #[test]
    fn test_only_candles_are_carried() {
        let level = Level::load(1).unwrap();
        assert_eq!(level.lights.iter().filter(|l| l.can_carry()).count(), 3);
    }
}
