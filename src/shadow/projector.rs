//! Shadow projection: lights + platforms + tone -> walkable shadow platforms
//!
//! The output is recomputed from scratch every tick and fully replaces the
//! previous list. Projection is a pure function of its inputs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::consts::*;
use super::level::{Level, Light, LightKind, Platform, Projection};
use super::tone::{ToneState, Voice};
use crate::sim::Rect;

/// A derived, collidable platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowPlatform {
    pub rect: Rect,
    pub opacity: f32,
    pub crystallized: bool,
    /// Delayed copy cast by an echo tone
    pub echo: bool,
}

/// Thickness, vertical offset and opacity of one voice's shadows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowStyle {
    pub height: f32,
    pub y_offset: f32,
    pub opacity: f32,
    pub echo_opacity: f32,
}

impl ShadowStyle {
    const fn new(height: f32, y_offset: f32, opacity: f32, echo_opacity: f32) -> Self {
        Self {
            height,
            y_offset,
            opacity,
            echo_opacity,
        }
    }

    /// Floor shadows. High tones lift the shadow off the ground.
    pub const fn floor(voice: Voice) -> Self {
        match voice {
            Voice::Silence => Self::new(20.0, 0.0, 1.0, 0.0),
            Voice::Low => Self::new(24.0, 0.0, 0.95, 0.0),
            Voice::High => Self::new(12.0, -55.0, 0.8, 0.0),
            Voice::Whisper => Self::new(9.0, 0.0, 0.65, 0.0),
        }
    }

    /// Window ribs
    pub const fn rib(voice: Voice) -> Self {
        match voice {
            Voice::Silence => Self::new(22.0, 0.0, 1.0, 0.45),
            Voice::Low => Self::new(26.0, 0.0, 0.95, 0.45),
            Voice::High => Self::new(11.0, -52.0, 0.82, 0.40),
            Voice::Whisper => Self::new(9.0, 0.0, 0.65, 0.28),
        }
    }
}

/// Project a platform's horizontal span onto the ground line
///
/// Returns the projected (left, right) edges, or `None` when the light is
/// level with the platform and the slope is undefined.
pub fn project_span(light: Vec2, left: f32, right: f32, plat_y: f32, ground_y: f32) -> Option<(f32, f32)> {
    let dy = plat_y - light.y;
    if dy.abs() < MIN_LIGHT_DY {
        return None;
    }
    let scale = (ground_y - light.y) / dy;
    Some((
        light.x + (left - light.x) * scale,
        light.x + (right - light.x) * scale,
    ))
}

/// Candle shadows on the ground (level 1)
pub fn project_floor(
    lights: &[Light],
    platforms: &[Platform],
    tones: &ToneState,
    ground_y: f32,
) -> Vec<ShadowPlatform> {
    let Some(voice) = tones.active_voice() else {
        return Vec::new();
    };
    let style = ShadowStyle::floor(voice);
    let sway = tones.sway_offset();

    let mut out = Vec::new();
    for light in lights.iter().filter(|l| l.kind != LightKind::Moon) {
        for plat in platforms {
            if plat.window || plat.rect.y >= ground_y {
                continue;
            }
            let Some((l, r)) = project_span(light.pos, plat.rect.x, plat.rect.right(), plat.rect.y, ground_y)
            else {
                continue;
            };
            let (l, r) = (l + sway, r + sway);
            let w = (r - l).abs();
            if !w.is_finite() || w < MIN_SHADOW_WIDTH {
                continue;
            }
            out.push(ShadowPlatform {
                rect: Rect::new(l.min(r), ground_y - style.height + style.y_offset, w, style.height),
                opacity: style.opacity,
                crystallized: tones.crystallized,
                echo: false,
            });
        }
    }
    out
}

/// One rib from a sill to the opposite wall
fn rib(plat: &Platform, voice: Voice, world_w: f32, echo: bool, crystallized: bool) -> Option<ShadowPlatform> {
    let style = ShadowStyle::rib(voice);
    let r = &plat.rect;
    let (x, w) = if r.x < world_w / 2.0 {
        (r.right(), world_w - r.right() - WALL_THICKNESS)
    } else {
        (WALL_THICKNESS, r.x - WALL_THICKNESS)
    };
    if w < MIN_RIB_WIDTH {
        return None;
    }
    Some(ShadowPlatform {
        rect: Rect::new(x, r.y + style.y_offset, w, style.height),
        opacity: if echo { style.echo_opacity } else { style.opacity },
        crystallized: crystallized && !echo,
        echo,
    })
}

/// Window ribs (level 2)
///
/// An echo tone different from the active voice adds a fainter second rib per sill.
pub fn project_ribs(platforms: &[Platform], tones: &ToneState, world_w: f32) -> Vec<ShadowPlatform> {
    let Some(voice) = tones.active_voice() else {
        return Vec::new();
    };
    let echo = tones.echo.map(Voice::from).filter(|e| *e != voice);

    let mut out = Vec::new();
    for plat in platforms.iter().filter(|p| p.window) {
        out.extend(rib(plat, voice, world_w, false, tones.crystallized));
        if let Some(echo) = echo {
            out.extend(rib(plat, echo, world_w, true, false));
        }
    }
    out
}

/// Derive this tick's shadow platforms for a level
pub fn project(level: &Level, tones: &ToneState) -> Vec<ShadowPlatform> {
    match level.projection {
        Projection::Floor => project_floor(&level.lights, &level.platforms, tones, level.ground_y),
        Projection::WindowRibs => project_ribs(&level.platforms, tones, level.world_w),
    }
}
