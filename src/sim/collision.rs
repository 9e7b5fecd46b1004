//! Collision detection and response for axis-aligned platforms
//!
//! The avatar is a feet-anchored box: `pos` is the bottom-centre point, so
//! "standing on" a platform means `pos.y == platform.y`. Each overlap is
//! resolved along the axis of least penetration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `y` grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// A movable box that collides with platforms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Bottom-centre
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            grounded: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x - self.size.x / 2.0,
            self.pos.y - self.size.y,
            self.size.x,
            self.size.y,
        )
    }
}

/// What a resolve pass touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    /// Came to rest on top of something
    pub landed: bool,
    /// Hit a ceiling
    pub bumped_head: bool,
    /// Pushed out sideways
    pub hit_side: bool,
}

impl Contact {
    pub fn any(&self) -> bool {
        self.landed || self.bumped_head || self.hit_side
    }
}

/// Push `body` out of every overlapping rect, in order
///
/// Landing sets `grounded` and zeroes downward velocity; hitting from below
/// zeroes upward velocity; side hits snap to the edge. `grounded` is only
/// ever set here, never cleared; callers clear it once per tick before the
/// first pass.
pub fn resolve<'a>(body: &mut Body, solids: impl IntoIterator<Item = &'a Rect>) -> Contact {
    let mut contact = Contact::default();
    let (half_w, h) = (body.size.x / 2.0, body.size.y);

    for plat in solids {
        let rect = body.rect();
        if !rect.overlaps(plat) {
            continue;
        }

        let overlap_left = rect.right() - plat.x;
        let overlap_right = plat.right() - rect.x;
        let overlap_top = body.pos.y - plat.y;
        let overlap_bottom = plat.bottom() - rect.y;

        let min_h = overlap_left.min(overlap_right);
        let min_v = overlap_top.min(overlap_bottom);

        if min_v < min_h {
            if overlap_top < overlap_bottom {
                body.pos.y = plat.y;
                if body.vel.y > 0.0 {
                    body.vel.y = 0.0;
                }
                body.grounded = true;
                contact.landed = true;
            } else {
                body.pos.y = plat.bottom() + h;
                if body.vel.y < 0.0 {
                    body.vel.y = 0.0;
                }
                contact.bumped_head = true;
            }
        } else {
            if overlap_left < overlap_right {
                body.pos.x = plat.x - half_w;
            } else {
                body.pos.x = plat.right() + half_w;
            }
            contact.hit_side = true;
        }
    }

    contact
}

/// Feet within this distance of a surface count as standing on it
pub const REST_EPSILON: f32 = 1e-3;

/// Whether `body` stands exactly on top of one of `solids` without overlapping it
///
/// Catches the case where a step was too small to sink the feet into the
/// surface, so `resolve` saw no overlap.
pub fn resting_on<'a>(body: &Body, solids: impl IntoIterator<Item = &'a Rect>) -> bool {
    if body.vel.y < 0.0 {
        return false;
    }
    let rect = body.rect();
    solids.into_iter().any(|plat| {
        (body.pos.y - plat.y).abs() < REST_EPSILON && rect.x < plat.right() && rect.right() > plat.x
    })
}
