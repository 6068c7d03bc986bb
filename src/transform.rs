//! Alpha/scale rules per stack depth.

use serde::Serialize;

use crate::config::Variant;

/// Visual transform applied to one slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub alpha: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

/// Which drag is driving a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Plain drag (either direction) or settle animation.
    Dragging,
    /// Rightward drag while the hidden slot is being revealed.
    RevealingRight,
}

// (alpha divisor, scale divisor) for depth 2 and depth 3
const DRAGGING: [(f32, f32); 2] = [(2000.0, 10000.0), (4000.0, 12000.0)];
const REVEALING_RIGHT: [(f32, f32); 2] = [(4000.0, 8000.0), (2000.0, 10000.0)];

impl Transform {
    pub const IDENTITY: Transform = Transform::uniform(1.0, 1.0);

    pub const fn uniform(alpha: f32, scale: f32) -> Self {
        Self {
            alpha,
            scale_x: scale,
            scale_y: scale,
        }
    }

    /// Rest transform for a pool position. Positions 0 and 1 share the top
    /// of the stack; deeper positions fade and shrink.
    pub fn at_rest(depth: usize, variant: Variant) -> Self {
        match (depth, variant) {
            (0 | 1, _) => Self::IDENTITY,
            (2, Variant::Rich) => Self::uniform(0.8, 0.85),
            (2, Variant::Simplified) => Self::uniform(0.6, 0.85),
            (_, Variant::Rich) => Self::uniform(0.4, 0.7),
            (_, Variant::Simplified) => Self::uniform(0.3, 0.7),
        }
    }

    /// Degrades `self` by one drag sample of `diff` pixels.
    ///
    /// The rich variant fades the pile linearly from its current value with
    /// per-depth, per-direction divisors. The simplified variant keeps every
    /// slot pinned to its rest transform.
    pub fn shifted(self, depth: usize, diff: i32, regime: Regime, variant: Variant) -> Self {
        if variant == Variant::Simplified {
            return Self::at_rest(depth, variant);
        }
        if depth < 2 {
            return Self::IDENTITY;
        }
        if diff == 0 {
            return self;
        }
        let table = match regime {
            Regime::Dragging => &DRAGGING,
            Regime::RevealingRight => &REVEALING_RIGHT,
        };
        let (alpha_div, scale_div) = table[(depth - 2).min(1)];
        let d = diff as f32;
        Self {
            alpha: (self.alpha - d / alpha_div).clamp(0.0, 1.0),
            scale_x: (self.scale_x - d / scale_div).clamp(0.0, 1.0),
            scale_y: (self.scale_y - d / scale_div).clamp(0.0, 1.0),
        }
    }
}
