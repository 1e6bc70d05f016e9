//! The preset registry.
//!
//! Every named look resolves to a [`Recipe`]: a declarative adjustment chain
//! plus an optional finishing effect (vignette, tint overlays, the bespoke
//! cinematic curve, or the sharpen kernel). Adding a preset means adding a
//! variant and a table row here; the compositing code never changes.

use serde::{Deserialize, Serialize};

use crate::buffer::Color;
use crate::grade::ops::Adjust;

/// Named color-grading preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPreset {
    Grayscale,
    Sepia,
    Invert,
    GaussianBlur,
    Sharpen,
    Lomo,
    Cyberpunk,
    JpFresh,
    InsStyle,
    Cinematic,
}

/// Finishing step applied after the declarative chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Finisher {
    /// Radial darkening with the tight lomo radius.
    LomoVignette,
    /// Color-dodge then overlay flat fills.
    CyberpunkTint,
    /// Soft-light flat fill.
    JpFreshTint,
    /// The bespoke per-pixel tone curve.
    CinematicCurve,
    /// 3x3 sharpen convolution.
    Sharpen,
}

/// A resolved preset: adjustment chain plus optional finisher.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub chain: Vec<Adjust>,
    pub finisher: Option<Finisher>,
}

/// Color-dodge stop for the cyberpunk tint (teal glow).
pub const CYBERPUNK_DODGE: Color = Color::rgba(30, 120, 160, 64);
/// Overlay stop for the cyberpunk tint (magenta cast).
pub const CYBERPUNK_OVERLAY: Color = Color::rgba(255, 0, 120, 38);
/// Soft-light stop for the jp_fresh tint (warm lift).
pub const JP_FRESH_SOFTLIGHT: Color = Color::rgba(255, 235, 205, 64);

impl FilterPreset {
    /// Resolve the preset into its recipe. Called once per operation.
    pub fn recipe(self) -> Recipe {
        match self {
            FilterPreset::Grayscale => Recipe {
                chain: vec![Adjust::Grayscale(1.0)],
                finisher: None,
            },
            FilterPreset::Sepia => Recipe {
                chain: vec![Adjust::Sepia(1.0)],
                finisher: None,
            },
            FilterPreset::Invert => Recipe {
                chain: vec![Adjust::Invert(1.0)],
                finisher: None,
            },
            FilterPreset::GaussianBlur => Recipe {
                chain: vec![Adjust::Blur(4.0)],
                finisher: None,
            },
            FilterPreset::Sharpen => Recipe {
                chain: vec![],
                finisher: Some(Finisher::Sharpen),
            },
            FilterPreset::Lomo => Recipe {
                chain: vec![Adjust::Contrast(1.4), Adjust::Saturate(1.2)],
                finisher: Some(Finisher::LomoVignette),
            },
            FilterPreset::Cyberpunk => Recipe {
                chain: vec![
                    Adjust::Contrast(1.4),
                    Adjust::Brightness(0.85),
                    Adjust::HueRotate(-20.0),
                    Adjust::Saturate(1.8),
                ],
                finisher: Some(Finisher::CyberpunkTint),
            },
            FilterPreset::JpFresh => Recipe {
                chain: vec![
                    Adjust::Contrast(0.9),
                    Adjust::Brightness(1.1),
                    Adjust::Saturate(0.8),
                    Adjust::Sepia(0.1),
                ],
                finisher: Some(Finisher::JpFreshTint),
            },
            FilterPreset::InsStyle => Recipe {
                chain: vec![
                    Adjust::Brightness(1.1),
                    Adjust::Contrast(1.1),
                    Adjust::Saturate(1.2),
                    Adjust::Sepia(0.06),
                ],
                finisher: None,
            },
            FilterPreset::Cinematic => Recipe {
                chain: vec![Adjust::Contrast(1.2), Adjust::Saturate(0.9)],
                finisher: Some(Finisher::CinematicCurve),
            },
        }
    }
}
