//! Typed option sets for each engine operation.
//!
//! These are the values an orchestrator (worker thread, wasm shim, CLI)
//! constructs per call and hands to [`crate::ops::apply`]. All of them are
//! serde round-trippable so they can cross a process or language boundary.
//!
//! Option validation that needs no pixel data lives here; it runs before any
//! buffer work so bad options never produce a half-transformed image.

use serde::{Deserialize, Serialize};

use crate::buffer::Color;
use crate::error::EngineError;
use crate::grade::FilterPreset;

/// Named placement position for overlay compositing.
///
/// Corner anchors are inset by a fixed margin
/// ([`crate::composite::ANCHOR_MARGIN`]); `Center` centers the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    Center,
}

/// Output container format handed to the encoder glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    /// MIME type string for the format.
    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// Whether the container carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, OutputFormat::Png)
    }

    /// Whether the format takes a lossy quality setting.
    pub fn is_lossy(self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }
}

/// Options for the convert operation (re-encode without pixel changes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOptions {
    pub format: OutputFormat,
    /// Quality in `[0, 1]`; only honored for lossy formats.
    pub quality: Option<f32>,
    /// Flatten color used when the target format has no alpha channel.
    pub background_color: Option<Color>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            quality: None,
            background_color: None,
        }
    }
}

/// How resize target dimensions are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Both dimensions given explicitly.
    Fixed,
    /// Width given; height derived or kept.
    Width,
    /// Height given; width derived or kept.
    Height,
    /// Both axes scaled by `width / 100`.
    Percentage,
}

/// Options for the resize operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeOptions {
    pub mode: ResizeMode,
    pub width: f64,
    pub height: f64,
    pub keep_aspect_ratio: bool,
}

/// Watermark flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatermarkKind {
    Text,
    Image,
}

/// Options for the watermark-add operation.
///
/// For `kind == Image` the overlay buffer itself is passed alongside the
/// options (decoded images come from the external decoder, not from serde).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatermarkOptions {
    pub kind: WatermarkKind,
    /// Overlay opacity in `[0, 1]`.
    pub opacity: f32,
    pub anchor: Anchor,
    /// Text watermark content.
    pub text: Option<String>,
    /// Text glyph height in pixels.
    pub font_size: Option<u32>,
    /// Text color.
    pub color: Option<Color>,
    /// Image overlay width as a fraction of `min(width, height)`.
    pub scale: Option<f32>,
}

impl WatermarkOptions {
    /// Reject option sets that cannot produce a watermark.
    pub fn validate(&self, has_overlay: bool) -> Result<(), EngineError> {
        match self.kind {
            WatermarkKind::Text => {
                let empty = self.text.as_deref().map(str::trim).unwrap_or("").is_empty();
                if empty {
                    return Err(EngineError::invalid("watermark-add", "text is empty"));
                }
            }
            WatermarkKind::Image => {
                if !has_overlay {
                    return Err(EngineError::invalid(
                        "watermark-add",
                        "image watermark requested but no overlay image supplied",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Options for the watermark-remove operation.
///
/// The mask is a paint-surface alpha channel (nonzero = marked) whose
/// resolution may differ from the target image; the inpainting engine
/// resamples it with nearest-neighbor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskOptions {
    pub mask: Vec<u8>,
    pub mask_width: u32,
    pub mask_height: u32,
}

/// Manual color-grading sliders, applied brightness -> contrast ->
/// saturation -> blur.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ManualAdjustments {
    /// Brightness in percent (100 = unchanged).
    pub brightness: f32,
    /// Contrast in percent (100 = unchanged).
    pub contrast: f32,
    /// Saturation in percent (100 = unchanged).
    pub saturation: f32,
    /// Gaussian blur radius in pixels (0 = none).
    pub blur: f32,
}

impl Default for ManualAdjustments {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            blur: 0.0,
        }
    }
}

/// Options for the filter operation: a named preset or manual sliders,
/// never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterOptions {
    Preset { preset: FilterPreset },
    Manual(ManualAdjustments),
}

/// Background fill flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Solid,
    Gradient,
    /// Uniformly sampled opaque RGB color.
    Random,
}

/// Axis for the two-stop linear gradient background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    #[default]
    ToBottom,
    ToRight,
    ToTopRight,
    ToBottomRight,
}

/// Options for the background-padding operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundOptions {
    pub kind: BackgroundKind,
    /// Inset on all four sides, in pixels. Zero or negative is a no-op copy.
    pub padding: i32,
    /// Solid color, or first gradient stop.
    pub color: Option<Color>,
    /// Second gradient stop.
    pub color2: Option<Color>,
    #[serde(default)]
    pub direction: GradientDirection,
}

impl BackgroundOptions {
    pub fn validate(&self) -> Result<(), EngineError> {
        match self.kind {
            BackgroundKind::Solid if self.color.is_none() => Err(EngineError::invalid(
                "background",
                "solid background requires a color",
            )),
            BackgroundKind::Gradient if self.color.is_none() || self.color2.is_none() => {
                Err(EngineError::invalid(
                    "background",
                    "gradient background requires two color stops",
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Multi-image layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpliceMode {
    Vertical,
    Horizontal,
    NineSquare,
    RandomScatter,
    FixedCollage,
}

/// Options for the splice (collage) operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpliceOptions {
    pub mode: SpliceMode,
    /// Gap between images, in pixels (linear and nine-square modes).
    pub spacing: u32,
    /// Target canvas width; required for `FixedCollage`.
    pub width: Option<u32>,
    /// Target canvas height; required for `FixedCollage`.
    pub height: Option<u32>,
}

impl SpliceOptions {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.mode == SpliceMode::FixedCollage {
            let w = self.width.unwrap_or(0);
            let h = self.height.unwrap_or(0);
            if w == 0 || h == 0 {
                return Err(EngineError::invalid(
                    "splice",
                    "fixed-collage requires positive width and height",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_default() {
        assert_eq!(Anchor::default(), Anchor::BottomRight);
    }

    #[test]
    fn test_output_format_properties() {
        assert!(OutputFormat::Png.has_alpha());
        assert!(!OutputFormat::Jpeg.has_alpha());
        assert!(OutputFormat::Jpeg.is_lossy());
        assert_eq!(OutputFormat::Jpeg.mime(), "image/jpeg");
    }

    #[test]
    fn test_watermark_text_requires_text() {
        let opts = WatermarkOptions {
            kind: WatermarkKind::Text,
            opacity: 1.0,
            anchor: Anchor::Center,
            text: Some("   ".into()),
            font_size: None,
            color: None,
            scale: None,
        };
        assert!(opts.validate(false).is_err());
    }

    #[test]
    fn test_watermark_image_requires_overlay() {
        let opts = WatermarkOptions {
            kind: WatermarkKind::Image,
            opacity: 0.5,
            anchor: Anchor::BottomRight,
            text: None,
            font_size: None,
            color: None,
            scale: Some(0.2),
        };
        assert!(opts.validate(false).is_err());
        assert!(opts.validate(true).is_ok());
    }

    #[test]
    fn test_fixed_collage_requires_dims() {
        let mut opts = SpliceOptions {
            mode: SpliceMode::FixedCollage,
            spacing: 0,
            width: None,
            height: Some(200),
        };
        assert!(opts.validate().is_err());
        opts.width = Some(300);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_linear_splice_needs_no_dims() {
        let opts = SpliceOptions {
            mode: SpliceMode::Vertical,
            spacing: 10,
            width: None,
            height: None,
        };
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_gradient_background_needs_two_stops() {
        let opts = BackgroundOptions {
            kind: BackgroundKind::Gradient,
            padding: 10,
            color: Some(Color::WHITE),
            color2: None,
            direction: GradientDirection::default(),
        };
        assert!(opts.validate().is_err());
    }
}
