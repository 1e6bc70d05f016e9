//! Color grading: preset looks and manual slider adjustments.
//!
//! A preset resolves to a declarative adjustment chain (CSS filter
//! semantics) plus an optional finisher; manual mode applies exactly one
//! chain built from the caller's sliders in the order brightness ->
//! contrast -> saturation -> blur.

pub mod ops;
pub mod presets;

pub use ops::{apply_chain, gaussian_blur, Adjust};
pub use presets::{FilterPreset, Finisher, Recipe};

use crate::buffer::PixelBuffer;
use crate::composite::blend::{blend_fill, BlendMode};
use crate::composite::vignette::lomo_vignette;
use crate::convolve;
use crate::options::ManualAdjustments;

/// Apply a named preset to a buffer.
pub fn apply_preset(buf: &PixelBuffer, preset: FilterPreset) -> PixelBuffer {
    let recipe = preset.recipe();
    let mut out = apply_chain(buf, &recipe.chain);

    match recipe.finisher {
        None => {}
        Some(Finisher::LomoVignette) => lomo_vignette(&mut out),
        Some(Finisher::CyberpunkTint) => {
            blend_fill(&mut out, presets::CYBERPUNK_DODGE, BlendMode::ColorDodge);
            blend_fill(&mut out, presets::CYBERPUNK_OVERLAY, BlendMode::Overlay);
        }
        Some(Finisher::JpFreshTint) => {
            blend_fill(&mut out, presets::JP_FRESH_SOFTLIGHT, BlendMode::SoftLight);
        }
        Some(Finisher::CinematicCurve) => apply_cinematic_curve(&mut out),
        Some(Finisher::Sharpen) => out = convolve::sharpen(&out),
    }

    out
}

/// Apply the manual slider chain.
pub fn apply_manual(buf: &PixelBuffer, adjustments: &ManualAdjustments) -> PixelBuffer {
    let chain = [
        Adjust::Brightness(adjustments.brightness / 100.0),
        Adjust::Contrast(adjustments.contrast / 100.0),
        Adjust::Saturate(adjustments.saturation / 100.0),
        Adjust::Blur(adjustments.blur),
    ];
    apply_chain(buf, &chain)
}

/// The bespoke cinematic tone curve.
///
/// Per pixel: warm the highlights (lift R and G, drop B) and cool the
/// shadows (drop R, lift B), with ramps driven by the pixel's Rec. 601
/// luma. Runs after the preset's contrast/saturation pre-pass.
pub fn apply_cinematic_curve(buf: &mut PixelBuffer) {
    for chunk in buf.pixels.chunks_exact_mut(4) {
        let r = chunk[0] as f32;
        let g = chunk[1] as f32;
        let b = chunk[2] as f32;

        let luma = 0.299 * r + 0.587 * g + 0.114 * b;
        let highlight = (luma / 180.0).min(1.0);
        let shadow = ((255.0 - luma) / 200.0).min(1.0);

        chunk[0] = (r + 25.0 * highlight - 20.0 * shadow).clamp(0.0, 255.0) as u8;
        chunk[1] = (g + 10.0 * highlight).clamp(0.0, 255.0) as u8;
        chunk[2] = (b - 25.0 * highlight + 20.0 * shadow).clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Color;

    fn sample_buffer() -> PixelBuffer {
        let mut buf = PixelBuffer::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                buf.set(x, y, [(x * 70) as u8, (y * 60) as u8, 128, 255]);
            }
        }
        buf
    }

    #[test]
    fn test_invert_preset_is_involutive() {
        let buf = sample_buffer();
        let once = apply_preset(&buf, FilterPreset::Invert);
        let twice = apply_preset(&once, FilterPreset::Invert);
        assert_eq!(twice, buf);
    }

    #[test]
    fn test_grayscale_preset_neutralizes() {
        let out = apply_preset(&sample_buffer(), FilterPreset::Grayscale);
        for chunk in out.pixels.chunks_exact(4) {
            assert_eq!(chunk[0], chunk[1]);
            assert_eq!(chunk[1], chunk[2]);
        }
    }

    #[test]
    fn test_preset_keeps_dimensions() {
        for preset in [
            FilterPreset::Sepia,
            FilterPreset::GaussianBlur,
            FilterPreset::Sharpen,
            FilterPreset::Lomo,
            FilterPreset::Cyberpunk,
            FilterPreset::JpFresh,
            FilterPreset::InsStyle,
            FilterPreset::Cinematic,
        ] {
            let out = apply_preset(&sample_buffer(), preset);
            assert_eq!(out.width, 4);
            assert_eq!(out.height, 4);
        }
    }

    #[test]
    fn test_manual_identity_sliders() {
        let buf = sample_buffer();
        let out = apply_manual(&buf, &ManualAdjustments::default());
        assert_eq!(out, buf);
    }

    #[test]
    fn test_manual_brightness_slider() {
        let buf = PixelBuffer::filled(1, 1, Color::rgb(100, 100, 100));
        let mut adj = ManualAdjustments::default();
        adj.brightness = 150.0;
        let out = apply_manual(&buf, &adj);
        assert_eq!(out.get(0, 0)[0], 150);
    }

    #[test]
    fn test_cinematic_highlights_warm() {
        // Bright pixel: luma well above 180 caps highlight at 1, shadow small.
        let mut buf = PixelBuffer::filled(1, 1, Color::rgb(230, 230, 230));
        apply_cinematic_curve(&mut buf);
        let px = buf.get(0, 0);
        assert!(px[0] > 230, "Highlight red lifted");
        assert!(px[2] < 230, "Highlight blue dropped");
    }

    #[test]
    fn test_cinematic_shadows_cool() {
        let mut buf = PixelBuffer::filled(1, 1, Color::rgb(20, 20, 20));
        apply_cinematic_curve(&mut buf);
        let px = buf.get(0, 0);
        assert!(px[0] < 20, "Shadow red dropped");
        assert!(px[2] > 20, "Shadow blue lifted");
    }

    #[test]
    fn test_cinematic_exact_midvalue() {
        // luma = 100 for a uniform 100 gray pixel.
        // highlight = 100/180, shadow = 155/200.
        let mut buf = PixelBuffer::filled(1, 1, Color::rgb(100, 100, 100));
        apply_cinematic_curve(&mut buf);
        let px = buf.get(0, 0);
        let highlight = 100.0f32 / 180.0;
        let shadow = 155.0f32 / 200.0;
        let expect_r = (100.0 + 25.0 * highlight - 20.0 * shadow) as u8;
        let expect_g = (100.0 + 10.0 * highlight) as u8;
        let expect_b = (100.0 - 25.0 * highlight + 20.0 * shadow) as u8;
        assert!((px[0] as i32 - expect_r as i32).abs() <= 1);
        assert!((px[1] as i32 - expect_g as i32).abs() <= 1);
        assert!((px[2] as i32 - expect_b as i32).abs() <= 1);
    }
}
