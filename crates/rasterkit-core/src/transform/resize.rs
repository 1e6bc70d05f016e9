//! Mode-based resizing with aspect-ratio handling.
//!
//! Resampling delegates to `image::imageops::resize` with bilinear
//! filtering. Degenerate targets (non-finite or non-positive before
//! rounding) fall back to an unmodified copy; that is deliberate policy,
//! not an error path.

use crate::buffer::PixelBuffer;
use crate::options::{ResizeMode, ResizeOptions};

/// Resize a buffer according to the option set.
pub fn resize(buf: &PixelBuffer, options: &ResizeOptions) -> PixelBuffer {
    if buf.width == 0 || buf.height == 0 {
        return buf.clone();
    }
    let (target_w, target_h) = target_dimensions(buf, options);

    // Degenerate geometry fallback: checked before rounding.
    if !target_w.is_finite() || !target_h.is_finite() || target_w <= 0.0 || target_h <= 0.0 {
        return buf.clone();
    }

    let out_w = (target_w.round() as u32).max(1);
    let out_h = (target_h.round() as u32).max(1);
    if out_w == buf.width && out_h == buf.height {
        return buf.clone();
    }

    match buf.to_rgba_image() {
        Some(img) => PixelBuffer::from_rgba_image(image::imageops::resize(
            &img,
            out_w,
            out_h,
            image::imageops::FilterType::Triangle,
        )),
        None => buf.clone(),
    }
}

/// Work out the pre-rounding target dimensions for one resize request.
fn target_dimensions(buf: &PixelBuffer, options: &ResizeOptions) -> (f64, f64) {
    let src_w = buf.width as f64;
    let src_h = buf.height as f64;
    let src_ratio = src_w / src_h;

    match options.mode {
        ResizeMode::Fixed => {
            if options.keep_aspect_ratio {
                let req_ratio = options.width / options.height;
                if req_ratio > src_ratio {
                    // Requested box is wider than the source: height is the
                    // limiting axis.
                    (options.height * src_ratio, options.height)
                } else {
                    (options.width, options.width / src_ratio)
                }
            } else {
                (options.width, options.height)
            }
        }
        ResizeMode::Width => {
            let h = if options.keep_aspect_ratio {
                options.width / src_ratio
            } else {
                src_h
            };
            (options.width, h)
        }
        ResizeMode::Height => {
            let w = if options.keep_aspect_ratio {
                options.height * src_ratio
            } else {
                src_w
            };
            (w, options.height)
        }
        ResizeMode::Percentage => {
            let scale = options.width / 100.0;
            (src_w * scale, src_h * scale)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::buffer::Color;
    use proptest::prelude::*;

    proptest! {
        /// Fixed + keep-aspect preserves the source ratio to within
        /// one-pixel rounding error.
        #[test]
        fn prop_fixed_keep_aspect_ratio(
            (sw, sh) in (8u32..=200, 8u32..=200),
            (rw, rh) in (8.0f64..=400.0, 8.0f64..=400.0),
        ) {
            let buf = PixelBuffer::filled(sw, sh, Color::WHITE);
            let out = resize(&buf, &ResizeOptions {
                mode: ResizeMode::Fixed,
                width: rw,
                height: rh,
                keep_aspect_ratio: true,
            });
            let src_ratio = sw as f64 / sh as f64;
            // Reconstruct the un-rounded partner dimension and check the
            // rounding moved each axis by at most half a pixel.
            let ideal_h = out.width as f64 / src_ratio;
            let ideal_w = out.height as f64 * src_ratio;
            prop_assert!(
                (out.height as f64 - ideal_h).abs() <= 1.0
                    || (out.width as f64 - ideal_w).abs() <= 1.0
            );
        }

        /// Resize never produces a zero dimension for positive targets.
        #[test]
        fn prop_positive_targets_positive_output(
            (sw, sh) in (1u32..=64, 1u32..=64),
            pct in 1.0f64..=300.0,
        ) {
            let buf = PixelBuffer::filled(sw, sh, Color::WHITE);
            let out = resize(&buf, &ResizeOptions {
                mode: ResizeMode::Percentage,
                width: pct,
                height: 0.0,
                keep_aspect_ratio: false,
            });
            prop_assert!(out.width >= 1);
            prop_assert!(out.height >= 1);
        }
    }
}
