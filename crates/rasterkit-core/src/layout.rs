//! Multi-image splice and collage packing.
//!
//! All modes pre-fill the output canvas with white and composite the inputs
//! in order (later images draw on top; there is no explicit z-control).

use rand::Rng;

use crate::buffer::{Color, PixelBuffer};
use crate::error::EngineError;
use crate::options::{SpliceMode, SpliceOptions};

/// Side length floor for the random-scatter canvas.
const SCATTER_MIN_SIDE: f64 = 500.0;
/// Canvas growth factor over the square root of the total input area.
const SCATTER_AREA_FACTOR: f64 = 1.8;

/// Composite a set of images into one canvas under the chosen layout mode.
pub fn splice<R: Rng>(
    images: &[PixelBuffer],
    options: &SpliceOptions,
    rng: &mut R,
) -> Result<PixelBuffer, EngineError> {
    options.validate()?;
    if images.is_empty() {
        return Err(EngineError::invalid("splice", "no input images"));
    }

    Ok(match options.mode {
        SpliceMode::Vertical => linear(images, options.spacing, true),
        SpliceMode::Horizontal => linear(images, options.spacing, false),
        SpliceMode::NineSquare => nine_square(images, options.spacing),
        SpliceMode::FixedCollage => fixed_collage(
            images,
            options.width.unwrap_or(0),
            options.height.unwrap_or(0),
        ),
        SpliceMode::RandomScatter => random_scatter(images, rng),
    })
}

/// Stack images along one axis, centered on the other.
fn linear(images: &[PixelBuffer], spacing: u32, vertical: bool) -> PixelBuffer {
    let n = images.len() as u32;
    let gap_total = spacing * (n - 1);

    let (canvas_w, canvas_h) = if vertical {
        let w = images.iter().map(|i| i.width).max().unwrap_or(1);
        let h = images.iter().map(|i| i.height).sum::<u32>() + gap_total;
        (w, h)
    } else {
        let w = images.iter().map(|i| i.width).sum::<u32>() + gap_total;
        let h = images.iter().map(|i| i.height).max().unwrap_or(1);
        (w, h)
    };

    let mut canvas = PixelBuffer::filled(canvas_w.max(1), canvas_h.max(1), Color::WHITE);
    let mut cursor: i64 = 0;
    for img in images {
        if vertical {
            let x = (canvas_w as i64 - img.width as i64) / 2;
            canvas.draw_buffer(img, x, cursor, 1.0);
            cursor += img.height as i64 + spacing as i64;
        } else {
            let y = (canvas_h as i64 - img.height as i64) / 2;
            canvas.draw_buffer(img, cursor, y, 1.0);
            cursor += img.width as i64 + spacing as i64;
        }
    }
    canvas
}

/// Fixed 3-column grid over the first nine images.
fn nine_square(images: &[PixelBuffer], spacing: u32) -> PixelBuffer {
    let used = &images[..images.len().min(9)];
    let n = used.len() as u32;
    let cols = 3u32;
    let rows = n.div_ceil(cols);

    let cell_w = used.iter().map(|i| i.width).max().unwrap_or(1);
    let cell_h = used.iter().map(|i| i.height).max().unwrap_or(1);
    let canvas_w = cell_w * cols + spacing * (cols - 1);
    let canvas_h = cell_h * rows + spacing * (rows.saturating_sub(1));

    let mut canvas = PixelBuffer::filled(canvas_w, canvas_h, Color::WHITE);
    for (i, img) in used.iter().enumerate() {
        let col = (i as u32) % cols;
        let row = (i as u32) / cols;
        let cell_x = (col * (cell_w + spacing)) as i64;
        let cell_y = (row * (cell_h + spacing)) as i64;
        // Center within the cell.
        let x = cell_x + (cell_w as i64 - img.width as i64) / 2;
        let y = cell_y + (cell_h as i64 - img.height as i64) / 2;
        canvas.draw_buffer(img, x, y, 1.0);
    }
    canvas
}

/// Grid dimensions for a fixed-collage of `n` images on a `w x h` canvas.
///
/// Starts from `cols = ceil(sqrt(n * w / h))`, then shrinks either axis
/// while the grid still holds all images, so no fully-empty row or column
/// survives.
fn collage_grid(n: u32, width: u32, height: u32) -> (u32, u32) {
    let ratio = width as f64 / height as f64;
    let mut cols = ((n as f64 * ratio).sqrt().ceil() as u32).max(1);
    let mut rows = n.div_ceil(cols);
    while cols > 1 && (cols - 1) * rows >= n {
        cols -= 1;
    }
    while rows > 1 && cols * (rows - 1) >= n {
        rows -= 1;
    }
    (cols, rows)
}

/// Pack images into an explicit target canvas, aspect-fit per cell.
fn fixed_collage(images: &[PixelBuffer], width: u32, height: u32) -> PixelBuffer {
    let n = images.len() as u32;
    let (cols, rows) = collage_grid(n, width, height);
    let cell_w = width as f64 / cols as f64;
    let cell_h = height as f64 / rows as f64;

    let mut canvas = PixelBuffer::filled(width, height, Color::WHITE);
    for (i, img) in images.iter().enumerate() {
        if img.width == 0 || img.height == 0 {
            continue;
        }
        let col = (i as u32) % cols;
        let row = (i as u32) / cols;

        // Scale to fit the cell, preserving aspect ratio (no cropping).
        let scale = (cell_w / img.width as f64).min(cell_h / img.height as f64);
        let dw = ((img.width as f64 * scale).round() as u32).max(1);
        let dh = ((img.height as f64 * scale).round() as u32).max(1);

        let x = (col as f64 * cell_w + (cell_w - dw as f64) / 2.0).round() as i64;
        let y = (row as f64 * cell_h + (cell_h - dh as f64) / 2.0).round() as i64;
        canvas.draw_buffer_scaled(img, x, y, dw, dh, 1.0);
    }
    canvas
}

/// Scatter images over a square canvas with random scale, rotation and
/// offset.
fn random_scatter<R: Rng>(images: &[PixelBuffer], rng: &mut R) -> PixelBuffer {
    let total_area: f64 = images
        .iter()
        .map(|i| i.width as f64 * i.height as f64)
        .sum();
    let side = (total_area.sqrt() * SCATTER_AREA_FACTOR).max(SCATTER_MIN_SIDE) as u32;

    let mut canvas = PixelBuffer::filled(side, side, Color::WHITE);
    for img in images {
        if img.width == 0 || img.height == 0 {
            continue;
        }
        let scale: f64 = rng.random_range(0.7..=1.1);
        let dw = ((img.width as f64 * scale).round() as u32).max(1);
        let dh = ((img.height as f64 * scale).round() as u32).max(1);
        let angle = rng.random_range(-15.0f64..=15.0).to_radians();

        // Offset keeps the unrotated bounding box inside the canvas.
        let max_x = (side.saturating_sub(dw)) as f64;
        let max_y = (side.saturating_sub(dh)) as f64;
        let x = rng.random_range(0.0..=max_x.max(0.0));
        let y = rng.random_range(0.0..=max_y.max(0.0));

        draw_rotated_scaled(&mut canvas, img, x, y, dw, dh, angle);
    }
    canvas
}

/// Composite `src`, scaled to `dw x dh` and rotated by `angle` about its own
/// center, with the unrotated top-left at `(dest_x, dest_y)`.
///
/// Uses inverse mapping: each canvas pixel in the rotated bounding box is
/// rotated back and bilinearly sampled from the source.
fn draw_rotated_scaled(
    canvas: &mut PixelBuffer,
    src: &PixelBuffer,
    dest_x: f64,
    dest_y: f64,
    dw: u32,
    dh: u32,
    angle: f64,
) {
    let cx = dest_x + dw as f64 / 2.0;
    let cy = dest_y + dh as f64 / 2.0;
    let (sin, cos) = angle.sin_cos();

    // Bounding box of the rotated rect, clipped to the canvas.
    let half_w = dw as f64 / 2.0;
    let half_h = dh as f64 / 2.0;
    let ext_x = half_w * cos.abs() + half_h * sin.abs();
    let ext_y = half_w * sin.abs() + half_h * cos.abs();
    let x0 = ((cx - ext_x).floor() as i64).max(0);
    let y0 = ((cy - ext_y).floor() as i64).max(0);
    let x1 = ((cx + ext_x).ceil() as i64).min(canvas.width as i64);
    let y1 = ((cy + ext_y).ceil() as i64).min(canvas.height as i64);

    let sx_ratio = src.width as f64 / dw as f64;
    let sy_ratio = src.height as f64 / dh as f64;

    for py in y0..y1 {
        for px in x0..x1 {
            // Rotate the canvas point back into the unrotated destination
            // rectangle.
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            let ux = dx * cos + dy * sin + cx;
            let uy = -dx * sin + dy * cos + cy;
            if ux < dest_x || uy < dest_y || ux >= dest_x + dw as f64 || uy >= dest_y + dh as f64 {
                continue;
            }
            let sx = ((ux - dest_x) * sx_ratio - 0.5) as f32;
            let sy = ((uy - dest_y) * sy_ratio - 0.5) as f32;
            let sample = src.sample_bilinear(sx.max(0.0), sy.max(0.0));
            canvas.blend_pixel(px, py, sample, 1.0);
        }
    }
}
