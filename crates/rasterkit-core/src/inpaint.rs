//! Mask-driven diffusion fill for watermark removal.
//!
//! The marked region is erased by eroding its boundary inward: every pass
//! finds masked pixels with at least one known (in-bounds, unmasked)
//! 8-neighbor, averages their known neighbors' RGB, and commits all results
//! at once. Committing after the scan is a correctness requirement, not an
//! optimization: within-pass updates must never be visible to other pixels
//! of the same pass, so results are independent of scan order.
//!
//! Out-of-bounds neighbors never wrap or mirror; they simply do not
//! contribute. Each pass peels at least one boundary layer, so any bounded
//! mask empties in at most half its smaller bounding-box dimension passes.

use crate::buffer::PixelBuffer;

/// Resample a paint-surface alpha channel to the target resolution.
///
/// Nearest-neighbor with source coordinates clamped to the mask's own
/// bounds. Nonzero alpha marks a pixel for filling.
pub fn resample_mask(
    mask: &[u8],
    mask_w: u32,
    mask_h: u32,
    target_w: u32,
    target_h: u32,
) -> Vec<bool> {
    let mut out = vec![false; (target_w as usize) * (target_h as usize)];
    if mask_w == 0 || mask_h == 0 || target_w == 0 || target_h == 0 {
        return out;
    }

    for y in 0..target_h {
        let sy = ((y as u64 * mask_h as u64) / target_h as u64).min(mask_h as u64 - 1) as usize;
        for x in 0..target_w {
            let sx = ((x as u64 * mask_w as u64) / target_w as u64).min(mask_w as u64 - 1) as usize;
            let src = sy * mask_w as usize + sx;
            if mask.get(src).copied().unwrap_or(0) > 0 {
                out[(y as usize) * (target_w as usize) + (x as usize)] = true;
            }
        }
    }

    out
}

/// True if the mask marks at least one pixel.
pub fn mask_has_pixels(mask: &[bool]) -> bool {
    mask.iter().any(|&m| m)
}

const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Fill the masked region of `buf` by iterative boundary erosion.
///
/// `mask` must have one entry per pixel. Returns a new buffer; if the mask
/// marks nothing, the result is bit-identical to the input.
pub fn diffusion_fill(buf: &PixelBuffer, mask: &[bool]) -> PixelBuffer {
    debug_assert_eq!(mask.len(), buf.pixel_count() as usize, "Mask size mismatch");

    let mut out = buf.clone();
    if !mask_has_pixels(mask) {
        return out;
    }

    let (w, h) = (buf.width as i64, buf.height as i64);
    let mut mask = mask.to_vec();

    // Indices still waiting to be filled; shrinks as passes commit.
    let mut remaining: Vec<usize> = mask
        .iter()
        .enumerate()
        .filter_map(|(i, &m)| if m { Some(i) } else { None })
        .collect();

    loop {
        // Scan phase: compute fills from the state at the start of the pass.
        let mut pending: Vec<(usize, [u8; 3])> = Vec::new();
        for &idx in &remaining {
            let x = (idx as i64) % w;
            let y = (idx as i64) / w;

            let mut sum = [0u32; 3];
            let mut count = 0u32;
            for (dx, dy) in NEIGHBOR_OFFSETS {
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || ny < 0 || nx >= w || ny >= h {
                    continue;
                }
                let nidx = (ny * w + nx) as usize;
                if mask[nidx] {
                    continue;
                }
                let px = out.get(nx as u32, ny as u32);
                sum[0] += px[0] as u32;
                sum[1] += px[1] as u32;
                sum[2] += px[2] as u32;
                count += 1;
            }
            // No qualifying neighbor yet: defer to a later pass.
            if count == 0 {
                continue;
            }
            pending.push((
                idx,
                [
                    (sum[0] / count) as u8,
                    (sum[1] / count) as u8,
                    (sum[2] / count) as u8,
                ],
            ));
        }

        if pending.is_empty() {
            break;
        }

        // Commit phase: apply every computed color, then clear mask bits.
        for &(idx, rgb) in &pending {
            let x = (idx as i64 % w) as u32;
            let y = (idx as i64 / w) as u32;
            let alpha = out.get(x, y)[3];
            out.set(x, y, [rgb[0], rgb[1], rgb[2], alpha]);
            mask[idx] = false;
        }
        remaining.retain(|&idx| mask[idx]);
        if remaining.is_empty() {
            break;
        }
    }

    out
}
