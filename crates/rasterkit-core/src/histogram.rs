//! Per-channel pixel-value frequency counts.
//!
//! A single full pass over the buffer produces three 256-bin arrays, one per
//! color channel. Alpha is ignored.

use crate::buffer::PixelBuffer;

/// Channel histograms for an RGBA buffer.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Red channel histogram (256 bins).
    pub red: [u32; 256],
    /// Green channel histogram (256 bins).
    pub green: [u32; 256],
    /// Blue channel histogram (256 bins).
    pub blue: [u32; 256],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            red: [0; 256],
            green: [0; 256],
            blue: [0; 256],
        }
    }
}

impl Histogram {
    /// Create a new empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the maximum bin value across all channels, for normalization.
    pub fn max_value(&self) -> u32 {
        let max_r = *self.red.iter().max().unwrap_or(&0);
        let max_g = *self.green.iter().max().unwrap_or(&0);
        let max_b = *self.blue.iter().max().unwrap_or(&0);
        max_r.max(max_g).max(max_b)
    }
}

/// Compute per-channel histograms from a pixel buffer.
///
/// Each bin `[v]` counts the pixels whose channel equals `v`. The alpha
/// channel does not participate. O(n) single pass, constant memory.
pub fn compute_histogram(buf: &PixelBuffer) -> Histogram {
    let mut hist = Histogram::new();

    for chunk in buf.pixels.chunks_exact(4) {
        hist.red[chunk[0] as usize] += 1;
        hist.green[chunk[1] as usize] += 1;
        hist.blue[chunk[2] as usize] += 1;
    }

    hist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Color;

    #[test]
    fn test_empty_buffer() {
        let hist = compute_histogram(&PixelBuffer::new(0, 0));
        assert_eq!(hist.max_value(), 0);
    }

    #[test]
    fn test_black_2x2() {
        let buf = PixelBuffer::filled(2, 2, Color::BLACK);
        let hist = compute_histogram(&buf);
        assert_eq!(hist.red[0], 4);
        assert_eq!(hist.green[0], 4);
        assert_eq!(hist.blue[0], 4);
        for v in 1..256 {
            assert_eq!(hist.red[v], 0);
            assert_eq!(hist.green[v], 0);
            assert_eq!(hist.blue[v], 0);
        }
    }

    #[test]
    fn test_primary_colors() {
        let mut buf = PixelBuffer::new(3, 1);
        buf.set(0, 0, [255, 0, 0, 255]);
        buf.set(1, 0, [0, 255, 0, 255]);
        buf.set(2, 0, [0, 0, 255, 255]);
        let hist = compute_histogram(&buf);
        assert_eq!(hist.red[255], 1);
        assert_eq!(hist.red[0], 2);
        assert_eq!(hist.green[255], 1);
        assert_eq!(hist.blue[255], 1);
    }

    #[test]
    fn test_alpha_ignored() {
        let buf = PixelBuffer::filled(2, 1, Color::rgba(10, 20, 30, 0));
        let hist = compute_histogram(&buf);
        assert_eq!(hist.red[10], 2);
        assert_eq!(hist.green[20], 2);
        assert_eq!(hist.blue[30], 2);
    }

    #[test]
    fn test_gradient_bins() {
        let mut buf = PixelBuffer::new(256, 1);
        for i in 0..256u32 {
            let v = i as u8;
            buf.set(i, 0, [v, v, v, 255]);
        }
        let hist = compute_histogram(&buf);
        for v in 0..256 {
            assert_eq!(hist.red[v], 1);
            assert_eq!(hist.green[v], 1);
            assert_eq!(hist.blue[v], 1);
        }
        assert_eq!(hist.max_value(), 1);
    }
}
