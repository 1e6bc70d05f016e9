//! Generic square-kernel 2D convolution.
//!
//! R, G and B are convolved independently; alpha is copied through
//! unchanged. Out-of-bounds source samples contribute zero (zero padding,
//! not edge clamping), which visibly darkens convolved edges. That border
//! behavior is part of the output contract and must not be changed to
//! clamping without a contract revision.

use crate::buffer::PixelBuffer;
use crate::error::EngineError;

/// An odd-sized square matrix of signed convolution weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// `size` must be odd and `weights.len()` must equal `size * size`.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, EngineError> {
        if size == 0 || size % 2 == 0 {
            return Err(EngineError::invalid(
                "convolve",
                format!("kernel size must be odd, got {size}"),
            ));
        }
        if weights.len() != size * size {
            return Err(EngineError::invalid(
                "convolve",
                format!(
                    "kernel expects {} weights, got {}",
                    size * size,
                    weights.len()
                ),
            ));
        }
        Ok(Self { size, weights })
    }

    /// The 3x3 sharpen kernel.
    pub fn sharpen() -> Self {
        Self {
            size: 3,
            weights: vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
        }
    }

    /// The 3x3 identity kernel (single center tap).
    pub fn identity() -> Self {
        Self {
            size: 3,
            weights: vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn weight(&self, ky: usize, kx: usize) -> f32 {
        self.weights[ky * self.size + kx]
    }
}

/// Convolve a buffer with a square kernel into a new buffer.
///
/// For every output pixel, sums `weight[ky][kx] * src[y+ky-half][x+kx-half]`
/// over R, G, B; samples falling outside the buffer contribute zero. The
/// alpha channel is copied from the source pixel.
pub fn convolve(buf: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let mut out = PixelBuffer::new(buf.width, buf.height);
    let half = (kernel.size / 2) as i64;
    let (w, h) = (buf.width as i64, buf.height as i64);

    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for ky in 0..kernel.size {
                for kx in 0..kernel.size {
                    let sx = x + kx as i64 - half;
                    let sy = y + ky as i64 - half;
                    if sx < 0 || sy < 0 || sx >= w || sy >= h {
                        continue;
                    }
                    let px = buf.get(sx as u32, sy as u32);
                    let wgt = kernel.weight(ky, kx);
                    acc[0] += wgt * px[0] as f32;
                    acc[1] += wgt * px[1] as f32;
                    acc[2] += wgt * px[2] as f32;
                }
            }
            let src = buf.get(x as u32, y as u32);
            out.set(
                x as u32,
                y as u32,
                [
                    acc[0].round().clamp(0.0, 255.0) as u8,
                    acc[1].round().clamp(0.0, 255.0) as u8,
                    acc[2].round().clamp(0.0, 255.0) as u8,
                    src[3],
                ],
            );
        }
    }

    out
}

/// Apply the sharpen preset kernel.
pub fn sharpen(buf: &PixelBuffer) -> PixelBuffer {
    convolve(buf, &Kernel::sharpen())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Color;

    fn gradient_buffer(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                buf.set(x, y, [v, v.wrapping_add(3), v.wrapping_add(7), 255]);
            }
        }
        buf
    }

    #[test]
    fn test_kernel_rejects_even_size() {
        assert!(Kernel::new(2, vec![0.0; 4]).is_err());
        assert!(Kernel::new(0, vec![]).is_err());
    }

    #[test]
    fn test_kernel_rejects_wrong_weight_count() {
        assert!(Kernel::new(3, vec![0.0; 8]).is_err());
    }

    #[test]
    fn test_identity_kernel_reproduces_source() {
        let buf = gradient_buffer(9, 7);
        let out = convolve(&buf, &Kernel::identity());
        // Zero padding contributes nothing at the center tap, so even the
        // border pixels survive exactly.
        assert_eq!(out, buf);
    }

    #[test]
    fn test_alpha_copied_unchanged() {
        let mut buf = gradient_buffer(5, 5);
        buf.set(2, 2, [100, 100, 100, 42]);
        let out = sharpen(&buf);
        assert_eq!(out.get(2, 2)[3], 42);
    }

    #[test]
    fn test_sharpen_uniform_interior_is_stable() {
        // On a constant image the sharpen taps cancel (5 - 4 = 1) away
        // from the borders.
        let buf = PixelBuffer::filled(5, 5, Color::rgb(80, 90, 100));
        let out = sharpen(&buf);
        assert_eq!(out.get(2, 2), [80, 90, 100, 255]);
    }

    #[test]
    fn test_zero_padding_darkens_edges() {
        let buf = PixelBuffer::filled(5, 5, Color::rgb(100, 100, 100));
        let out = sharpen(&buf);
        // Corner pixel loses two neighbor taps: 5*100 - 2*100 = 300, clamps
        // above the interior value; edge center: 5*100 - 3*100 = 200.
        assert_eq!(out.get(0, 0)[0], 255);
        assert_eq!(out.get(2, 0)[0], 200);
    }

    #[test]
    fn test_box_blur_averages() {
        let weights = vec![1.0 / 9.0; 9];
        let kernel = Kernel::new(3, weights).unwrap();
        let mut buf = PixelBuffer::filled(3, 3, Color::BLACK);
        buf.set(1, 1, [90, 90, 90, 255]);
        let out = convolve(&buf, &kernel);
        // Center becomes the mean of the 3x3 block: 90 / 9 = 10.
        assert_eq!(out.get(1, 1)[0], 10);
    }
}
