//! Rectangle cropping.

use crate::buffer::PixelBuffer;

/// Sample a `w x h` rectangle starting at `(x, y)` into a new buffer.
///
/// Behaves like a canvas draw primitive: source samples that fall outside
/// the buffer simply contribute nothing, leaving those output pixels
/// transparent. Range checking beyond that is the caller's concern.
pub fn crop(buf: &PixelBuffer, x: i64, y: i64, w: u32, h: u32) -> PixelBuffer {
    let mut out = PixelBuffer::new(w, h);

    for oy in 0..h {
        let sy = y + oy as i64;
        if sy < 0 || sy >= buf.height as i64 {
            continue;
        }
        for ox in 0..w {
            let sx = x + ox as i64;
            if sx < 0 || sx >= buf.width as i64 {
                continue;
            }
            out.set(ox, oy, buf.get(sx as u32, sy as u32));
        }
    }

    out
}
