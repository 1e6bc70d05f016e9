//! Compositing: blend modes, anchored overlays, backgrounds, vignettes.

pub mod background;
pub mod blend;
pub mod vignette;
pub mod watermark;

pub use background::{add_background, random_color};
pub use blend::{blend_fill, BlendMode};
pub use vignette::{lomo_vignette, vignette};
pub use watermark::{watermark_image, watermark_text, ANCHOR_MARGIN};
