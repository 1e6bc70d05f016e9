//! Geometric transforms: resizing and cropping.

mod crop;
mod resize;

pub use crop::crop;
pub use resize::resize;
