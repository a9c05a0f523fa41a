mod color;
mod idmask;

pub use color::Color;
pub use color::is_background;
pub use color::object_id;
pub use color::to_hex;

pub use idmask::IdMask;
pub use idmask::distinct_colors;
