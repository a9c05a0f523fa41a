mod fill;

pub use fill::fill_polygon;
pub use fill::scale_vertices;
