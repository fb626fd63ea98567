mod polygon;

pub use polygon::ParcelPolygon;
