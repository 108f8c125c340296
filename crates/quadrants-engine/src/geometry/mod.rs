//! Static geometry: the quadrant vertex table and its index-aligned colors.

mod quadrant;

pub use quadrant::{
    Quadrant, BYTES_PER_FLOAT, FLOATS_PER_QUADRANT, FLOATS_PER_VERTEX, QUADRANT_COLORS,
    QUADRANT_COUNT, VERTEX_POSITIONS, VERTEX_STRIDE, VERTICES_PER_QUADRANT,
};
