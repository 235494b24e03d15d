//! **gamelab-core**: shared geometry for the gamelab engines.
//!
//! This crate provides the small utility layer underneath both the flow-field
//! and the game-search engines: integer grid points and rectangles, the
//! mapping between world positions and grid cells, and a handful of vector
//! helpers (normalize, length, degree/radian conversion) over [`glam::Vec2`].

pub mod geom;
pub mod space;
pub mod vector;

pub use geom::{Point, Range, RangeIter};
pub use glam::Vec2;
pub use space::GridSpace;
