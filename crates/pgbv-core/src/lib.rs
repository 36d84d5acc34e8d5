#![forbid(unsafe_code)]

//! Core: grid geometry and the relation/table model.

pub mod geometry;
pub mod model;

pub use geometry::{Coordinate, Rect, Size};
pub use model::{Metric, Relation, Table, Toast};
