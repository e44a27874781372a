//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod index;

pub use entities::{parse_catalog, Course};
pub use error::DomainError;
pub use index::{CourseIndex, CourseNode, InOrderIter, SHAPE_DEPTH};
