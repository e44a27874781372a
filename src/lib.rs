//! coursemap: an in-memory course catalog for course planning.
//!
//! Courses are loaded once from a catalog file into a [`domain::CourseIndex`]
//! (an unbalanced binary search tree keyed by course number) and then
//! queried by exact course number or listed in index order.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
