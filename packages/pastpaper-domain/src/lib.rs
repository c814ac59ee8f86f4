//! Naming-convention resolution for the exam-paper archive.
//!
//! Everything here is pure: it turns a [`StructuredQuery`] into remote query fragments and decides
//! which returned file names belong to the request.

pub mod filename;
pub mod groups;
pub mod language;
pub mod level;
pub mod paper;
pub mod plan;
pub mod preference;
pub mod request;
pub mod subject;

pub use request::{InvalidQuery, Level, Month, Paper, StructuredQuery};
