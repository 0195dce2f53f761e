//! physio-bodymap
//!
//! The body-chart drawing core: maps pointer positions into the logical
//! canvas, captures freehand polygons, and keeps the marked areas with a
//! snapshot undo history. Rendering helpers produce SVG attribute strings;
//! the drawing surface itself lives in the frontend.

pub mod capture;
pub mod editor;
pub mod render;
pub mod store;
pub mod transform;
