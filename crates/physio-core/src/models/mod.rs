pub mod assessment;
pub mod body_map;
pub mod classification;
pub mod geometry;
pub mod patient;
pub mod screening;
