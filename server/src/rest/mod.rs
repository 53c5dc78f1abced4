//! REST surface: one module per resource plus the photo intake.

pub mod departments;
pub mod employees;
pub mod photos;
