#![forbid(unsafe_code)]

pub mod coverage;
pub mod fields;
pub mod model;

pub use coverage::CoverageState;
pub use fields::{RenderedField, SizeHint, render_fields};
