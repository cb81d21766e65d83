//! Finding model and report renderers.

pub mod json;
pub mod model;
pub mod reporter;
pub mod text;
