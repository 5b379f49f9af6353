pub mod face;
pub mod labels;
