pub mod estimate;
pub mod render;

pub use estimate::{EmailEstimate, Estimate, EstimateRequest};
pub use render::{catalog_json, render_catalog, render_estimate};
