// Feature assembly: raw wizard answers -> the prediction model's input vector.

pub mod communication;
pub mod transformer;

pub use transformer::{transform, FeatureError, FeatureVector};
