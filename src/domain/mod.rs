//! Domain layer - observations, variation alerting and broadcast windows

pub mod observation;
pub mod schedule;
pub mod variation;

pub use observation::Observation;
pub use schedule::BroadcastWindows;
pub use variation::VariationAlert;
