mod sample;
mod types;

pub use sample::{DemandSample, RankPoint};
pub use types::{
    AlertSeverity, AutoAction, LifecycleStatus, ListingCandidate, MarginAlert, TrackedProduct,
};
