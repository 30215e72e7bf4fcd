mod scorer;

pub use scorer::{DemandConfig, DemandScore, DemandScorer};
