mod availability;
mod criteria;

pub use availability::{AmazonAvailability, AvailabilityInterpreter};
pub use criteria::{CriteriaFilter, CriteriaVerdict, DiscoveryCriteria, RejectReason};
