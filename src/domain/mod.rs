// Catalog domain (listings, tracked products, rank history)
pub mod catalog;

// Demand scoring domain
pub mod demand;

// Discovery criteria domain
pub mod discovery;

// Pricing and margin monitoring domain
pub mod pricing;

// Port interfaces
pub mod ports;

// Repository traits
pub mod repositories;

// Domain-specific error types
pub mod errors;
