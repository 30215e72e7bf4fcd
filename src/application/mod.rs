// Discovery pass: search -> filter -> score -> price -> import
pub mod discovery_service;

// Periodic margin re-evaluation against the source listing
pub mod price_sync_service;
