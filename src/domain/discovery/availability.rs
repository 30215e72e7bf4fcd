/// Interprets free-form availability text for one marketplace.
///
/// Marketplaces do not share a stock vocabulary, so in-stock detection is a
/// best-effort heuristic kept behind a strategy trait: adding a marketplace
/// means adding an interpreter, not touching the criteria filter.
pub trait AvailabilityInterpreter: Send + Sync {
    /// Marketplace name for logging
    fn name(&self) -> &str;

    /// Whether the text indicates the item can currently be sourced
    fn in_stock(&self, availability_text: &str) -> bool;
}

/// Substrings Amazon uses in availability blurbs for sourceable items.
// TODO: "currently unavailable" matches the "available" marker; needs a
// negative-marker list before this heuristic can be trusted on its own.
const IN_STOCK_MARKERS: [&str; 4] = ["in stock", "available", "left in stock", "ships from"];

/// Availability interpreter for Amazon listing blurbs
#[derive(Debug, Clone, Copy, Default)]
pub struct AmazonAvailability;

impl AvailabilityInterpreter for AmazonAvailability {
    fn name(&self) -> &str {
        "amazon"
    }

    fn in_stock(&self, availability_text: &str) -> bool {
        let lowered = availability_text.to_lowercase();
        IN_STOCK_MARKERS.iter().any(|marker| lowered.contains(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_in_stock() {
        let amazon = AmazonAvailability;
        assert!(amazon.in_stock("In Stock."));
        assert!(amazon.in_stock("IN STOCK"));
    }

    #[test]
    fn test_scarcity_phrasing() {
        let amazon = AmazonAvailability;
        assert!(amazon.in_stock("Only 3 left in stock - order soon."));
        assert!(amazon.in_stock("Ships from and sold by Example Retail."));
    }

    #[test]
    fn test_no_marker_means_out_of_stock() {
        let amazon = AmazonAvailability;
        assert!(!amazon.in_stock("Temporarily out of print."));
        assert!(!amazon.in_stock(""));
    }
}
