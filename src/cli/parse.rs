use dagwalk_core::format::OutputFormat;
use dagwalk_core::{Cid, OnError, Order};

/// Parse output format from string
pub fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse traversal order from string
pub fn parse_order(s: &str) -> std::result::Result<Order, String> {
    s.parse::<Order>().map_err(|e| e.to_string())
}

/// Parse fetch failure policy from string
pub fn parse_on_error(s: &str) -> std::result::Result<OnError, String> {
    s.parse::<OnError>().map_err(|e| e.to_string())
}

/// Parse content identifier from string
pub fn parse_cid(s: &str) -> std::result::Result<Cid, String> {
    s.parse::<Cid>().map_err(|e| e.to_string())
}
