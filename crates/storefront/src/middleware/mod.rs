//! Tower middleware for the storefront.

pub mod rate_limit;
