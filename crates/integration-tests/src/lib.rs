//! Integration tests for Wrenfield Antiques.
//!
//! The tests in `tests/` exercise the storefront API end to end and are
//! ignored by default: they need a running storefront (which in turn needs
//! a reachable CMS with seeded data).
//!
//! # Running Tests
//!
//! ```bash
//! # Seed the CMS and start the storefront
//! cargo run -p wrenfield-cli -- seed
//! cargo run -p wrenfield-storefront
//!
//! # Run integration tests
//! cargo test -p wrenfield-integration-tests -- --ignored
//! ```
//!
//! The target server is configurable via `STOREFRONT_BASE_URL`
//! (default `http://localhost:3000`).
