//! Wrenfield Antiques storefront library.
//!
//! The storefront serves the public catalog API: category and product
//! reads shaped into view models, search, the navigation menu, and the
//! three intake forms (contact, newsletter, offers). All content lives in
//! the headless CMS; this crate holds the query and presentation logic.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod cms;
pub mod config;
pub mod error;
pub mod media;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
