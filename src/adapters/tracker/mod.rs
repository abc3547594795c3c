//! Tracker adapter module. Implements TrackerPort against Linear's GraphQL API.

pub mod linear;

pub use linear::LinearAdapter;
