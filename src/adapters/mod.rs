//! Infrastructure adapters. Implement outbound ports.
//!
//! LLM API, Linear GraphQL, filesystem. Map errors to DomainError.

pub mod ai;
pub mod images;
pub mod tracker;
pub mod ui;
