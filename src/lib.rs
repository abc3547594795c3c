//! issue-relay: notes and screenshots in, Linear issues out. Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
