//! Application use cases. Orchestrate domain logic via ports.

pub mod assignment_service;
pub mod creation_service;
pub mod extraction_service;

pub use assignment_service::AssignmentService;
pub use creation_service::CreationService;
pub use extraction_service::ExtractionService;
