// Application layer - Use cases and the seams they depend on
pub mod diagnostics;
pub mod environmental_repository;
pub mod farm_service;
pub mod formatter;
pub mod notifier;
pub mod session;
pub mod view_model;
