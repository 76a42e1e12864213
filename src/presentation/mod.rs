// Presentation layer - HTTP surface
pub mod access;
pub mod app_state;
pub mod handlers;
