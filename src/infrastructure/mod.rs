// Infrastructure layer - External dependencies and adapters
pub mod api_repository;
pub mod config;
pub mod mock_repository;
pub mod notification_feed;
