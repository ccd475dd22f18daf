// Infrastructure layer - External dependencies and adapters
pub mod catalog_loader;
pub mod config;
pub mod http_response;
pub mod influx_repository;
