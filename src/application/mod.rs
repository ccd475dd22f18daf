// Application layer - Dashboard generation and the use cases around it
pub mod catalog_resolver;
pub mod catalog_source;
pub mod dashboard_builder;
pub mod dashboard_service;
pub mod panel_factory;
pub mod series_matcher;
pub mod series_repository;
