// Domain layer - Dashboard document, catalog schema, and value helpers
pub mod catalog;
pub mod dashboard;
pub mod series;
pub mod time_range;
