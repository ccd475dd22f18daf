//! Scripted dashboard generation for collectd metrics stored in InfluxDB.
//!
//! The core ([`application::dashboard_builder`]) is pure: given the series
//! names of a host and a visualization [`Catalog`](domain::catalog::Catalog),
//! it produces a [`Dashboard`](domain::dashboard::Dashboard) of rows, panels
//! and query targets. The service around it fetches both inputs and serves
//! the result over HTTP.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::dashboard_builder::{DashboardBuilder, Selection, generate};
pub use domain::catalog::{Catalog, CatalogError};
pub use domain::dashboard::{Dashboard, Panel, Row, Target, TimeWindow};
pub use domain::time_range::TimeRange;
