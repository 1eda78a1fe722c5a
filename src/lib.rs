//! Metro hospital dashboard backend: loads five healthcare datasets, scopes
//! them to one region, joins them into a working table, and serves the chart
//! payloads plus an interactive facility map as a single page.

pub mod charts;
pub mod cli;
pub mod datasets;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod server;
pub mod storage;
pub mod transform;
