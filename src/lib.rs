//! Discoteca — a federated music catalog.
//!
//! A `media-node` owns a local catalog of artists, albums and tracks and
//! serves it over HTTP. An `aggregator` polls one or more media nodes,
//! rebuilds a mirror of each node's catalog in memory and presents the
//! combined view to HTTP clients.

pub mod aggregator;
pub mod catalog;
pub mod config;
pub mod listing;
pub mod node;

pub use aggregator::Aggregator;
pub use catalog::Catalog;
