//! linedeck: interactive line-chart demo.
//!
//! Hexagonal layout: domain logic (dataset, chart specs, pages) in
//! [`domain`], port traits in [`ports`], concrete implementations in
//! [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
