//! Core domain types and logic.

pub mod chart;
pub mod chart_builders;
pub mod dataset;
pub mod error;
pub mod pages;
pub mod settings;
pub mod snippets;
pub mod stock_row;
