//! Bubble chart of country metrics drawn in Braille over a world map,
//! with a companion data table.

pub mod app;
pub mod braille;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod metric;
pub mod table;
pub mod ui;
