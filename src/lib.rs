//! EU indicator dashboard: indexes Eurostat-style rows into a
//! country → year → indicator lookup and renders it as a line chart,
//! an animated bubble chart and a colour-coded table.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod scale;
pub mod state;
pub mod theme;
pub mod ui;
