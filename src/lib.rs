//! Customer Demography Dashboard
//!
//! Aggregates a customer table and a province coordinate table into the
//! tables behind the dashboard charts, and draws them with egui.

pub mod aggregate;
pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
