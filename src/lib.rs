//! MyoView - a desktop viewer for EMG session datasets
//!
//! This library contains the data pipeline (sanitation, downsampling,
//! statistics, view windowing) and the graphical user interface for
//! browsing datasets served by the dataset service.
//!
//! ## Module Structure
//!
//! - [`api`] - HTTP client for the dataset service
//! - [`app`] - Main application state and eframe::App implementation
//! - [`series`] - Channel keys, samples, and series sanitation
//! - [`downsample`] - Uniform-stride and min-max envelope reduction
//! - [`display`] - Display-mode dispatch producing chart-ready data
//! - [`stats`] - Client-side per-channel minima
//! - [`brush`] - View-window selection over the displayed series
//! - [`state`] - Core data types and constants
//! - [`ui`] - User interface components
//!   - `datasets_panel` - Dataset list, upload, and edit forms
//!   - `chart` - Mode toolbar and chart rendering (merged and split)
//!   - `stats_panel` - Aggregate statistics table
//!   - `toast` - Toast notification system

pub mod api;
pub mod app;
pub mod brush;
pub mod display;
pub mod downsample;
pub mod series;
pub mod state;
pub mod stats;
pub mod ui;
