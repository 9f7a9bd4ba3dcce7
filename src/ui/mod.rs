//! UI rendering modules for the MyoView application.
//!
//! This module organizes the various UI components into logical
//! submodules:
//!
//! - `datasets_panel` - Dataset list, refresh, and the upload form
//! - `chart` - Mode toolbar, chart rendering (merged and split), and
//!   the view-window controls
//! - `stats_panel` - Aggregate statistics table for the active dataset
//! - `edit_dialog` - Rename / replace-file window for a dataset
//! - `toast` - Toast notification system

pub mod chart;
pub mod datasets_panel;
pub mod edit_dialog;
pub mod stats_panel;
pub mod toast;
