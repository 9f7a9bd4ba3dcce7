//! Core application state types and constants.
//!
//! This module contains the fundamental data structures used throughout
//! the application: display modes, layouts, viewport classes, fetch
//! state, and the cache key for memoized chart data.

use crate::api::{DatasetDetail, DatasetSummary};

// ============================================================================
// Constants
// ============================================================================

/// Point cap for the light display mode (uniform-stride downsampling)
pub const LIGHT_MAX_POINTS: usize = 1500;

/// Point cap shared by the detailed and envelope display modes
pub const RENDER_MAX_POINTS: usize = 4000;

/// Point cap applied on top of light mode for compact viewports
pub const COMPACT_MAX_POINTS: usize = 220;

/// Window width (points) below which the viewport counts as compact
pub const COMPACT_VIEWPORT_WIDTH: f32 = 700.0;

/// Line colors per channel, in [`crate::series::ChannelKey::ALL`] order
pub const CHANNEL_COLORS: &[[u8; 3]] = &[
    [37, 99, 235],  // EMG 1 - blue
    [5, 150, 105],  // EMG 2 - green
    [217, 119, 6],  // EMG 3 - amber
    [220, 38, 38],  // EMG 4 - red
    [124, 58, 237], // Angle - violet
];

// ============================================================================
// Display Types
// ============================================================================

/// Mutually exclusive data reduction modes for the chart
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum DisplayMode {
    /// Uniform-stride downsampling with a small cap; fastest to render
    #[default]
    Light,
    /// Pass-through under the render cap, uniform-stride above it
    Detailed,
    /// Pass-through under the render cap, min-max envelope above it
    Envelope,
}

impl DisplayMode {
    /// All modes in toolbar order
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::Light,
        DisplayMode::Detailed,
        DisplayMode::Envelope,
    ];

    /// Display name for the mode selector
    pub fn name(&self) -> &'static str {
        match self {
            DisplayMode::Light => "Light",
            DisplayMode::Detailed => "Detailed",
            DisplayMode::Envelope => "Envelope",
        }
    }
}

/// Chart layout: one merged plot or one plot per channel group
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum LayoutMode {
    /// All five channels on a single plot
    #[default]
    Merged,
    /// EMG channels on one plot, angle on its own
    Split,
}

impl LayoutMode {
    pub fn name(&self) -> &'static str {
        match self {
            LayoutMode::Merged => "Merged",
            LayoutMode::Split => "Per group",
        }
    }
}

/// Size class of the window, derived from available width each frame
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum ViewportClass {
    #[default]
    Wide,
    Compact,
}

impl ViewportClass {
    /// Classify a window width in points
    pub fn from_width(width: f32) -> Self {
        if width < COMPACT_VIEWPORT_WIDTH {
            ViewportClass::Compact
        } else {
            ViewportClass::Wide
        }
    }
}

// ============================================================================
// Fetch State
// ============================================================================

/// Result from a background dataset-detail fetch, tagged with the
/// request token it was issued under
pub enum FetchResult {
    Success(u64, Box<DatasetDetail>),
    Error(u64, String),
}

/// Result from a background dataset-list fetch
pub enum ListResult {
    Success(Vec<DatasetSummary>),
    Error(String),
}

/// Result from a background create/update call
pub enum MutationResult {
    Created(i64),
    Updated(i64),
    Error(String),
}

/// Current state of the detail fetch
#[derive(Default)]
pub enum FetchState {
    /// No fetch in progress
    #[default]
    Idle,
    /// Fetching a dataset (contains the dataset id)
    Loading(i64),
}

/// Cache key for memoized chart data. Re-rendering with an unchanged
/// key performs zero recomputation; any change in dataset, mode, or
/// viewport class misses the cache and recomputes.
#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub struct ChartCacheKey {
    pub dataset_id: i64,
    pub mode: DisplayMode,
    pub viewport: ViewportClass,
}

/// Type of toast notification (determines color)
#[derive(Clone, Copy, Default)]
pub enum ToastType {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastType {
    /// Background color for this toast type
    pub fn color(&self) -> [u8; 3] {
        match self {
            ToastType::Info => [71, 108, 155],   // Blue
            ToastType::Success => [5, 150, 105], // Green
            ToastType::Error => [135, 30, 28],   // Dark red
        }
    }
}
