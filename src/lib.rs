//! Aggregate statistics, rankings and heuristic suggestions over brewery
//! record sets.
//!
//! The engine is pure: every entry point takes a borrowed slice of
//! [`BreweryRecord`]s and returns freshly derived values. Loading files and
//! printing reports live in [`loader`] and [`output`] for the CLI.
pub mod aggregate;
pub mod completeness;
pub mod config;
pub mod error;
pub mod insights;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod ranking;
pub mod ratio;
pub mod reports;
pub mod suggestions;
pub mod types;
pub mod util;
pub mod view_mode;

pub use aggregate::{group_all, group_by, Dimension, DimensionTables};
pub use completeness::CompletenessScorer;
pub use config::{AddressField, AnalyticsConfig};
pub use error::{AnalyticsError, ConfigError, FileError};
pub use insights::{generate_insights, Insight, InsightKind};
pub use normalize::normalize;
pub use ranking::top_n;
pub use ratio::{presence_ratio, presence_ratio_by_group, presence_ratio_for_keys};
pub use reports::{analyze, chart_view, BreweryAnalysis, ChartView};
pub use suggestions::{generate_suggestions, FilterKey, Suggestion};
pub use types::{BreweryRecord, CountTable, GroupRatio, NormalizedKeys, RankedEntry, Ratio};
pub use view_mode::{visibility_for, ChartSection, DisplayState, ViewMode, Visibility};
