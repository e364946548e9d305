//! Framework-independent view models
//!
//! Presentation logic for the container pages, kept free of UI framework
//! types so it can be driven from the Leptos components and the CLI alike:
//! - `card`: search result card rows and click routing
//! - `profiler`: profiler summary, test results, date range
//! - `sample_data`: sample data grid
//! - `settings` / `custom_metric`: form state and validation
//! - `latest`: stale response guard

pub mod card;
pub mod custom_metric;
pub mod format;
pub mod latest;
pub mod navigation;
pub mod permissions;
pub mod profiler;
pub mod sample_data;
pub mod settings;

pub use card::{CardTag, ExtraInfo, MatchCount, TableDataCardProps, Tier};
pub use custom_metric::{existing_metrics, CustomMetricForm, CustomMetricFormError};
pub use latest::{LatestRequest, RequestToken};
pub use navigation::{
    entity_link, is_tour_route, LinkClick, Navigator, SearchIndex, TourContext, TourPage, TOUR_ROUTE,
};
pub use permissions::OperationPermission;
pub use profiler::{
    ColumnTestResult, DateRange, ModifiedColumn, OverallTableSummary, TableProfilerData,
    TableProfilerViewModel, TestResults,
};
pub use sample_data::{can_delete_sample_data, SampleColumn, SampleData, SampleDataRow, SampleDataValue};
pub use settings::ProfilerSettingsForm;
