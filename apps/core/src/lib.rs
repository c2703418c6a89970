// View models for the retail analytics dashboard.
// Everything here is free of IO so the terminal and web front ends share it.

pub mod charts;
pub mod dashboard;
pub mod endpoint;
pub mod filter;
pub mod format;
pub mod generation;
pub mod geo;
pub mod payload;
pub mod region;
pub mod widgets;

pub use dashboard::{Applied, Dashboard, FetchFailure, FilterChange, RefreshRequest};
pub use endpoint::{Endpoint, MetricsQuery};
pub use generation::Generation;
pub use payload::{Payload, PayloadError};
pub use region::RegionSelector;
