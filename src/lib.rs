pub mod config;
pub mod dashboard_client;
pub mod presentation;
pub mod stream;
pub mod surfaces;
pub mod sync;
pub mod task;
pub mod types;

pub use config::Config;
pub use dashboard_client::DashboardClient;
pub use types::DashboardError;
