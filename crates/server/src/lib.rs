pub mod api;
pub mod metrics;
pub mod services;
pub mod state;
