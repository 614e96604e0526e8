pub mod analyze;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use analyze::ErrorResponse;
pub use routes::create_router;
