pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

pub use error::ApiError;
pub use routes::{create_router, AppState};
