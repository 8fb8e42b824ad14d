pub mod api;
pub mod cart;
pub mod entities;
pub mod middleware;
pub mod payment;
pub mod session;

pub use api::create_api_router;
