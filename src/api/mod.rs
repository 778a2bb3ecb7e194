// HTTP surface of both backends

pub mod academic;
pub mod admin;
pub mod envelope;
pub mod health;

pub use academic::academic_router;
pub use admin::admin_router;
pub use envelope::ApiResponse;
