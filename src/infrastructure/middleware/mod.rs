// HTTP middleware shared by both backends

pub mod rate_limit;
pub mod request_id;

pub use rate_limit::{rate_limit_middleware, RateLimiter};
pub use request_id::{request_id_middleware, REQUEST_ID_HEADER};
