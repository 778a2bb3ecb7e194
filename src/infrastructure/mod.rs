// Infrastructure modules
pub mod directory;         // Hosted database access
pub mod memory_directory;  // In-memory directory for tests and local runs
pub mod middleware;        // Rate limiting and other HTTP layers

pub use directory::{connect_directory, CampusDirectory, PostgresDirectory};
pub use memory_directory::{DirectoryTable, InMemoryDirectory};
pub use middleware::rate_limit::RateLimiter;
