// Admin backend - user, class and academic-structure administration

use std::sync::Arc;

use college_erp::{
    api::admin_router,
    config::{Config, ServiceKind},
    infrastructure::RateLimiter,
    server,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::init_tracing();

    let config = Config::from_env(ServiceKind::Admin)?;
    let limiter = Arc::new(RateLimiter::from_config(&config.rate_limit));

    server::serve(admin_router(limiter), &config).await
}
