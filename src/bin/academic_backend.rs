// Academic backend - timetable, attendance, marks, groups, notifications and profiles

use std::sync::Arc;
use tracing::info;

use college_erp::{
    api::{academic::API_PREFIX, academic_router},
    app_state::AppState,
    config::{Config, ServiceKind},
    infrastructure::RateLimiter,
    server,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::init_tracing();

    let config = Config::from_env(ServiceKind::Academic)?;
    let state = AppState::new(config.clone()).await?;
    let limiter = Arc::new(RateLimiter::from_config(&config.rate_limit));

    info!("  GET  /health");
    info!("  GET  /health/ready");
    info!("  GET  {}/student/profile?user_id=<uuid>", API_PREFIX);
    info!("  GET  {}/professor/profile?user_id=<uuid>", API_PREFIX);

    server::serve(academic_router(state, limiter), &config).await
}
