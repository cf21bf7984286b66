use tracing::warn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use reach_server::config::Config;
use reach_server::error::Error;

#[actix_web::main]
async fn main() -> Result<(), Error> {
    let (config, warnings) = Config::from_env();

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NEW)
        .compact()
        .init();

    for warning in warnings {
        warn!("{}", warning);
    }

    reach_server::run(config).await
}
