use std::sync::Arc;
use oracle_watch::api::{create_router, ApiState};
use oracle_watch::app;
use oracle_watch::config::AppConfig;
use oracle_watch::feed::{FeedPoller, FeedState};
use oracle_watch::observability::{metrics, tracing as telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("ORACLE_WATCH_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env)?;

    telemetry::init(&config.logging);
    metrics::register_metrics();
    tracing::info!("Starting oracle-watch ({})", env);

    let feed = Arc::new(app::connect(&config).await?);
    let target = app::initial_target(&config)?;
    let poller = FeedPoller::spawn(feed, target, config.feed.poll_interval());

    if config.api.enabled {
        let listener = tokio::net::TcpListener::bind(&config.api.bind).await?;
        tracing::info!("API listening on {}", listener.local_addr()?);
        let router = create_router(Arc::new(ApiState { feed: poller.control() }));
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("API server exited: {}", e);
            }
        });
    }

    let mut updates = poller.subscribe();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                log_state(&state);
            }
            _ = &mut shutdown => {
                tracing::info!("Shutdown requested");
                break;
            }
        }
    }

    poller.shutdown();
    Ok(())
}

fn log_state(state: &FeedState) {
    if state.loading {
        tracing::info!("Loading oracle data...");
        return;
    }
    if let Some(error) = &state.error {
        tracing::warn!("Error loading oracle data: {}", error);
        return;
    }

    let active: Vec<_> = state.active_feeds().collect();
    let inactive: Vec<_> = state.inactive_feeds().collect();
    tracing::info!("{} active feeds, {} inactive", active.len(), inactive.len());
    for record in active.into_iter().chain(inactive) {
        tracing::info!("{}", record);
    }
}
