use hyperlens::api;
use hyperlens::config::Config;
use hyperlens::datasource::HyperliquidDataSource;
use hyperlens::engine::SystemClock;
use hyperlens::service::{
    InMemoryUserRegistry, LeaderboardService, LedgerService, PnlService, PositionService,
    TradeService,
};
use hyperlens::{Clock, DataSource};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.port;

    let source: Arc<dyn DataSource> =
        Arc::new(HyperliquidDataSource::new(config.hyperliquid_api_url.clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let target = config.target_builder.clone();

    let trades = Arc::new(TradeService::new(
        source.clone(),
        clock.clone(),
        target.clone(),
    ));
    let positions = Arc::new(PositionService::new(
        source.clone(),
        clock.clone(),
        target.clone(),
    ));
    let pnl = Arc::new(PnlService::new(source.clone(), clock.clone(), target));
    let ledger = Arc::new(LedgerService::new(source, clock));
    let registry = Arc::new(InMemoryUserRegistry::new(config.leaderboard_users.clone()));
    let leaderboard = Arc::new(LeaderboardService::new(pnl.clone(), registry));

    // Create router
    let app = api::create_router(api::AppState {
        trades,
        positions,
        pnl,
        ledger,
        leaderboard,
    });

    // Bind to address
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
