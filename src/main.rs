use confluence::config::Config;
use confluence::{AnalysisService, InMemorySeriesStore, Quote, SeriesStore};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "confluence=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    config.policy.validate()?;
    info!(
        "Analyzing {} at {} from {}",
        config.symbol, config.timeframe, config.series_path
    );

    let store = InMemorySeriesStore::new();
    let count = store
        .load_json_file(&config.symbol, &config.timeframe, &config.series_path)
        .await?;
    info!("Loaded {} candles", count);

    let price = match config.price {
        Some(price) => price,
        None => {
            let last_close = store
                .fetch(&config.symbol, &config.timeframe)
                .last()
                .map(|c| c.close)
                .ok_or_else(|| anyhow::anyhow!("{} contains no candles", config.series_path))?;
            warn!("PRICE not set, using last close {}", last_close);
            last_close
        }
    };

    let service = AnalysisService::from_config(store, &config);
    let quote = Quote {
        price,
        change_24h: config.change_24h,
    };

    match service.analyze(&config.symbol, &config.timeframe, quote) {
        Ok(analysis) => {
            info!(
                "{}: {} with {}% confidence",
                analysis.symbol,
                analysis.confluence.action.label(),
                analysis.confluence.confidence
            );
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Err(e) if e.is_insufficient_data() => {
            warn!("Analysis unavailable: {}", e);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
