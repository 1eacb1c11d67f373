use calc_core::RestCalculator;
use tracing_subscriber::EnvFilter;

const DEFAULT_BASE_URL: &str = "http://localhost:8080/operation";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_url = std::env::var("CALC_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let calc = RestCalculator::new(&base_url)?
        .with_observer(std::sync::Arc::new(|url: &str, attempt: u32| {
            tracing::info!(%url, attempt, "requesting");
        }));

    tracing::info!(%base_url, "exercising remote calculator");
    tracing::info!(result = ?calc.add(5.0, 3.0)?, "5 + 3");
    tracing::info!(result = ?calc.subtract(10.0, 4.0)?, "10 - 4");
    tracing::info!(result = ?calc.multiply(6.0, 7.0)?, "6 * 7");
    tracing::info!(result = %calc.divide(20.0, 4.0)?, "20 / 4");
    tracing::info!(result = %serde_json::to_string(&calc.divide(20.0, 0.0)?)?, "20 / 0");
    Ok(())
}
