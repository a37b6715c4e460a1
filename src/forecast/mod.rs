pub mod holt_winters;
pub mod profile;
pub mod seasonality;

use holt_winters::ForecastResult;
use seasonality::SeasonalityDetectionResult;

/// Detects the season length, then forecasts with it.
///
/// When no cycle is found the forecast uses `fallback_season`.
pub fn auto_forecast(
    series: &[f64],
    horizon: usize,
    fallback_season: usize,
) -> (SeasonalityDetectionResult, ForecastResult) {
    let detection = seasonality::detect_seasonality(series);
    let season_length = detection.period.unwrap_or(fallback_season);
    tracing::debug!(season_length, detected = detection.has_seasonality, "auto forecast");
    let result = holt_winters::forecast(series, season_length, horizon);
    (detection, result)
}
