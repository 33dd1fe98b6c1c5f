use crate::models::{DataSourceKind, ResolvedExtremes};

/// Pick the daily extremes to trust from today's forecast and the tracked
/// hourly extremes.
///
/// With both sources the widest envelope wins. Either source alone is used
/// as-is; a source only counts when both its min and max are present.
pub fn resolve_extremes(
    forecast: Option<(f64, f64)>,
    tracked_min: Option<f64>,
    tracked_max: Option<f64>,
) -> ResolvedExtremes {
    let tracked = tracked_min.zip(tracked_max);

    match (forecast, tracked) {
        (Some((f_min, f_max)), Some((t_min, t_max))) => {
            let min = f_min.min(t_min);
            let max = f_max.max(t_max);
            tracing::debug!(min, max, "Using combined forecast+tracked temps");
            ResolvedExtremes {
                min: Some(min),
                max: Some(max),
                source: DataSourceKind::Combined,
            }
        }
        (Some((min, max)), None) => {
            tracing::debug!(min, max, "Using forecast temps");
            ResolvedExtremes {
                min: Some(min),
                max: Some(max),
                source: DataSourceKind::Forecast,
            }
        }
        (None, Some((min, max))) => {
            tracing::debug!(min, max, "Using tracked temps");
            ResolvedExtremes {
                min: Some(min),
                max: Some(max),
                source: DataSourceKind::Tracked,
            }
        }
        (None, None) => {
            tracing::warn!("No reliable min/max temperature data available");
            ResolvedExtremes::none()
        }
    }
}
