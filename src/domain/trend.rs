// Chartable series derived from a field's readings
use super::reading::LabeledRow;
use serde::Serialize;

pub const DEFAULT_MAX_POINTS: usize = 150;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub id: String,
    pub unit: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl TrendSeries {
    pub fn new(id: &str, unit: &str, points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            id: id.to_string(),
            unit: unit.to_string(),
            points,
        }
    }
}

/// Moisture, temperature and humidity series for one field, each reduced to
/// at most `max_points`.
pub fn field_trends(rows: &[&LabeledRow], max_points: usize) -> Vec<TrendSeries> {
    let series = |extract: fn(&LabeledRow) -> f64| -> Vec<TimeSeriesPoint> {
        let points = rows
            .iter()
            .map(|r| {
                TimeSeriesPoint::new(
                    r.reading.timestamp.and_utc().timestamp_millis(),
                    extract(*r),
                )
            })
            .collect();
        downsample_points(points, max_points)
    };

    vec![
        TrendSeries::new(
            "soil_moisture_pct",
            "%",
            series(|r| r.reading.soil_moisture_pct),
        ),
        TrendSeries::new("air_temp_c", "°C", series(|r| r.reading.air_temp_c)),
        TrendSeries::new("humidity_pct", "%", series(|r| r.reading.humidity_pct)),
    ]
}

/// Downsample time series points using bucket averaging
pub fn downsample_points(points: Vec<TimeSeriesPoint>, max_points: usize) -> Vec<TimeSeriesPoint> {
    if max_points == 0 || points.len() <= max_points {
        return points;
    }

    let bucket_size = (points.len() as f64 / max_points as f64).ceil() as usize;

    points
        .chunks(bucket_size)
        .map(|chunk| {
            // Middle point's timestamp, average value
            let mid = &chunk[chunk.len() / 2];
            let avg = chunk.iter().map(|p| p.value).sum::<f64>() / chunk.len() as f64;
            TimeSeriesPoint::new(mid.time_ms, avg)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::tests::row;

    #[test]
    fn test_downsample_averages_buckets() {
        let points: Vec<_> = (0..10)
            .map(|i| TimeSeriesPoint::new(i, i as f64))
            .collect();

        let reduced = downsample_points(points, 5);
        assert_eq!(reduced.len(), 5);
        assert_eq!(reduced[0], TimeSeriesPoint::new(1, 0.5));
        assert_eq!(reduced[4], TimeSeriesPoint::new(9, 8.5));
    }

    #[test]
    fn test_downsample_keeps_short_series() {
        let points = vec![TimeSeriesPoint::new(0, 1.0), TimeSeriesPoint::new(1, 2.0)];
        assert_eq!(downsample_points(points.clone(), 10), points);
    }

    #[test]
    fn test_field_trends_builds_three_series() {
        let rows: Vec<_> = (0..6).map(|h| row("field_1", h, 30.0)).collect();
        let refs: Vec<&LabeledRow> = rows.iter().collect();

        let trends = field_trends(&refs, 3);
        let ids: Vec<_> = trends.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["soil_moisture_pct", "air_temp_c", "humidity_pct"]);
        assert!(trends.iter().all(|t| t.points.len() == 3));
        assert_eq!(trends[0].points[0].value, 30.0);
    }
}
