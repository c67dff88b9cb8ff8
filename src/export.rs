//! CSV export of hourly series

use std::io;

use tracing::warn;

use crate::Result;
use crate::models::HourlySeries;

pub const CSV_HEADER: [&str; 5] = ["time", "temperature_C", "precip_mm", "humidity_%", "wind_m_s"];

/// Download file name for a city, e.g. `New_Delhi_weather.csv`
#[must_use]
pub fn csv_file_name(city: &str) -> String {
    let stem: String = city
        .trim()
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | '\\' | '/'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    format!("{stem}_weather.csv")
}

/// `Content-Disposition` value for the download.
///
/// Header values must be ASCII, so non-ASCII names get an underscored
/// fallback plus the exact name as RFC 5987 `filename*`.
#[must_use]
pub fn content_disposition(city: &str) -> String {
    let file_name = csv_file_name(city);
    if file_name.is_ascii() {
        return format!("attachment; filename=\"{file_name}\"");
    }
    let fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(&file_name)
    )
}

/// Serialize the series as a CSV table, one row per hour
pub fn series_to_csv(series: &HourlySeries) -> Result<Vec<u8>> {
    if !series.is_aligned() {
        warn!("Exporting misaligned hourly arrays, missing cells left empty");
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER).map_err(io::Error::from)?;

    for hour in 0..series.len() {
        writer.write_record([
            series.times.get(hour).cloned().unwrap_or_default(),
            cell(&series.temperature, hour),
            cell(&series.precipitation, hour),
            cell(&series.humidity, hour),
            cell(&series.wind_speed, hour),
        ])
        .map_err(io::Error::from)?;
    }

    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

/// Floats always keep a fractional part, `31.0` rather than `31`
fn cell(values: &[f64], hour: usize) -> String {
    values
        .get(hour)
        .map(|value| format!("{value:?}"))
        .unwrap_or_default()
}
