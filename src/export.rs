// 📤 CSV Export - History and forecast tables for spreadsheets

use crate::record::{ForecastPoint, RealEstateRecord, YearlyDataPoint};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// `year,price`
pub fn write_history_csv<W: Write>(writer: W, history: &[YearlyDataPoint]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["year", "price"])
        .context("Failed to write history header")?;

    for point in history {
        wtr.write_record([point.year.to_string(), point.price.to_string()])
            .context("Failed to write history row")?;
    }
    wtr.flush().context("Failed to flush history CSV")?;
    Ok(())
}

/// `year,price,lower_bound,upper_bound,conservative,aggressive`
pub fn write_forecast_csv<W: Write>(writer: W, forecast: &[ForecastPoint]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "year",
        "price",
        "lower_bound",
        "upper_bound",
        "conservative",
        "aggressive",
    ])
    .context("Failed to write forecast header")?;

    for point in forecast {
        wtr.write_record([
            point.year.to_string(),
            point.price.to_string(),
            point.lower_bound.to_string(),
            point.upper_bound.to_string(),
            point.conservative.to_string(),
            point.aggressive.to_string(),
        ])
        .context("Failed to write forecast row")?;
    }
    wtr.flush().context("Failed to flush forecast CSV")?;
    Ok(())
}

/// Write both tables of a record to disk
pub fn export_record<P: AsRef<Path>, Q: AsRef<Path>>(
    record: &RealEstateRecord,
    history_path: P,
    forecast_path: Q,
) -> Result<()> {
    let history_file = File::create(history_path.as_ref())
        .with_context(|| format!("Failed to create {:?}", history_path.as_ref()))?;
    write_history_csv(history_file, &record.history)?;

    let forecast_file = File::create(forecast_path.as_ref())
        .with_context(|| format!("Failed to create {:?}", forecast_path.as_ref()))?;
    write_forecast_csv(forecast_file, &record.forecast)?;

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
