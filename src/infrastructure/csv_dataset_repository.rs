// CSV dataset repository implementation
use crate::application::repository::DatasetRepository;
use crate::domain::dataset::Dataset;
use crate::domain::error::DataError;
use crate::domain::label::need_liters_next_24h;
use crate::domain::reading::{
    DATASET_COLUMNS, LabeledRow, SensorReading, TARGET_COLUMN, TIMESTAMP_FORMAT,
    TIMESTAMP_PARSE_FORMAT,
};
use crate::infrastructure::{ensure_parent_dir, write_staged};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CsvDatasetRepository {
    path: PathBuf,
}

impl CsvDatasetRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetRepository for CsvDatasetRepository {
    fn save(&self, dataset: &Dataset) -> Result<(), DataError> {
        ensure_parent_dir(&self.path)?;

        write_staged(&self.path, |staging| {
            write_dataset(BufWriter::new(File::create(staging)?), dataset)
        })?;

        tracing::info!("Wrote {} with {} rows", self.path.display(), dataset.len());
        Ok(())
    }

    fn load(&self) -> Result<Dataset, DataError> {
        if !self.path.exists() {
            return Err(DataError::MissingDataFile(self.path.clone()));
        }

        let dataset = read_dataset(BufReader::new(File::open(&self.path)?))?;
        tracing::debug!(
            "Read {} rows from {}",
            dataset.len(),
            self.path.display()
        );
        Ok(dataset)
    }
}

pub fn write_dataset<W: io::Write>(writer: W, dataset: &Dataset) -> Result<(), DataError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(DATASET_COLUMNS)?;

    for row in dataset.rows() {
        let r = &row.reading;
        csv.write_record([
            r.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            r.field_id.clone(),
            r.soil_moisture_pct.to_string(),
            r.air_temp_c.to_string(),
            r.humidity_pct.to_string(),
            r.rainfall_mm.to_string(),
            r.wind_speed_ms.to_string(),
            r.soil_type.clone(),
            r.crop_stage.clone(),
            row.need_liters_next_24h.to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Reads a dataset file. Column order is free; the target column is optional
/// and derived from moisture when absent.
pub fn read_dataset<R: io::Read>(reader: R) -> Result<Dataset, DataError> {
    let mut csv = csv::Reader::from_reader(reader);
    let headers = csv.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let required = &DATASET_COLUMNS[..DATASET_COLUMNS.len() - 1];
    let missing: Vec<String> = required
        .iter()
        .copied()
        .filter(|&name| position(name).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(DataError::MissingColumns(missing));
    }

    let index: Vec<usize> = required
        .iter()
        .copied()
        .filter_map(|name| position(name))
        .collect();
    let target = position(TARGET_COLUMN);

    let mut rows = Vec::new();
    for (row, record) in csv.records().enumerate() {
        let record = record?;
        let text = |col: usize| record.get(index[col]).unwrap_or("");
        let number = |col: usize| parse_number(text(col), row, required[col]);

        let reading = SensorReading {
            timestamp: parse_timestamp(text(0), row)?,
            field_id: text(1).to_string(),
            soil_moisture_pct: number(2)?,
            air_temp_c: number(3)?,
            humidity_pct: number(4)?,
            rainfall_mm: number(5)?,
            wind_speed_ms: number(6)?,
            soil_type: text(7).to_string(),
            crop_stage: text(8).to_string(),
        };

        let need = match target {
            Some(col) => parse_number(record.get(col).unwrap_or(""), row, TARGET_COLUMN)?,
            None => need_liters_next_24h(reading.soil_moisture_pct),
        };
        rows.push(LabeledRow::new(reading, need));
    }

    // One reading per (field_id, timestamp)
    let dataset = Dataset::from_rows(rows);
    if let Some(row) = dataset.first_duplicate() {
        return Err(DataError::Malformed {
            row,
            column: "timestamp".to_string(),
            reason: format!(
                "duplicate reading for {} at {}",
                dataset.rows()[row].reading.field_id,
                dataset.rows()[row].reading.timestamp.format(TIMESTAMP_FORMAT)
            ),
        });
    }
    Ok(dataset)
}

fn parse_number(raw: &str, row: usize, column: &str) -> Result<f64, DataError> {
    raw.trim().parse::<f64>().map_err(|e| DataError::Malformed {
        row,
        column: column.to_string(),
        reason: format!("{:?} is not a number ({})", raw, e),
    })
}

fn parse_timestamp(raw: &str, row: usize) -> Result<NaiveDateTime, DataError> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_PARSE_FORMAT)
        .or_else(|_| raw.trim().parse::<NaiveDateTime>())
        .map_err(|e| DataError::Malformed {
            row,
            column: "timestamp".to_string(),
            reason: format!("{:?} is not a date-time ({})", raw, e),
        })
}
