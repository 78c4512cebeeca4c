// Untyped feature table as handed over by callers (uploads, HTTP bodies)
use super::error::PredictionError;
use super::reading::{CATEGORICAL_FEATURES, FeatureRow, NUMERIC_FEATURES, feature_columns};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Named columns plus rows of cells. Column order is free, names are matched
/// exactly and unknown columns are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl FeatureTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn from_feature_rows(rows: &[FeatureRow]) -> Self {
        let columns = feature_columns().map(str::to_string).collect();
        let rows = rows
            .iter()
            .map(|r| {
                let mut cells: Vec<Cell> = r.numeric().into_iter().map(Cell::from).collect();
                cells.extend(r.categorical().into_iter().map(Cell::from));
                cells
            })
            .collect();
        Self { columns, rows }
    }

    /// Required feature columns absent from this table, in contract order.
    pub fn missing_columns(&self) -> Vec<String> {
        feature_columns()
            .filter(|name| !self.columns.iter().any(|c| c == name))
            .map(str::to_string)
            .collect()
    }

    /// Validates the column contract, then parses every row. A table needs
    /// at least one row.
    pub fn to_feature_rows(&self) -> Result<Vec<FeatureRow>, PredictionError> {
        let missing = self.missing_columns();
        if !missing.is_empty() {
            return Err(PredictionError::MissingColumns(missing));
        }
        if self.rows.is_empty() {
            return Err(PredictionError::Failed("no feature rows".to_string()));
        }

        // First occurrence wins if a name repeats
        let mut index: HashMap<&str, usize> = HashMap::new();
        for (i, name) in self.columns.iter().enumerate() {
            index.entry(name.as_str()).or_insert(i);
        }

        self.rows
            .iter()
            .enumerate()
            .map(|(row_idx, cells)| {
                let cell = |name: &str| -> Result<&Cell, PredictionError> {
                    cells.get(index[name]).ok_or_else(|| {
                        PredictionError::Failed(format!(
                            "row {}: no value for column `{}`",
                            row_idx, name
                        ))
                    })
                };
                let number = |name: &str| -> Result<f64, PredictionError> {
                    match cell(name)? {
                        Cell::Number(v) => Ok(*v),
                        Cell::Text(s) => s.trim().parse::<f64>().map_err(|e| {
                            PredictionError::Failed(format!(
                                "row {}: column `{}`: {:?} is not a number ({})",
                                row_idx, name, s, e
                            ))
                        }),
                    }
                };
                let text = |name: &str| -> Result<String, PredictionError> {
                    match cell(name)? {
                        Cell::Text(s) => Ok(s.clone()),
                        Cell::Number(v) => Ok(v.to_string()),
                    }
                };

                let [moisture, temp, humidity, rain, wind] = NUMERIC_FEATURES;
                let [soil, stage] = CATEGORICAL_FEATURES;
                Ok(FeatureRow {
                    soil_moisture_pct: number(moisture)?,
                    air_temp_c: number(temp)?,
                    humidity_pct: number(humidity)?,
                    rainfall_mm: number(rain)?,
                    wind_speed_ms: number(wind)?,
                    soil_type: text(soil)?,
                    crop_stage: text(stage)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reordered_columns_and_extras_are_accepted() {
        let table = FeatureTable::new(
            columns(&[
                "crop_stage",
                "note",
                "wind_speed_ms",
                "soil_type",
                "rainfall_mm",
                "humidity_pct",
                "air_temp_c",
                "soil_moisture_pct",
            ]),
            vec![vec![
                "flowering".into(),
                "ignored".into(),
                Cell::Number(7.5),
                "sandy".into(),
                "2".into(),
                Cell::Number(61.0),
                Cell::Number(24.0),
                Cell::Number(18.25),
            ]],
        );

        let rows = table.to_feature_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rainfall_mm, 2.0);
        assert_eq!(rows[0].soil_moisture_pct, 18.25);
        assert_eq!(rows[0].soil_type, "sandy");
        assert_eq!(rows[0].crop_stage, "flowering");
    }

    #[test]
    fn test_missing_columns_are_listed() {
        let table = FeatureTable::new(
            columns(&["soil_moisture_pct", "Air_Temp_C", "humidity_pct", "soil_type"]),
            vec![],
        );

        match table.to_feature_rows() {
            Err(PredictionError::MissingColumns(missing)) => assert_eq!(
                missing,
                columns(&["air_temp_c", "rainfall_mm", "wind_speed_ms", "crop_stage"])
            ),
            other => panic!("expected missing columns, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_number_fails() {
        let mut table = FeatureTable::from_feature_rows(&[FeatureRow {
            soil_moisture_pct: 30.0,
            air_temp_c: 20.0,
            humidity_pct: 50.0,
            rainfall_mm: 0.0,
            wind_speed_ms: 8.0,
            soil_type: "loam".to_string(),
            crop_stage: "vegetative".to_string(),
        }]);
        table.rows[0][3] = "heavy".into();

        let err = table.to_feature_rows().unwrap_err();
        assert!(matches!(err, PredictionError::Failed(_)));
        assert!(err.to_string().contains("rainfall_mm"));
    }

    #[test]
    fn test_table_without_rows_fails() {
        let table = FeatureTable::new(feature_columns().map(str::to_string).collect(), vec![]);

        let err = table.to_feature_rows().unwrap_err();
        assert!(matches!(err, PredictionError::Failed(_)));
        assert!(err.to_string().contains("no feature rows"));
    }

    #[test]
    fn test_short_row_fails() {
        let table = FeatureTable::new(
            feature_columns().map(str::to_string).collect(),
            vec![vec![Cell::Number(30.0)]],
        );
        assert!(matches!(
            table.to_feature_rows(),
            Err(PredictionError::Failed(_))
        ));
    }

    #[test]
    fn test_round_trip_from_feature_rows() {
        let row = FeatureRow {
            soil_moisture_pct: 12.5,
            air_temp_c: 30.1,
            humidity_pct: 40.0,
            rainfall_mm: 5.0,
            wind_speed_ms: 9.9,
            soil_type: "loam".to_string(),
            crop_stage: "vegetative".to_string(),
        };
        let table = FeatureTable::from_feature_rows(std::slice::from_ref(&row));
        assert_eq!(table.to_feature_rows().unwrap(), vec![row]);
    }
}
