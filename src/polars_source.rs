#![cfg(feature = "polars")]

use crate::data_types::{ColumnMap, QueryableTable};
use crate::error::{Error, Result};
use polars::prelude::*;

fn table_error(err: PolarsError) -> Error {
    Error::Table(err.to_string())
}

impl QueryableTable for DataFrame {
    fn select_columns(&self, columns: &[&str]) -> Result<ColumnMap> {
        let mut selected = ColumnMap::with_capacity(columns.len());
        for name in columns {
            let column = self
                .column(name)
                .map_err(|_| Error::MissingColumn(name.to_string()))?;
            // cast() is lenient and would turn text into nulls
            if !column.dtype().is_primitive_numeric() {
                return Err(Error::Table(format!(
                    "column `{name}` has non-numeric type {}",
                    column.dtype()
                )));
            }
            let series = column
                .as_materialized_series()
                .cast(&DataType::Float64)
                .map_err(table_error)?;
            let values = series.f64().map_err(table_error)?;

            // Fast path when the column is one chunk with no nulls.
            let data: Vec<f64> = match values.cont_slice() {
                Ok(s) => s.to_vec(),
                Err(_) => values
                    .into_iter()
                    .map(|v| v.unwrap_or(f64::NAN))
                    .collect(),
            };
            selected.insert(name.to_string(), data);
        }
        Ok(selected)
    }
}
