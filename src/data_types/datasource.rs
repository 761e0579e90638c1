use crate::error::{Error, Result};
use std::borrow::Cow;
use std::collections::HashMap;

/// Field name to column values.
pub type ColumnMap = HashMap<String, Vec<f64>>;

/// Trait for tabular backends that can hand out numeric columns by name.
pub trait QueryableTable: Send + Sync {
    /// Returns the requested columns as `f64`. Missing values become NaN.
    /// Asking for a column the table does not have is an error.
    fn select_columns(&self, columns: &[&str]) -> Result<ColumnMap>;
}

/// Raw data handed to the downsampler: either plain columns or a table
/// to query.
#[derive(Clone, Copy)]
pub enum RawData<'a> {
    Columns(&'a ColumnMap),
    Table(&'a dyn QueryableTable),
}

impl<'a> RawData<'a> {
    /// Pulls the X and Y coordinate columns. Plain columns are borrowed,
    /// table columns are materialized.
    pub fn xy_columns(&self, x: &str, y: &str) -> Result<(Cow<'a, [f64]>, Cow<'a, [f64]>)> {
        let (xs, ys) = match *self {
            RawData::Columns(map) => (
                Cow::Borrowed(column(map, x)?),
                Cow::Borrowed(column(map, y)?),
            ),
            RawData::Table(table) => {
                let names = if x == y { vec![x] } else { vec![x, y] };
                let mut selected = table.select_columns(&names)?;
                let xs = take_column(&mut selected, x)?;
                let ys = if x == y {
                    xs.clone()
                } else {
                    take_column(&mut selected, y)?
                };
                (Cow::Owned(xs), Cow::Owned(ys))
            }
        };

        if xs.len() != ys.len() {
            return Err(Error::ColumnLengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        Ok((xs, ys))
    }
}

impl<'a> From<&'a ColumnMap> for RawData<'a> {
    fn from(map: &'a ColumnMap) -> Self {
        RawData::Columns(map)
    }
}

fn column<'m>(map: &'m ColumnMap, name: &str) -> Result<&'m [f64]> {
    map.get(name)
        .map(Vec::as_slice)
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}

fn take_column(map: &mut ColumnMap, name: &str) -> Result<Vec<f64>> {
    map.remove(name)
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}
