//! Shared plot utilities

pub mod colors;
pub mod stats;

use arrow::array::{Array, Float64Array, Int64Array, StringArray};

/// Extract a numeric arrow column as `f64`, preserving row alignment.
///
/// Null entries become NaN; non-numeric columns yield `None`.
pub fn numeric_values(array: &dyn Array) -> Option<Vec<f64>> {
    if let Some(floats) = array.as_any().downcast_ref::<Float64Array>() {
        Some(
            (0..floats.len())
                .map(|i| if floats.is_null(i) { f64::NAN } else { floats.value(i) })
                .collect(),
        )
    } else if let Some(ints) = array.as_any().downcast_ref::<Int64Array>() {
        Some(
            (0..ints.len())
                .map(|i| if ints.is_null(i) { f64::NAN } else { ints.value(i) as f64 })
                .collect(),
        )
    } else if let Some(ints) = array.as_any().downcast_ref::<arrow::array::Int32Array>() {
        Some(
            (0..ints.len())
                .map(|i| if ints.is_null(i) { f64::NAN } else { ints.value(i) as f64 })
                .collect(),
        )
    } else if let Some(floats) = array.as_any().downcast_ref::<arrow::array::Float32Array>() {
        Some(
            (0..floats.len())
                .map(|i| if floats.is_null(i) { f64::NAN } else { floats.value(i) as f64 })
                .collect(),
        )
    } else {
        None
    }
}

/// Extract the brushable feature columns from a batch, keyed by name.
///
/// The shared brush can sit on any of the core features, so linked views
/// keep all of them at hand to evaluate row visibility at draw time.
pub fn brush_columns(
    batch: &arrow::record_batch::RecordBatch,
) -> std::collections::BTreeMap<String, Vec<f64>> {
    let mut columns = std::collections::BTreeMap::new();
    for name in sv_data::CORE_FEATURES {
        if let Some(column) = batch.column_by_name(name) {
            if let Some(values) = numeric_values(column.as_ref()) {
                columns.insert(name.to_string(), values);
            }
        }
    }
    columns
}

/// Whether a row survives the active brush, given the extracted columns.
pub fn row_passes_brush(
    selection: &sv_core::SelectionContext,
    columns: &std::collections::BTreeMap<String, Vec<f64>>,
    row: usize,
) -> bool {
    let value = selection
        .brush
        .as_ref()
        .and_then(|brush| columns.get(&brush.feature))
        .and_then(|values| values.get(row).copied());
    selection.passes_brush(value)
}

/// Extract a string arrow column, with nulls as empty strings.
pub fn string_values(array: &dyn Array) -> Vec<String> {
    if let Some(strings) = array.as_any().downcast_ref::<StringArray>() {
        (0..strings.len())
            .map(|i| {
                if strings.is_null(i) {
                    String::new()
                } else {
                    strings.value(i).to_string()
                }
            })
            .collect()
    } else {
        (0..array.len())
            .map(|i| {
                arrow::util::display::array_value_to_string(array, i)
                    .unwrap_or_else(|_| String::new())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Builder, StringBuilder};

    #[test]
    fn test_numeric_values_preserves_alignment() {
        let mut builder = Float64Builder::new();
        builder.append_value(1.5);
        builder.append_null();
        builder.append_value(2.5);
        let array = builder.finish();

        let values = numeric_values(&array).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], 1.5);
        assert!(values[1].is_nan());
        assert_eq!(values[2], 2.5);
    }

    #[test]
    fn test_string_column_is_not_numeric() {
        let mut builder = StringBuilder::new();
        builder.append_value("blues");
        let array = builder.finish();
        assert!(numeric_values(&array).is_none());
        assert_eq!(string_values(&array), vec!["blues"]);
    }
}
