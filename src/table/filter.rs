use std::fmt;

use arrow::array::{Array, Float32Array, Float64Array, UInt8Array};

use crate::core::PalistError;

/// One output row. Formats as `<ascending> <PA:%12.2f> <MJD:%12.2f>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    pub ascending: u8,
    pub pa: f32,
    pub mjd: f64,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.ascending)?;
        write_fixed(f, f64::from(self.pa))?;
        f.write_str(" ")?;
        write_fixed(f, self.mjd)
    }
}

/// `%12.2f`. NaN is spelled the way C's printf spells it.
fn write_fixed(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        let text = if value.is_sign_negative() { "-nan" } else { "nan" };
        write!(f, "{text:>12}")
    } else {
        write!(f, "{value:12.2}")
    }
}

/// Selects the rows whose `include` flag is nonzero, in table order.
#[derive(Debug, Clone, Copy)]
pub struct RowFilter<'a> {
    include: &'a UInt8Array,
    ascending: &'a UInt8Array,
    pa: &'a Float32Array,
    mjd: &'a Float64Array,
}

impl<'a> RowFilter<'a> {
    pub fn new(
        include: &'a UInt8Array,
        ascending: &'a UInt8Array,
        pa: &'a Float32Array,
        mjd: &'a Float64Array,
    ) -> Result<Self, PalistError> {
        let rows = include.len();
        if ascending.len() != rows || pa.len() != rows || mjd.len() != rows {
            return Err(PalistError::RowCountMismatch(format!(
                "include {rows}, ascending {}, PA {}, MJD {}",
                ascending.len(),
                pa.len(),
                mjd.len()
            )));
        }
        Ok(Self {
            include,
            ascending,
            pa,
            mjd,
        })
    }

    pub fn row_count(&self) -> usize {
        self.include.len()
    }

    /// Lazily yield the included rows. Each call starts over from row 0.
    pub fn apply(&self) -> impl Iterator<Item = Row> + 'a {
        let Self {
            include,
            ascending,
            pa,
            mjd,
        } = *self;
        include
            .values()
            .iter()
            .enumerate()
            .filter(|(_, flag)| **flag != 0)
            .map(move |(idx, _)| Row {
                ascending: ascending.value(idx),
                pa: pa.value(idx),
                mjd: mjd.value(idx),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrays(include: Vec<u8>) -> (UInt8Array, UInt8Array, Float32Array, Float64Array) {
        let n = include.len();
        (
            UInt8Array::from(include),
            UInt8Array::from_iter_values((0..n).map(|i| (i % 2) as u8)),
            Float32Array::from_iter_values((0..n).map(|i| i as f32 * 10.0)),
            Float64Array::from_iter_values((0..n).map(|i| i as f64 + 0.5)),
        )
    }

    #[test]
    fn test_keeps_included_rows_in_order() {
        let include = vec![0, 1, 1, 0, 255, 0, 1];
        let (inc, asc, pa, mjd) = arrays(include.clone());
        let filter = RowFilter::new(&inc, &asc, &pa, &mjd).unwrap();

        let rows: Vec<Row> = filter.apply().collect();
        let expected_idx: Vec<usize> = include
            .iter()
            .enumerate()
            .filter(|(_, f)| **f != 0)
            .map(|(i, _)| i)
            .collect();

        assert_eq!(rows.len(), expected_idx.len());
        for (row, idx) in rows.iter().zip(expected_idx) {
            assert_eq!(row.ascending, asc.value(idx));
            assert_eq!(row.pa, pa.value(idx));
            assert_eq!(row.mjd, mjd.value(idx));
        }
    }

    #[test]
    fn test_apply_is_repeatable() {
        let (inc, asc, pa, mjd) = arrays(vec![1, 0, 1, 1]);
        let filter = RowFilter::new(&inc, &asc, &pa, &mjd).unwrap();

        let first: Vec<Row> = filter.apply().collect();
        let second: Vec<Row> = filter.apply().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(filter.row_count(), 4);
    }

    #[test]
    fn test_no_rows_included() {
        let (inc, asc, pa, mjd) = arrays(vec![0, 0, 0]);
        let filter = RowFilter::new(&inc, &asc, &pa, &mjd).unwrap();
        assert_eq!(filter.apply().count(), 0);

        let (inc, asc, pa, mjd) = arrays(Vec::new());
        let filter = RowFilter::new(&inc, &asc, &pa, &mjd).unwrap();
        assert_eq!(filter.apply().count(), 0);
    }

    #[test]
    fn test_row_count_mismatch() {
        let (inc, asc, pa, _) = arrays(vec![1, 1]);
        let mjd = Float64Array::from(vec![1.0]);
        let err = RowFilter::new(&inc, &asc, &pa, &mjd).unwrap_err();
        assert!(matches!(err, PalistError::RowCountMismatch(_)));
    }

    #[test]
    fn test_row_format() {
        let row = Row {
            ascending: 1,
            pa: 10.0,
            mjd: 100.5,
        };
        assert_eq!(row.to_string(), "1        10.00       100.50");

        let wide = Row {
            ascending: 0,
            pa: -123456789.0,
            mjd: 59000.1,
        };
        assert_eq!(wide.to_string(), "0 -123456792.00     59000.10");
    }

    #[test]
    fn test_non_finite_values_format_like_printf() {
        let nan = Row {
            ascending: 1,
            pa: f32::NAN,
            mjd: -f64::NAN,
        };
        assert_eq!(nan.to_string(), "1          nan         -nan");

        let inf = Row {
            ascending: 0,
            pa: f32::NEG_INFINITY,
            mjd: f64::INFINITY,
        };
        assert_eq!(inf.to_string(), "0         -inf          inf");
    }
}
