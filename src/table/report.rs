use std::io::Write;
use std::path::Path;

use arrow::array::{Float32Array, Float64Array, UInt8Array};
use arrow::datatypes::{Float32Type, Float64Type, UInt8Type};
use log::{debug, info};

use crate::conf::ReportConfig;
use crate::core::PalistError;
use crate::fits::FitsTable;

use super::catalog::ColumnCatalog;
use super::filter::RowFilter;
use super::reader::TypedColumnReader;
use super::source::TableSource;

pub const PA_KEY: &str = "PA";
pub const MJD_KEY: &str = "MJD";
pub const INC_KEY: &str = "Included";
pub const ASC_KEY: &str = "ascending";

/// The decoded required columns of one table.
#[derive(Debug)]
pub struct ReportColumns {
    pub pa: Float32Array,
    pub mjd: Float64Array,
    pub included: UInt8Array,
    pub ascending: UInt8Array,
}

impl ReportColumns {
    /// Build the catalog and read every required column. Fails on the first
    /// missing or mistyped column.
    pub fn read<S: TableSource>(source: &S) -> Result<Self, PalistError> {
        let catalog = ColumnCatalog::new(source.column_names()?);
        debug!(
            "catalog has {} names for {} columns",
            catalog.len(),
            source.num_columns()
        );
        let reader = TypedColumnReader::new(source, &catalog);

        let pa = reader.read_named::<Float32Type>(PA_KEY)?;
        let mjd = reader.read_named::<Float64Type>(MJD_KEY)?;
        let included = reader.read_named::<UInt8Type>(INC_KEY)?;
        let ascending = reader.read_named::<UInt8Type>(ASC_KEY)?;

        Ok(Self {
            pa,
            mjd,
            included,
            ascending,
        })
    }

    pub fn filter(&self) -> Result<RowFilter<'_>, PalistError> {
        RowFilter::new(&self.included, &self.ascending, &self.pa, &self.mjd)
    }
}

/// Prints the included rows of the binary table in one FITS file.
pub struct TableReport {
    config: ReportConfig,
}

impl TableReport {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Write one line per included row of `path` to `out` and return the
    /// number of lines written. Nothing is written unless every required
    /// column was read.
    pub fn run(&self, path: &Path, out: &mut impl Write) -> Result<usize, PalistError> {
        let table = FitsTable::open(path, self.config.hdu)?;
        let columns = ReportColumns::read(&table)?;
        let filter = columns.filter()?;

        let mut written = 0;
        for row in filter.apply() {
            writeln!(out, "{row}")?;
            written += 1;
        }
        info!(
            "{}: {written} of {} rows included",
            path.display(),
            filter.row_count()
        );
        Ok(written)
    }
}
