use arrow::array::PrimitiveArray;
use log::debug;

use crate::core::PalistError;
use crate::fits::FitsElement;

use super::catalog::ColumnCatalog;
use super::source::TableSource;

/// Reads whole columns from a table source, refusing any column whose
/// declared storage type differs from the requested element type.
pub struct TypedColumnReader<'a, S: TableSource> {
    source: &'a S,
    catalog: &'a ColumnCatalog,
}

impl<'a, S: TableSource> TypedColumnReader<'a, S> {
    pub fn new(source: &'a S, catalog: &'a ColumnCatalog) -> Self {
        Self { source, catalog }
    }

    /// Check the declared type of column `position` against `T`, then
    /// decode all of its rows.
    pub fn read<T: FitsElement>(&self, position: usize) -> Result<PrimitiveArray<T>, PalistError> {
        let descriptor = self.source.descriptor(position)?;
        if descriptor.storage != T::STORAGE {
            return Err(PalistError::TypeMismatch {
                column: self.catalog.name(position).unwrap_or_default().to_string(),
                position,
                expected: T::STORAGE,
                actual: descriptor.storage,
            });
        }

        let values = self.source.read_column::<T>(position)?;
        debug!(
            "read {} {} values from column {position}",
            values.len(),
            T::STORAGE
        );
        Ok(values)
    }

    /// Resolve `name` in the catalog and read that column.
    pub fn read_named<T: FitsElement>(&self, name: &str) -> Result<PrimitiveArray<T>, PalistError> {
        let position = self.catalog.resolve(name)?;
        self.read(position)
    }
}
