use arrow::array::PrimitiveArray;

use crate::core::PalistError;
use crate::fits::{ColumnDescriptor, FitsElement};

/// Column-level access to an open table. Positions are 1-based.
pub trait TableSource {
    fn num_rows(&self) -> usize;

    fn num_columns(&self) -> usize;

    /// Column names in position order.
    fn column_names(&self) -> Result<Vec<String>, PalistError>;

    fn descriptor(&self, position: usize) -> Result<ColumnDescriptor, PalistError>;

    /// Decode every row of the column in one pass.
    fn read_column<T: FitsElement>(&self, position: usize)
    -> Result<PrimitiveArray<T>, PalistError>;
}
