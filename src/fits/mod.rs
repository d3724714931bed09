//! Binary table access through CFITSIO. The library does the parsing; this
//! module only moves to the table HDU and reads whole columns out of it.

mod codes;
mod column;
mod table;

pub use codes::{BAD_COL_NUM, BAD_ELEM_NUM, BAD_HDU_NUM, END_OF_FILE, FILE_NOT_OPENED};
pub use column::{ColumnDescriptor, FitsElement, StorageType};
pub use table::FitsTable;
