mod catalog;
mod filter;
mod reader;
mod report;
mod source;

pub use catalog::ColumnCatalog;
pub use filter::{Row, RowFilter};
pub use reader::TypedColumnReader;
pub use report::{ASC_KEY, INC_KEY, MJD_KEY, PA_KEY, ReportColumns, TableReport};
pub use source::TableSource;
