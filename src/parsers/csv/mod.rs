mod dto;
mod parser;

pub use dto::{ColumnMap, ColumnRole};
pub use parser::CsvParser;

pub mod prelude {
    pub use super::{ColumnMap, ColumnRole, CsvParser};
}
