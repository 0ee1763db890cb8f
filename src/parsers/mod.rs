pub mod amount;
pub mod csv;
pub mod date;
pub mod pdf;
pub mod traits;

pub mod prelude {
    pub use super::amount::parse_amount;
    pub use super::csv::prelude::*;
    pub use super::date::{StatementDate, format_date, parse_date};
    pub use super::pdf::prelude::*;
    pub use super::traits::{ParseOptions, Parser};
}
