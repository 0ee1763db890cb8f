mod parser;

pub use parser::PdfParser;

pub mod prelude {
    pub use super::PdfParser;
}
