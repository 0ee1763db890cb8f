use std::fs;

use chrono::{Local, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    categories::CategoryRules,
    errors::StatementParseError,
    parsers::prelude::*,
    types::Statement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    /// Text already extracted from a PDF statement
    #[serde(rename = "pdf")]
    Pdf,
    #[serde(rename = "csv")]
    Csv,
}

impl FileFormat {
    fn parse(&self, content: &str, options: &ParseOptions) -> Result<Statement, StatementParseError> {
        match self {
            FileFormat::Pdf => PdfParser::parse(content, options),
            FileFormat::Csv => CsvParser::parse(content, options),
        }
    }

    /// MIME type first, then file extension.
    pub fn detect(mime_type: Option<&str>, filename: Option<&str>) -> Result<Self, StatementParseError> {
        if let Some(mime_type) = mime_type {
            if PdfParser::supports_mime(mime_type) {
                return Ok(FileFormat::Pdf);
            }
            if CsvParser::supports_mime(mime_type) {
                return Ok(FileFormat::Csv);
            }
        }

        if let Some(filename) = filename {
            if PdfParser::supports_extension(filename) {
                return Ok(FileFormat::Pdf);
            }
            if CsvParser::supports_extension(filename) {
                return Ok(FileFormat::Csv);
            }
        }

        Err(StatementParseError::UnsupportedFormat)
    }
}

#[derive(Default)]
pub struct ParserBuilder {
    content: Option<String>,
    filepath: Option<String>,
    mime_type: Option<String>,
    format: Option<FileFormat>,
    rules: Option<CategoryRules>,
    reference_date: Option<NaiveDate>,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn mime_type(mut self, mime_type: &str) -> Self {
        self.mime_type = Some(mime_type.to_string());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn rules(mut self, rules: CategoryRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Day used for the current-month fallback; defaults to today (local time).
    pub fn reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn parse(self) -> Result<Statement, StatementParseError> {
        let format = self.format
            .map(Ok)
            .unwrap_or_else(|| FileFormat::detect(
                self.mime_type.as_deref(),
                self.filepath.as_deref(),
            ))?;
        debug!("Parsing statement as {:?}", format);

        let content = self.content
            .map(Ok)
            .unwrap_or_else(|| {
                self.filepath
                    .ok_or(StatementParseError::MissingContentAndFilepath)
                    .and_then(|path| fs::read_to_string(path).map_err(Into::into))
            })?;

        let options = ParseOptions::new(
            self.rules.unwrap_or_default(),
            self.reference_date.unwrap_or_else(|| Local::now().date_naive()),
        );

        format.parse(&content, &options)
    }
}
