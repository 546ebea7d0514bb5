use crate::types::variable::Variable;
use polars::error::PolarsError;
use polars::prelude::DataType;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirQualityError {
    #[error("Failed to read CSV file '{path}'")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Required column '{column}' not found in dataset")]
    MissingColumn { column: String },

    #[error("Column '{column}' must be numeric, found {dtype}")]
    NonNumericColumn { column: String, dtype: DataType },

    #[error("Date column must hold dates or date strings, found {dtype}")]
    InvalidDateColumn { dtype: DataType },

    #[error("Could not parse date at row {row}: {value:?}")]
    DateParse { row: usize, value: Option<String> },

    #[error("Dataset contains no rows")]
    EmptyDataset,

    #[error("Column '{column}' contains no values")]
    NoValues { column: String },

    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("{0} is the target variable and cannot be used as a predictor")]
    InvalidPredictor(Variable),

    #[error("Sample lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),
}
