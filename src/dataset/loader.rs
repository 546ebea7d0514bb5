use crate::dataset::schema::{self, COL_DATE};
use crate::dataset::Dataset;
use crate::error::AirQualityError;
use bon::bon;
use log::info;
use polars::prelude::*;
use std::path::PathBuf;

/// Cell values treated as a missing reading unless `.null_values(..)` overrides them.
pub const DEFAULT_NULL_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[bon]
impl Dataset {
    /// Loads and validates an air-quality CSV file.
    ///
    /// This method uses a builder pattern. The path is given up front; the optional
    /// settings below can be chained before `.call()` reads the file.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.separator(u8)`: Field delimiter (default: `b','`).
    /// * `.null_values(tokens)`: Cell values read as missing (default: [`DEFAULT_NULL_VALUES`],
    ///   the usual spreadsheet and pandas markers such as `NA`, `NaN`, `NULL` and the empty cell).
    /// * `.date_column(&str)`: Name of the timestamp column (default: `"date"`).
    ///
    /// # Errors
    ///
    /// * [`AirQualityError::CsvRead`] if the file cannot be opened or parsed.
    /// * [`AirQualityError::MissingColumn`] if `date` or one of the measurement columns is absent.
    /// * [`AirQualityError::NonNumericColumn`] if a measurement column holds text.
    /// * [`AirQualityError::DateParse`] if a timestamp is missing or unparseable.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pm25_analysis::{AirQualityError, Dataset};
    ///
    /// # fn main() -> Result<(), AirQualityError> {
    /// let dataset = Dataset::from_csv("Dashboard/all_data.csv").call()?;
    ///
    /// let semicolons = Dataset::from_csv("export.csv")
    ///     .separator(b';')
    ///     .null_values(["", "-"])
    ///     .date_column("timestamp")
    ///     .call()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = from_csv)]
    #[doc(hidden)]
    pub fn build_from_csv(
        #[builder(start_fn, into)] path: PathBuf,
        #[builder(default = b',')] separator: u8,
        #[builder(
            default = DEFAULT_NULL_VALUES.iter().map(|v| v.to_string()).collect(),
            with = |tokens: impl IntoIterator<Item = impl Into<String>>| {
                tokens.into_iter().map(Into::into).collect()
            }
        )]
        null_values: Vec<String>,
        #[builder(default = COL_DATE.to_string(), into)] date_column: String,
    ) -> Result<Dataset, AirQualityError> {
        info!("Loading air-quality data from {}", path.display());

        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .map_parse_options(|options| {
                options
                    .with_separator(separator)
                    .with_null_values(Some(NullValues::AllColumns(
                        null_values.iter().map(|v| v.as_str().into()).collect(),
                    )))
            })
            .try_into_reader_with_file_path(Some(path.clone()))
            .map_err(|e| AirQualityError::CsvRead {
                path: path.clone(),
                source: e,
            })?
            .finish()
            .map_err(|e| AirQualityError::CsvRead {
                path: path.clone(),
                source: e,
            })?;

        let frame = schema::normalize(frame, &date_column)?;
        info!(
            "Loaded {} rows and {} columns from {}",
            frame.height(),
            frame.width(),
            path.display()
        );
        Ok(Dataset { frame })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::variable::Variable;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "No,date,PM2.5,TEMP,RAIN,PRES,DEWP,WSPM,station";

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_keeps_extra_columns_and_parses_missing_values() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             1,2013-03-01 00:00:00,4.0,-0.7,0.0,1023.0,-18.8,4.4,Guanyuan\n\
             2,2013-03-01 01:00:00,NA,-1.1,0.0,1023.2,-18.2,4.7,Guanyuan\n\
             3,2013-03-01 02:00:00,7,-1.1,0.0,1023.5,-18.2,5.6,Guanyuan\n"
        ));

        let dataset = Dataset::from_csv(file.path()).call().unwrap();

        assert_eq!(dataset.height(), 3);
        assert_eq!(dataset.width(), 9);
        let pm25: Vec<Option<f64>> = dataset
            .values(Variable::Pm25)
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(pm25, vec![Some(4.0), None, Some(7.0)]);
    }

    #[test]
    fn test_load_with_custom_separator_and_date_column() {
        let file = write_csv(
            "timestamp;PM2.5;TEMP;RAIN;PRES;DEWP;WSPM\n\
             2016-07-04 12:00;80;30.1;0;1001;21;1.2\n\
             2016-07-04 13:00;;31.0;0;1001;21;1.5\n",
        );

        let dataset = Dataset::from_csv(file.path())
            .separator(b';')
            .null_values([""])
            .date_column("timestamp")
            .call()
            .unwrap();

        let observations = dataset.collect_observations().unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[1].hour(), 13);
        assert_eq!(observations[1].pm25, None);
        assert_eq!(observations[1].wind_speed, Some(1.5));
    }

    #[test]
    fn test_load_fails_fast_on_missing_column() {
        let file = write_csv(
            "date,PM2.5,TEMP,RAIN,PRES,DEWP\n\
             2013-03-01 00:00:00,4.0,-0.7,0.0,1023.0,-18.8\n",
        );

        let err = Dataset::from_csv(file.path()).call().unwrap_err();
        assert!(matches!(err, AirQualityError::MissingColumn { column } if column == "WSPM"));
    }

    #[test]
    fn test_load_fails_on_unparseable_date() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             1,2013-03-01 00:00:00,4.0,-0.7,0.0,1023.0,-18.8,4.4,Guanyuan\n\
             2,not a date,8.0,-1.1,0.0,1023.2,-18.2,4.7,Guanyuan\n"
        ));

        let err = Dataset::from_csv(file.path()).call().unwrap_err();
        assert!(matches!(err, AirQualityError::DateParse { row: 1, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Dataset::from_csv("/definitely/not/here.csv")
            .call()
            .unwrap_err();
        assert!(matches!(err, AirQualityError::CsvRead { .. }));
    }

    #[test]
    fn test_load_header_only_file_is_empty() {
        let file = write_csv(&format!("{HEADER}\n"));

        let dataset = Dataset::from_csv(file.path()).call().unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.width(), 9);
    }

    #[test]
    fn test_load_column_without_any_reading() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             1,2013-03-01 00:00:00,4.0,-0.7,NA,1023.0,-18.8,4.4,Guanyuan\n\
             2,2013-03-01 01:00:00,8.0,-1.1,NA,1023.2,-18.2,4.7,Guanyuan\n"
        ));

        let dataset = Dataset::from_csv(file.path()).call().unwrap();

        let rain = dataset.values(Variable::Rain).unwrap();
        assert_eq!(rain.len(), 2);
        assert_eq!(rain.null_count(), 2);
    }

    #[test]
    fn test_load_treats_common_markers_as_missing() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             1,2013-03-01 00:00:00,4.0,-0.7,0.0,1023.0,-18.8,4.4,Guanyuan\n\
             2,2013-03-01 01:00:00,NaN,-1.1,0.0,1023.2,-18.2,4.7,Guanyuan\n\
             3,2013-03-01 02:00:00,8.0,nan,0.0,N/A,-18.2,,Guanyuan\n\
             4,2013-03-01 03:00:00,NULL,-1.3,0.0,1023.9,-18.0,5.1,Guanyuan\n"
        ));

        let dataset = Dataset::from_csv(file.path()).call().unwrap();

        let pm25: Vec<Option<f64>> = dataset
            .values(Variable::Pm25)
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(pm25, vec![Some(4.0), None, Some(8.0), None]);
        assert_eq!(dataset.values(Variable::Temperature).unwrap().null_count(), 1);
        assert_eq!(dataset.values(Variable::Pressure).unwrap().null_count(), 1);
        assert_eq!(dataset.values(Variable::WindSpeed).unwrap().null_count(), 1);
    }

    #[test]
    fn test_load_with_custom_null_values_only() {
        let file = write_csv(
            "date,PM2.5,TEMP,RAIN,PRES,DEWP,WSPM\n\
             2013-03-01 00:00:00,4.0,-0.7,0.0,1023.0,-18.8,4.4\n\
             2013-03-01 01:00:00,-999,-1.1,0.0,1023.2,-18.2,4.7\n",
        );

        let dataset = Dataset::from_csv(file.path())
            .null_values(["-999"])
            .call()
            .unwrap();

        assert_eq!(dataset.values(Variable::Pm25).unwrap().null_count(), 1);
    }
}
