//! demos/factor_explorer.rs
//!
//! The menu-driven variant of the dashboard: pick one section (`summary`, `hourly` or a
//! meteorological factor such as `WSPM`) and only that view is computed and printed.
//!
//! To run this demo:
//! cargo run --example factor_explorer --features examples -- Dashboard/all_data.csv WSPM

use std::error::Error;

use pm25_analysis::{
    correlate, correlation_table, hourly_means, parse_predictors, summarize, Dataset, Variable,
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let path = args
        .first()
        .cloned()
        .unwrap_or_else(|| "Dashboard/all_data.csv".to_string());
    let view = args.get(1).map(String::as_str).unwrap_or("summary");

    let dataset = Dataset::from_csv(path).call()?;

    match view {
        "summary" => println!("{}", summarize(&dataset)?),
        "hourly" => {
            let hourly = hourly_means(&dataset)?;
            print!("{hourly}");
            if let Some((hour, mean)) = hourly.peak() {
                println!("Peak: {hour:02}:00 at {mean:.2} µg/m³");
            }
        }
        factor => {
            let predictor = parse_predictors(&[factor])?[0];
            let result = correlate(&dataset, predictor)?;
            println!("{result}");
            if result.is_degenerate() {
                println!("{predictor} does not vary in this dataset; no trend can be fitted.");
            }

            println!();
            println!("{}", correlation_table(&dataset, &Variable::PREDICTORS)?);
        }
    }

    Ok(())
}
