//! demos/dashboard.rs
//!
//! Loads an air-quality CSV and prints every dashboard section on one page:
//! data summary, daily PM2.5 pattern and the meteorological factor correlations.
//!
//! To run this demo:
//! cargo run --example dashboard --features examples -- Dashboard/all_data.csv [--json]

use std::error::Error;

use pm25_analysis::{DashboardReport, Dataset, Variable};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| "Dashboard/all_data.csv".to_string());
    let as_json = args.any(|arg| arg == "--json");

    // 1. Load the dataset once; every section below borrows it
    let dataset = Dataset::from_csv(path).call()?;

    // 2. Compute all sections
    let report = DashboardReport::generate(&dataset, &Variable::PREDICTORS)?;

    // 3. Hand the plain data to the "presentation layer"
    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("PM2.5 pollution analysis");
        println!();
        print!("{report}");
    }

    Ok(())
}
