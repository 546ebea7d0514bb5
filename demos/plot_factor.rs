//! demos/plot_factor.rs
//!
//! Draws the two dashboard charts with `plotlars`: the mean PM2.5 per hour of day, and a
//! scatter plot of PM2.5 against one meteorological factor with its fitted trend line drawn
//! over it.
//!
//! To run this demo:
//! cargo run --example plot_factor --features plotting -- Dashboard/all_data.csv TEMP

use std::error::Error;

use plotlars::{LinePlot, Plot, Rgb, ScatterPlot, Text};
use pm25_analysis::{correlate, hourly_means, Dataset, Variable};
use polars::prelude::*;

const TREND_POINTS: usize = 200;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let path = args
        .first()
        .cloned()
        .unwrap_or_else(|| "Dashboard/all_data.csv".to_string());
    let predictor: Variable = args.get(1).map(String::as_str).unwrap_or("TEMP").parse()?;

    let dataset = Dataset::from_csv(path).call()?;

    plot_hourly(&dataset)?;
    plot_factor(&dataset, predictor)?;
    println!("Plots shown in browser.");

    Ok(())
}

/// Line chart of mean PM2.5 per hour of day.
fn plot_hourly(dataset: &Dataset) -> Result<(), Box<dyn Error>> {
    let hourly = hourly_means(dataset)?;
    let hours: Vec<u32> = hourly.hours().collect();
    let means: Vec<f64> = hourly.iter().map(|(_, m)| m.mean).collect();
    let frame = df!("hour" => hours, "PM2.5" => means)?;

    LinePlot::builder()
        .data(&frame)
        .x("hour")
        .y("PM2.5")
        .color(Rgb(93, 173, 226))
        .plot_title(Text::from("Mean PM2.5 by hour of day").size(18))
        .x_title("Hour")
        .y_title("PM2.5 (µg/m³)")
        .build()
        .plot();
    Ok(())
}

/// Scatter plot of PM2.5 against `predictor` with the fitted trend overlaid as its own series.
fn plot_factor(dataset: &Dataset, predictor: Variable) -> Result<(), Box<dyn Error>> {
    let result = correlate(dataset, predictor)?;
    let (mut xs, mut ys) = dataset.paired_values(predictor, Variable::Pm25)?;
    let column = predictor.column_name();
    let mut series = vec!["Observed".to_string(); xs.len()];

    if result.is_degenerate() {
        println!("{predictor} has no variance; skipping the trend line.");
    } else {
        let (lo, hi) = xs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
                (lo.min(*x), hi.max(*x))
            });
        let label = format!("Trend, r = {:.2}", result.pearson_r);
        for step in 0..=TREND_POINTS {
            let x = lo + (hi - lo) * step as f64 / TREND_POINTS as f64;
            xs.push(x);
            ys.push(result.trend_at(x));
            series.push(label.clone());
        }
    }

    let frame = df!(column => xs, "PM2.5" => ys, "series" => series)?;
    ScatterPlot::builder()
        .data(&frame)
        .x(column)
        .y("PM2.5")
        .group("series")
        .opacity(0.6)
        .colors(vec![Rgb(255, 127, 80), Rgb(220, 20, 60)])
        .plot_title(Text::from(format!("{predictor} and PM2.5").as_str()).size(18))
        .x_title(column)
        .y_title("PM2.5 (µg/m³)")
        .build()
        .plot();
    Ok(())
}
