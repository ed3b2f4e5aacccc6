//! Terminal rendering of AQI results. All color choices live here.

use crate::aqi::RiskCategory;
use crate::error::Result;
use crate::models::AqiResult;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};

/// Colors a risk label the way the dashboard gauge does.
pub fn colored_risk(risk: RiskCategory) -> ColoredString {
    let label = risk.label();
    match risk {
        RiskCategory::Good => label.green().bold(),
        RiskCategory::Moderate => label.yellow().bold(),
        RiskCategory::Poor => label.truecolor(230, 126, 34).bold(),
        RiskCategory::Unhealthy => label.red().bold(),
        RiskCategory::Severe => label.magenta().bold(),
        RiskCategory::Hazardous => label.bright_red().bold().underline(),
    }
}

/// Per-pollutant table: concentration, sub-index and the dominant marker.
pub fn render_table(result: &AqiResult) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Pollutant",
        "Concentration (µg/m³)",
        "Sub-index",
        "",
    ]);

    for reading in result.readings() {
        let sub_index = result
            .sub_indices()
            .get(&reading.pollutant)
            .map(|s| format!("{:.1}", s.value))
            .unwrap_or_else(|| "-".to_string());
        let marker = if result.dominant_pollutant() == Some(reading.pollutant) {
            "dominant"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(reading.pollutant.display_name()),
            Cell::new(format!("{:.2}", reading.concentration)).set_alignment(CellAlignment::Right),
            Cell::new(sub_index).set_alignment(CellAlignment::Right),
            Cell::new(marker),
        ]);
    }
    table
}

/// Plain-text summary lines (location, index, weather, station).
pub fn render_summary(result: &AqiResult) -> Vec<String> {
    let location = result.location();
    let mut lines = vec![format!(
        "{} ({:.4}, {:.4})",
        location.name(),
        location.latitude(),
        location.longitude()
    )];

    if let Some(risk) = result.risk() {
        lines.push(format!(
            "AQI {} [{}], {}",
            result.final_index(),
            result.standard(),
            risk.label()
        ));
    } else {
        lines.push("AQI unavailable: no pollutant readings could be scored (insufficient data)".to_string());
    }

    if let Some(w) = result.weather() {
        lines.push(format!(
            "Weather: {:.1}°C, humidity {:.0}%, wind {:.1} km/h",
            w.temperature_c, w.humidity_percent, w.wind_speed_kmh
        ));
    }
    if let Some(station) = result.station() {
        let observed = result
            .observed_at()
            .map(|t| format!(" (latest reading {})", t.format("%Y-%m-%d %H:%M UTC")))
            .unwrap_or_default();
        lines.push(format!("Station: {}{}", station, observed));
    }
    lines
}

/// Prints the result to stdout with colors.
pub fn print_result(result: &AqiResult) {
    let summary = render_summary(result);
    println!("{}", summary[0].cyan().bold());
    if let Some(risk) = result.risk() {
        println!(
            "AQI {} {}",
            result.final_index().to_string().bold(),
            colored_risk(risk)
        );
    } else {
        println!("{}", summary[1].yellow());
    }
    for line in &summary[2..] {
        println!("{}", line);
    }
    if !result.readings().is_empty() {
        println!("{}", render_table(result));
    }
}

/// Pretty JSON representation of the result.
pub fn render_json(result: &AqiResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
