// Entry point and high-level CLI flow.
//
// - Option [1] loads the brewery file and prints load diagnostics.
// - Option [2] builds the analysis report, exports CSV/JSON and previews it.
// - Option [3] prints the chart view for the current display state.
// - Option [4] picks a view mode; option [5] toggles a single section.
// After a report or chart view the user can go back to the menu or exit.
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use brewery_insights::loader::{self, LoadReport};
use brewery_insights::output;
use brewery_insights::reports::{self, BreweryAnalysis, ChartView};
use brewery_insights::util::{self, capitalize, format_pct};
use brewery_insights::{AnalyticsConfig, BreweryRecord, ChartSection, DisplayState, ViewMode};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "brewery_insights", about = "Brewery data analysis and chart views")]
struct Args {
    /// Brewery records as a JSON array or CSV file.
    #[arg(long, default_value = "breweries.json")]
    input: PathBuf,
    /// Optional JSON file overriding analysis defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory for exported report files.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

/// Session state owned by the menu loop: the loaded records and the
/// user's display choices.
struct AppState {
    args: Args,
    config: AnalyticsConfig,
    data: Option<Vec<BreweryRecord>>,
    display: DisplayState,
}

/// Next trimmed line from `input`, or `None` once input is closed or unreadable.
fn next_line(input: &mut impl BufRead) -> Option<String> {
    let mut buf = String::new();
    match input.read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Read a single line of input after printing `prompt`.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    next_line(&mut io::stdin().lock())
}

fn read_choice() -> Option<String> {
    read_line("Enter choice: ")
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N` or
/// input ended.
fn prompt_back_to_menu() -> bool {
    loop {
        let Some(answer) = read_line("Back to Menu (Y/N): ") else {
            return false;
        };
        match answer.to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn print_load_report(report: &LoadReport) {
    println!(
        "Processing dataset... ({} rows read, {} breweries loaded)",
        util::format_int(report.total_rows),
        util::format_int(report.loaded_rows)
    );
    if report.parse_errors > 0 {
        println!(
            "Note: {} rows skipped due to parse errors.",
            util::format_int(report.parse_errors)
        );
    }
    if report.missing_coordinates > 0 {
        println!(
            "Info: {} breweries have no coordinates.",
            util::format_int(report.missing_coordinates)
        );
    }
    println!();
}

/// Handle option [1]: load the record file into the session.
fn handle_load(state: &mut AppState) {
    match loader::load_records(&state.args.input) {
        Ok((data, report)) => {
            print_load_report(&report);
            state.data = Some(data);
        }
        Err(e) => {
            error!(error = %e, "load failed");
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

fn loaded(state: &AppState) -> Option<&[BreweryRecord]> {
    match &state.data {
        Some(data) => Some(data.as_slice()),
        None => {
            println!("Error: No data loaded. Please load the file first (option 1).\n");
            None
        }
    }
}

fn export(state: &AppState, analysis: &BreweryAnalysis) {
    let dir = &state.args.out_dir;
    let writes = [
        (
            "business_models.csv",
            output::write_csv(
                dir.join("business_models.csv"),
                &reports::composition_rows(&analysis.business_models, true),
            ),
        ),
        (
            "top_states.csv",
            output::write_csv(
                dir.join("top_states.csv"),
                &reports::composition_rows(&analysis.top_states, false),
            ),
        ),
        (
            "digital_by_type.csv",
            output::write_csv(
                dir.join("digital_by_type.csv"),
                &reports::digital_rows(&analysis.digital_by_type),
            ),
        ),
        (
            "analysis.json",
            output::write_json(dir.join("analysis.json"), analysis),
        ),
    ];
    for (name, result) in writes {
        if let Err(e) = result {
            error!(path = name, error = %e, "export failed");
            eprintln!("Write error ({}): {}", name, e);
        }
    }
}

/// Handle option [2]: build, export and preview the analysis report.
fn handle_generate_report(state: &AppState) {
    let Some(data) = loaded(state) else {
        return;
    };
    let analysis = match reports::analyze(data, &state.config) {
        Ok(a) => a,
        Err(e) => {
            println!("No data to analyze: {}\n", e);
            return;
        }
    };
    export(state, &analysis);

    println!("Comprehensive Data Analysis Report\n");
    println!(
        "{} breweries across {} countries and {} states/provinces. {} have websites.\n",
        util::format_int(analysis.total_breweries),
        analysis.total_countries,
        analysis.total_states,
        format_pct(analysis.website_ratio)
    );

    println!("Business Model Analysis");
    output::preview_table_rows(&reports::composition_rows(&analysis.business_models, true), 10);
    println!("International Presence (Top {})", state.config.top_countries);
    output::preview_table_rows(&reports::composition_rows(&analysis.top_countries, false), 5);
    println!("Regional Concentration (Top {})", state.config.top_states_report);
    output::preview_table_rows(&reports::composition_rows(&analysis.top_states, false), 5);
    println!(
        "Top {} regions control {} of all breweries.\n",
        state.config.clustering_states,
        format_pct(analysis.clustering_share)
    );
    println!("Digital Adoption by Business Type");
    output::preview_table_rows(&reports::digital_rows(&analysis.digital_by_type), 10);
    println!(
        "Phone availability: {}, coordinates: {}\n",
        format_pct(analysis.phone_ratio),
        format_pct(analysis.coordinates_ratio)
    );
    println!(
        "Address Completeness: {} average",
        format_pct(analysis.address_coverage)
    );
    output::preview_table_rows(&reports::completeness_rows(&analysis.field_completeness), 10);

    println!("Insights");
    for insight in &analysis.insights {
        println!("- {}: {}", insight.headline, insight.detail);
    }
    println!();
    println!(
        "(Full tables exported to {})\n",
        state.args.out_dir.display()
    );
}

fn print_chart_view(view: &ChartView) {
    println!(
        "Data Visualizations (view mode: {}, {} breweries)\n",
        view.display.mode,
        util::format_int(view.total_breweries)
    );
    if let Some(suggestions) = &view.suggestions {
        println!("Smart Filter Suggestions");
        for s in suggestions {
            println!(
                "{} {} - {} [{}={}]",
                s.icon,
                s.title,
                s.description,
                s.filter_key.as_str(),
                s.filter_value
            );
        }
        println!();
    }
    if let Some(types) = &view.type_distribution {
        println!("Brewery Types Distribution");
        for e in types {
            println!("  {:<16} {}", capitalize(&e.key), e.count);
        }
        println!();
    }
    if let Some(states) = &view.top_states {
        println!("Top States/Provinces");
        for e in states {
            println!("  {:<24} {}", e.key, e.count);
        }
        println!();
    }
    if let Some(web) = &view.website_by_type {
        println!("Digital Presence by Type ({} online)", format_pct(view.website_ratio));
        for row in web {
            println!(
                "  {:<16} {}/{} ({})",
                capitalize(&row.brewery_type),
                row.presence.matching,
                row.presence.total,
                format_pct(row.presence.ratio)
            );
        }
        println!();
    }
    if let Some(countries) = &view.country_distribution {
        println!("Global Reach");
        for e in countries {
            println!("  {:<24} {}", e.key, e.count);
        }
        println!();
    }
    if let Some(insights) = &view.insights {
        println!("Key Insights");
        for insight in insights {
            println!("- {}: {}", insight.headline, insight.detail);
        }
        println!();
    }
}

/// Handle option [3]: print the chart view for the current display state.
fn handle_chart_view(state: &AppState) {
    let Some(data) = loaded(state) else {
        return;
    };
    if data.is_empty() {
        println!("No breweries to visualize.\n");
        return;
    }
    print_chart_view(&reports::chart_view(data, &state.config, &state.display));
}

/// Handle option [4]: pick a preset view mode.
fn handle_view_mode(state: &mut AppState) {
    let names: Vec<&str> = ViewMode::ALL.iter().map(|m| m.as_str()).collect();
    let Some(input) = read_line(&format!("View mode ({}): ", names.join("/"))) else {
        return;
    };
    match input.parse::<ViewMode>() {
        Ok(mode) => {
            state.display.set_mode(mode);
            println!("View mode set to {}.\n", mode);
        }
        Err(e) => println!("{}\n", e),
    }
}

/// Handle option [5]: toggle one chart section, insights or suggestions.
fn handle_toggle(state: &mut AppState) {
    let Some(input) = read_line(
        "Toggle (business_model/geographic/digital_presence/global_reach/insights/suggestions): ",
    ) else {
        return;
    };
    match input.trim().to_ascii_lowercase().as_str() {
        "insights" => state.display.toggle_insights(),
        "suggestions" => state.display.toggle_suggestions(),
        other => match other.parse::<ChartSection>() {
            Ok(section) => state.display.toggle(section),
            Err(e) => {
                println!("{}\n", e);
                return;
            }
        },
    }
    println!("Display updated (view mode: {}).\n", state.display.mode);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => match AnalyticsConfig::from_path(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to read config {}: {}", path.display(), e);
                std::process::exit(2);
            }
        },
        None => AnalyticsConfig::default(),
    };
    let mut state = AppState {
        args,
        config,
        data: None,
        display: DisplayState::default(),
    };

    loop {
        println!("Brewery Insights");
        println!("[1] Load the file");
        println!("[2] Generate Analysis Report");
        println!("[3] Show Visualizations");
        println!("[4] Change View Mode");
        println!("[5] Toggle Section\n");
        let Some(choice) = read_choice() else {
            println!("\nExiting the program.");
            break;
        };
        match choice.as_str() {
            "1" => handle_load(&mut state),
            choice @ ("2" | "3") => {
                println!();
                if choice == "2" {
                    handle_generate_report(&state);
                } else {
                    handle_chart_view(&state);
                }
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            "4" => handle_view_mode(&mut state),
            "5" => handle_toggle(&mut state),
            _ => println!("Invalid choice. Please enter 1 to 5.\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn closed_input_yields_none() {
        assert_eq!(next_line(&mut io::empty()), None);
    }

    #[test]
    fn lines_are_trimmed_until_input_ends() {
        let mut input = Cursor::new("  2 \n\nY\n");
        assert_eq!(next_line(&mut input).as_deref(), Some("2"));
        assert_eq!(next_line(&mut input).as_deref(), Some(""));
        assert_eq!(next_line(&mut input).as_deref(), Some("Y"));
        assert_eq!(next_line(&mut input), None);
    }
}
