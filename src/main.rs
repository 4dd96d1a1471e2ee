// Entry point and high-level flow of the rental dashboard.
//
// Two ways in, one pipeline:
// - Interactive mode (default): a menu loop where [1] loads the CSV through
//   the dataset cache and [2] prompts for a date range and renders the
//   dashboard for it.
// - One-shot mode (--start/--end): render once for the given range and exit,
//   optionally emitting the summary metrics as JSON for scripting.
mod filter;
mod loader;
mod output;
mod reports;
mod types;
mod util;

use chrono::NaiveDate;
use clap::Parser;
use loader::DatasetCache;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use types::DayRecord;

// Simple in-memory app state so we only parse the CSV once per file version
// but can render the dashboard many times in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        cache: DatasetCache::new(),
        data: None,
    })
});

struct AppState {
    cache: DatasetCache,
    data: Option<Vec<DayRecord>>,
}

#[derive(Debug, Parser)]
#[command(
    name = "bike-dashboard",
    version,
    about = "Console dashboard over the cleaned daily bike rental dataset"
)]
struct Cli {
    /// Path to the cleaned daily rentals CSV.
    #[arg(long, default_value = "day_cleaned.csv")]
    file: String,

    /// Start of the date range (YYYY-MM-DD). With --end, renders once and exits.
    #[arg(long, requires = "end")]
    start: Option<NaiveDate>,

    /// End of the date range (YYYY-MM-DD). With --start, renders once and exits.
    #[arg(long, requires = "start")]
    end: Option<NaiveDate>,

    /// In one-shot mode, print the summary metrics as JSON instead of the dashboard.
    #[arg(long)]
    json: bool,

    /// Maximum rows to print per breakdown table.
    #[arg(long, default_value_t = 12)]
    rows: usize,
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Prompt for a date, falling back to `default` on blank input and retrying
/// on anything that is not a `YYYY-MM-DD` date.
fn prompt_date(label: &str, default: NaiveDate) -> NaiveDate {
    loop {
        print!("{} [{}]: ", label, default);
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        let s = buf.trim();
        if s.is_empty() {
            return default;
        }
        match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => return d,
            Err(_) => println!("Invalid date. Please use YYYY-MM-DD."),
        }
    }
}

/// Ask the user whether to go back to the main menu after a render.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to the menu (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        let resp = buf.trim().to_uppercase();
        match resp.as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load the CSV through the cache and print diagnostics.
///
/// On success the records are kept in `APP_STATE`; on failure the error is
/// reported and the menu stays usable.
fn handle_load(path: &str) {
    let mut state = APP_STATE.lock().unwrap();
    match state.cache.load(path) {
        Ok((data, report, cached)) => {
            if cached {
                println!("Dataset unchanged, reusing the parsed copy.");
            }
            println!(
                "Processing dataset... ({} rows read, {} daily records kept)",
                util::format_int(report.total_rows as i64),
                util::format_int(report.kept_rows as i64)
            );
            if report.parse_errors > 0 {
                println!(
                    "Note: {} rows skipped due to parse errors.",
                    util::format_int(report.parse_errors as i64)
                );
            }
            if report.derived_day_types > 0 {
                println!(
                    "Info: derived the day-type column for {} rows.",
                    util::format_int(report.derived_day_types as i64)
                );
            }
            if report.component_mismatches > 0 {
                println!(
                    "Info: {} rows where casual + registered differ from the total.",
                    util::format_int(report.component_mismatches as i64)
                );
            }
            println!();
            state.data = Some(data);
        }
        Err(e) => {
            eprintln!("Failed to load dataset: {}\n", e);
        }
    }
}

/// Handle option [2]: prompt for a range and render the dashboard over it.
fn handle_dashboard(max_rows: usize) {
    let data = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
        return;
    };
    let Some((min_date, max_date)) = filter::date_bounds(&data) else {
        println!("The loaded dataset has no usable rows.\n");
        return;
    };

    println!("Dataset covers {} to {}.", min_date, max_date);
    let start = prompt_date("Start date", min_date);
    let end = prompt_date("End date", max_date);
    println!();

    let filtered = filter::filter_by_date(&data, start, end);
    render_dashboard(&filtered, start, end, max_rows);
}

/// Render the full dashboard for an already-filtered range: metric lines,
/// both breakdowns with their charts, and the conclusions block.
fn render_dashboard(filtered: &[DayRecord], start: NaiveDate, end: NaiveDate, max_rows: usize) {
    println!("Bike Rental Dashboard");
    println!(
        "Range: {} to {} ({} days with data)\n",
        start,
        end,
        util::format_int(filtered.len() as i64)
    );

    match reports::rental_totals(filtered) {
        Some(t) => {
            println!("Total rentals:    {}", util::format_int(t.total as i64));
            println!("Average per day:  {}\n", util::format_number(t.mean, 0));
        }
        None => {
            println!("{}\n", output::NO_DATA_NOTICE);
            output::print_conclusions();
            return;
        }
    }

    let by_season_weather = reports::season_weather_breakdown(filtered);
    println!("1. Season & Weather");
    println!("Average total rentals per (season, weather) group\n");
    output::preview_table_rows(&by_season_weather, max_rows);
    let bars: Vec<(String, f64)> = by_season_weather
        .iter()
        .map(|r| (format!("{} / {}", r.season, r.weather), r.avg_value))
        .collect();
    println!("{}", output::render_bar_chart(&bars, 40));

    let by_user_type = reports::user_type_breakdown(filtered);
    println!("2. Casual vs Registered Riders");
    println!("Average rentals per user type and day type\n");
    output::preview_table_rows(&by_user_type, max_rows);
    let bars: Vec<(String, f64)> = by_user_type
        .iter()
        .map(|r| (format!("{} / {}", r.day_type, r.user_type), r.avg_value))
        .collect();
    println!("{}", output::render_bar_chart(&bars, 40));

    output::print_conclusions();
}

/// One-shot mode: load (through the cache), filter, render or dump JSON.
/// Returns the process exit code.
fn run_once(cli: &Cli, start: NaiveDate, end: NaiveDate) -> i32 {
    let loaded = {
        let mut state = APP_STATE.lock().unwrap();
        state.cache.load(&cli.file)
    };
    let (data, _, _) = match loaded {
        Ok(ok) => ok,
        Err(e) => {
            eprintln!("Failed to load dataset: {}", e);
            return 1;
        }
    };

    let filtered = filter::filter_by_date(&data, start, end);
    if cli.json {
        let summary = reports::dashboard_summary(&filtered, start, end);
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Failed to serialize summary: {}", e);
                return 1;
            }
        }
    } else {
        render_dashboard(&filtered, start, end, cli.rows);
    }
    0
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let (Some(start), Some(end)) = (cli.start, cli.end) {
        std::process::exit(run_once(&cli, start, end));
    }

    loop {
        println!("Select an option:");
        println!("[1] Load the dataset");
        println!("[2] View the dashboard\n");
        match read_choice().as_str() {
            "1" => {
                handle_load(&cli.file);
            }
            "2" => {
                println!();
                handle_dashboard(cli.rows);
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
