use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One CSV row exactly as it appears in `day_cleaned.csv`. Everything is kept
/// as an optional string so the loader can decide what is salvageable.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "tanggal")]
    pub date: Option<String>,
    #[serde(rename = "musim")]
    pub season: Option<String>,
    #[serde(rename = "kondisi_cuaca")]
    pub weather: Option<String>,
    #[serde(rename = "total_peminjaman")]
    pub total_rentals: Option<String>,
    #[serde(rename = "pengguna_kasual")]
    pub casual_rentals: Option<String>,
    #[serde(rename = "pengguna_terdaftar")]
    pub registered_rentals: Option<String>,
    #[serde(rename = "hari_kerja_efektif")]
    pub workday_indicator: Option<String>,
    #[serde(rename = "tipe_hari", default)]
    pub day_type: Option<String>,
}

/// One calendar day of rental activity after cleaning. Immutable once loaded;
/// `day_type` is the only derived column.
#[derive(Debug, Clone)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub season: String,
    pub weather: String,
    pub total_rentals: u32,
    pub casual_rentals: u32,
    pub registered_rentals: u32,
    pub day_type: String,
}

#[derive(Debug, Clone, Tabled)]
pub struct SeasonWeatherRow {
    #[tabled(rename = "Season")]
    pub season: String,
    #[tabled(rename = "Weather")]
    pub weather: String,
    #[tabled(rename = "Days")]
    pub days: usize,
    #[tabled(rename = "AvgRentals")]
    pub avg_rentals: String,
    #[tabled(skip)]
    pub avg_value: f64,
}

/// Long-form row of the user-type breakdown: one row per
/// (day type, user type) pair, ready for grouped-bar display.
#[derive(Debug, Clone, Tabled)]
pub struct UserTypeRow {
    #[tabled(rename = "DayType")]
    pub day_type: String,
    #[tabled(rename = "UserType")]
    pub user_type: String,
    #[tabled(rename = "Days")]
    pub days: usize,
    #[tabled(rename = "AvgRentals")]
    pub avg_rentals: String,
    #[tabled(skip)]
    pub avg_value: f64,
}

/// Headline metrics over a filtered range. Absent entirely when the range
/// matched no rows, so callers cannot mistake "no data" for zero.
#[derive(Debug, Clone, Copy)]
pub struct RentalTotals {
    pub total: u64,
    pub mean: f64,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: usize,
    pub total_rentals: Option<u64>,
    pub mean_daily_rentals: Option<f64>,
}
