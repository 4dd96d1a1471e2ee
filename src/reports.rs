use crate::types::{DashboardSummary, DayRecord, RentalTotals, SeasonWeatherRow, UserTypeRow};
use crate::util::{format_number, mean};
use chrono::NaiveDate;
use std::collections::HashMap;

/// User-type identifiers as they appear in the source columns. They double as
/// the series labels in the grouped chart.
pub const CASUAL_LABEL: &str = "pengguna_kasual";
pub const REGISTERED_LABEL: &str = "pengguna_terdaftar";

/// Sum and mean of total rentals over the filtered range, or `None` when the
/// range matched no rows. Callers must treat the absent case as "no data",
/// not as zero.
pub fn rental_totals(data: &[DayRecord]) -> Option<RentalTotals> {
    if data.is_empty() {
        return None;
    }
    let total: u64 = data.iter().map(|r| r.total_rentals as u64).sum();
    let mean = total as f64 / data.len() as f64;
    Some(RentalTotals { total, mean })
}

/// Mean total rentals grouped by (season, weather condition), sorted by
/// season then weather so repeated runs print identically.
pub fn season_weather_breakdown(data: &[DayRecord]) -> Vec<SeasonWeatherRow> {
    let mut map: HashMap<(String, String), Vec<f64>> = HashMap::new();
    for r in data {
        map.entry((r.season.clone(), r.weather.clone()))
            .or_default()
            .push(r.total_rentals as f64);
    }

    let mut rows: Vec<SeasonWeatherRow> = map
        .into_iter()
        .map(|((season, weather), totals)| {
            // Groups are never empty by construction.
            let avg = mean(&totals).unwrap_or(0.0);
            SeasonWeatherRow {
                season,
                weather,
                days: totals.len(),
                avg_rentals: format_number(avg, 0),
                avg_value: avg,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        a.season
            .cmp(&b.season)
            .then_with(|| a.weather.cmp(&b.weather))
    });
    rows
}

/// Mean casual and registered rentals grouped by day type, reshaped into
/// long form: one output row per (day type, user type) pair.
pub fn user_type_breakdown(data: &[DayRecord]) -> Vec<UserTypeRow> {
    #[derive(Default)]
    struct Acc {
        casual: Vec<f64>,
        registered: Vec<f64>,
    }
    let mut map: HashMap<String, Acc> = HashMap::new();
    for r in data {
        let e = map.entry(r.day_type.clone()).or_default();
        e.casual.push(r.casual_rentals as f64);
        e.registered.push(r.registered_rentals as f64);
    }

    let mut rows: Vec<UserTypeRow> = Vec::new();
    for (day_type, acc) in map {
        for (user_type, values) in [(CASUAL_LABEL, &acc.casual), (REGISTERED_LABEL, &acc.registered)] {
            let avg = mean(values).unwrap_or(0.0);
            rows.push(UserTypeRow {
                day_type: day_type.clone(),
                user_type: user_type.to_string(),
                days: values.len(),
                avg_rentals: format_number(avg, 0),
                avg_value: avg,
            });
        }
    }
    rows.sort_by(|a, b| {
        a.day_type
            .cmp(&b.day_type)
            .then_with(|| a.user_type.cmp(&b.user_type))
    });
    rows
}

/// Machine-readable summary of the filtered range for the `--json` mode.
pub fn dashboard_summary(data: &[DayRecord], start: NaiveDate, end: NaiveDate) -> DashboardSummary {
    let totals = rental_totals(data);
    DashboardSummary {
        start,
        end,
        days: data.len(),
        total_rentals: totals.map(|t| t.total),
        mean_daily_rentals: totals.map(|t| t.mean),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_by_date;
    use crate::loader::{OFFDAY_LABEL, WORKDAY_LABEL};

    fn day(d: &str, season: &str, weather: &str, total: u32, casual: u32, day_type: &str) -> DayRecord {
        DayRecord {
            date: d.parse().unwrap(),
            season: season.to_string(),
            weather: weather.to_string(),
            total_rentals: total,
            casual_rentals: casual,
            registered_rentals: total - casual,
            day_type: day_type.to_string(),
        }
    }

    #[test]
    fn totals_of_empty_range_are_undefined() {
        assert!(rental_totals(&[]).is_none());
        assert!(season_weather_breakdown(&[]).is_empty());
        assert!(user_type_breakdown(&[]).is_empty());
    }

    #[test]
    fn totals_sum_and_average() {
        let data = vec![
            day("2021-01-01", "Musim Semi", "Cerah", 100, 40, WORKDAY_LABEL),
            day("2021-01-02", "Musim Semi", "Cerah", 300, 100, OFFDAY_LABEL),
        ];
        let t = rental_totals(&data).unwrap();
        assert_eq!(t.total, 400);
        assert_eq!(t.mean, 200.0);
    }

    #[test]
    fn season_weather_groups_are_averaged_and_ordered() {
        let data = vec![
            day("2021-01-01", "Musim Semi", "Cerah", 100, 40, WORKDAY_LABEL),
            day("2021-01-02", "Musim Semi", "Cerah", 200, 40, WORKDAY_LABEL),
            day("2021-01-03", "Musim Gugur", "Hujan Ringan", 50, 10, WORKDAY_LABEL),
        ];
        let rows = season_weather_breakdown(&data);
        assert_eq!(rows.len(), 2);
        // "Musim Gugur" sorts before "Musim Semi".
        assert_eq!(rows[0].season, "Musim Gugur");
        assert_eq!(rows[0].avg_value, 50.0);
        assert_eq!(rows[1].season, "Musim Semi");
        assert_eq!(rows[1].days, 2);
        assert_eq!(rows[1].avg_value, 150.0);
    }

    #[test]
    fn user_type_breakdown_is_long_form() {
        let data = vec![
            day("2021-01-01", "Musim Semi", "Cerah", 100, 20, WORKDAY_LABEL),
            day("2021-01-02", "Musim Semi", "Cerah", 200, 40, WORKDAY_LABEL),
            day("2021-01-03", "Musim Semi", "Cerah", 90, 60, OFFDAY_LABEL),
        ];
        let rows = user_type_breakdown(&data);
        // One row per (day type, user type) pair.
        assert_eq!(rows.len(), 4);
        let workday_casual = rows
            .iter()
            .find(|r| r.day_type == WORKDAY_LABEL && r.user_type == CASUAL_LABEL)
            .unwrap();
        assert_eq!(workday_casual.days, 2);
        assert_eq!(workday_casual.avg_value, 30.0);
        let offday_registered = rows
            .iter()
            .find(|r| r.day_type == OFFDAY_LABEL && r.user_type == REGISTERED_LABEL)
            .unwrap();
        assert_eq!(offday_registered.avg_value, 30.0);
    }

    #[test]
    fn two_day_scenario_filters_to_the_workday() {
        let data = vec![
            day("2021-01-01", "Musim Semi", "Cerah", 100, 40, WORKDAY_LABEL),
            day("2021-01-02", "Musim Semi", "Cerah", 200, 150, OFFDAY_LABEL),
        ];
        let d: NaiveDate = "2021-01-01".parse().unwrap();
        let filtered = filter_by_date(&data, d, d);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].day_type, WORKDAY_LABEL);
        let t = rental_totals(&filtered).unwrap();
        assert_eq!(t.total, 100);
        assert_eq!(t.mean, 100.0);
    }

    #[test]
    fn summary_carries_the_undefined_metrics_through() {
        let start: NaiveDate = "2021-06-01".parse().unwrap();
        let end: NaiveDate = "2021-06-30".parse().unwrap();
        let s = dashboard_summary(&[], start, end);
        assert_eq!(s.days, 0);
        assert_eq!(s.total_rentals, None);
        assert_eq!(s.mean_daily_rentals, None);
    }
}
