use crate::types::DayRecord;
use chrono::NaiveDate;

/// Rows whose date falls inside the inclusive `[start, end]` interval.
///
/// The base dataset is never touched; the result is a fresh collection. A
/// reversed interval (`start > end`) simply matches nothing, which downstream
/// code treats as the ordinary empty case.
pub fn filter_by_date(data: &[DayRecord], start: NaiveDate, end: NaiveDate) -> Vec<DayRecord> {
    data.iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect()
}

/// Min and max dates of the dataset, used to bound the range prompt.
pub fn date_bounds(data: &[DayRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let min = data.iter().map(|r| r.date).min()?;
    let max = data.iter().map(|r| r.date).max()?;
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: &str, total: u32) -> DayRecord {
        DayRecord {
            date: d.parse().unwrap(),
            season: "Musim Semi".to_string(),
            weather: "Cerah".to_string(),
            total_rentals: total,
            casual_rentals: total / 2,
            registered_rentals: total - total / 2,
            day_type: "Hari Kerja".to_string(),
        }
    }

    fn sample() -> Vec<DayRecord> {
        vec![
            day("2021-01-01", 100),
            day("2021-01-02", 200),
            day("2021-01-03", 300),
        ]
    }

    #[test]
    fn single_day_interval_returns_exactly_that_day() {
        let data = sample();
        let d: NaiveDate = "2021-01-02".parse().unwrap();
        let out = filter_by_date(&data, d, d);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, d);
    }

    #[test]
    fn reversed_interval_is_empty() {
        let data = sample();
        let out = filter_by_date(
            &data,
            "2021-01-03".parse().unwrap(),
            "2021-01-01".parse().unwrap(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn full_range_keeps_every_row() {
        let data = sample();
        let (min, max) = date_bounds(&data).unwrap();
        let out = filter_by_date(&data, min, max);
        assert_eq!(out.len(), data.len());
    }

    #[test]
    fn bounds_of_empty_dataset_are_absent() {
        assert_eq!(date_bounds(&[]), None);
    }
}
