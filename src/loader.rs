use crate::types::{DayRecord, RawRow};
use crate::util::{parse_date_safe, parse_i64_safe, parse_u32_safe};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use thiserror::Error;

/// Value of `hari_kerja_efektif` that marks an effective workday.
pub const WORKDAY_SENTINEL: i64 = 1;
pub const WORKDAY_LABEL: &str = "Hari Kerja";
pub const OFFDAY_LABEL: &str = "Hari Libur/Akhir Pekan";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File '{path}' not found. Place it next to the binary or pass --file.")]
    Missing { path: String },
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub parse_errors: usize,
    pub derived_day_types: usize,
    pub component_mismatches: usize,
}

/// Map the effective-workday indicator to its day-type label. Only the
/// sentinel counts as a workday; every other value is a holiday/weekend.
pub fn day_type_label(indicator: i64) -> &'static str {
    if indicator == WORKDAY_SENTINEL {
        WORKDAY_LABEL
    } else {
        OFFDAY_LABEL
    }
}

pub fn load_dataset(path: &str) -> Result<(Vec<DayRecord>, LoadReport), LoadError> {
    if !Path::new(path).exists() {
        return Err(LoadError::Missing {
            path: path.to_string(),
        });
    }

    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut report = LoadReport::default();
    let mut records: Vec<DayRecord> = Vec::new();

    for result in rdr.deserialize::<RawRow>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => { report.parse_errors += 1; continue; }
        };

        let date: NaiveDate = match parse_date_safe(row.date.as_deref()) {
            Some(d) => d,
            None => { report.parse_errors += 1; continue; }
        };
        let total_rentals = match parse_u32_safe(row.total_rentals.as_deref()) {
            Some(v) => v,
            None => { report.parse_errors += 1; continue; }
        };
        let casual_rentals = match parse_u32_safe(row.casual_rentals.as_deref()) {
            Some(v) => v,
            None => { report.parse_errors += 1; continue; }
        };
        let registered_rentals = match parse_u32_safe(row.registered_rentals.as_deref()) {
            Some(v) => v,
            None => { report.parse_errors += 1; continue; }
        };

        // The cleaned CSV may or may not carry `tipe_hari`; derive it from the
        // workday indicator when it is absent.
        let day_type = match row.day_type.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => s.to_string(),
            None => match parse_i64_safe(row.workday_indicator.as_deref()) {
                Some(ind) => {
                    report.derived_day_types += 1;
                    day_type_label(ind).to_string()
                }
                None => { report.parse_errors += 1; continue; }
            },
        };

        // Casual + registered is allowed to drift from the recorded total; the
        // source data tolerates it, so we only count it.
        if casual_rentals as u64 + registered_rentals as u64 != total_rentals as u64 {
            report.component_mismatches += 1;
        }

        let season = row.season.unwrap_or_else(|| "Unknown".to_string()).trim().to_string();
        let weather = row.weather.unwrap_or_else(|| "Unknown".to_string()).trim().to_string();

        records.push(DayRecord {
            date,
            season,
            weather,
            total_rentals,
            casual_rentals,
            registered_rentals,
            day_type,
        });
    }

    // Date is the sort key for the whole dataset.
    records.sort_by_key(|r| r.date);
    report.kept_rows = records.len();

    if report.component_mismatches > 0 {
        log::debug!(
            "{} rows where casual + registered != total",
            report.component_mismatches
        );
    }

    Ok((records, report))
}

struct CacheEntry {
    path: String,
    modified: Option<SystemTime>,
    data: Vec<DayRecord>,
    report: LoadReport,
}

/// Dataset cache keyed on the file path and its modification time, so a
/// repeated load inside one session skips re-parsing while an edited or
/// swapped file is picked up on the next request.
#[derive(Default)]
pub struct DatasetCache {
    entry: Option<CacheEntry>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Load through the cache. The final `bool` reports whether the cached
    /// parse was reused.
    pub fn load(&mut self, path: &str) -> Result<(Vec<DayRecord>, LoadReport, bool), LoadError> {
        let modified = fs::metadata(path).ok().and_then(|m| m.modified().ok());
        if let Some(e) = &self.entry {
            if e.path == path && modified.is_some() && e.modified == modified {
                log::debug!("dataset cache hit for '{}'", path);
                return Ok((e.data.clone(), e.report.clone(), true));
            }
        }

        let (data, report) = load_dataset(path)?;
        log::info!(
            "parsed {} of {} rows from '{}'",
            report.kept_rows,
            report.total_rows,
            path
        );
        self.entry = Some(CacheEntry {
            path: path.to_string(),
            modified,
            data: data.clone(),
            report: report.clone(),
        });
        Ok((data, report, false))
    }
}
