use std::path::Path;

use chrono::NaiveDate;
use tempomap_shared::dates;

/// The set of dates with a published GeoJSON file, discovered at startup.
///
/// Serving 404s for absent dates is the file server's job; the catalog
/// exists for the `/api/dates` listing and the startup log line.
pub struct Catalog {
    dates: Vec<NaiveDate>,
}

impl Catalog {
    /// Enumerate `<data_dir>/YYYY-MM-DD.geojson` files.
    ///
    /// Files whose stem is not a date are ignored. A missing or unreadable
    /// directory yields an empty catalog with a warning; the server still
    /// comes up.
    pub fn scan(data_dir: &Path) -> Self {
        let entries = match std::fs::read_dir(data_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    dir = %data_dir.display(),
                    error = %e,
                    "Data directory not readable, serving an empty catalog"
                );
                return Catalog { dates: Vec::new() };
            }
        };

        let mut dates = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("geojson") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some(date) = dates::parse_key(stem) {
                dates.push(date);
            }
        }
        dates.sort();

        match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => {
                tracing::info!(count = dates.len(), from = %first, to = %last, "Loaded data catalog");
            }
            _ => tracing::warn!(dir = %data_dir.display(), "No per-date data files found"),
        }

        Catalog { dates }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    /// Resource keys (`YYYY-MM-DD`), sorted ascending.
    pub fn resource_keys(&self) -> Vec<String> {
        self.dates.iter().copied().map(dates::resource_key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "{}").unwrap();
    }

    #[test]
    fn test_scan_picks_up_dated_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "2017-06-27.geojson");
        touch(dir.path(), "2017-06-26.geojson");

        let catalog = Catalog::scan(dir.path());
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.resource_keys(),
            vec!["2017-06-26".to_string(), "2017-06-27".to_string()]
        );
    }

    #[test]
    fn test_scan_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "2017-06-27.geojson");
        touch(dir.path(), "readme.txt");
        touch(dir.path(), "not-a-date.geojson");
        touch(dir.path(), "2017-06-28.json");

        let catalog = Catalog::scan(dir.path());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let catalog = Catalog::scan(&missing);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_contains() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "2017-06-27.geojson");

        let catalog = Catalog::scan(dir.path());
        let present = NaiveDate::from_ymd_opt(2017, 6, 27).unwrap();
        let absent = NaiveDate::from_ymd_opt(2017, 6, 28).unwrap();
        assert!(catalog.contains(present));
        assert!(!catalog.contains(absent));
    }
}
