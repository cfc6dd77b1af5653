//! Line scanner that pulls known label/value pairs out of a free-text
//! End Visit Report.
//!
//! A report is one logical record per line, e.g. `Serial#: ABC123`. The
//! scanner tests each line against the known-label table and splits at the
//! first `:`. Scanning an in-memory line sequence cannot fail; an empty
//! result is a valid outcome.

use std::path::Path;

use regex::RegexSet;
use serde::Serialize;

use super::labels::{label_set, DEVICE_TYPE_LABEL};
use super::ExtractionError;

/// A single extracted field, already normalized into attribute form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportField {
    /// Attribute name: `#` marker replaced, spaces removed, duplicate
    /// `Device Type` renamed to `DeviceType2`.
    pub name: String,
    /// Trimmed text following the first `:` on the matched line.
    pub value: String,
}

/// Scans report lines for the known labels.
pub struct ReportScanner {
    labels: RegexSet,
}

impl Default for ReportScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportScanner {
    pub fn new() -> Self {
        Self {
            labels: label_set(),
        }
    }

    /// Read a report file and scan it. A missing or unreadable file is an
    /// error; the scan itself is infallible.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<ReportField>, ExtractionError> {
        let text =
            std::fs::read_to_string(path).map_err(|source| ExtractionError::UnreadableReport {
                path: path.to_path_buf(),
                source,
            })?;

        let fields = self.scan_lines(text.lines());
        tracing::info!(
            report = %path.display(),
            fields = fields.len(),
            "End Visit Report scanned"
        );
        Ok(fields)
    }

    /// Scan a sequence of lines, preserving first-match order.
    ///
    /// A line containing several label substrings emits one field per
    /// matched label. The second line whose label contains `Device Type`
    /// is stored as `DeviceType2` so both values survive into the merged
    /// document (rename, not overwrite).
    pub fn scan_lines<'a>(&self, lines: impl Iterator<Item = &'a str>) -> Vec<ReportField> {
        let mut fields = Vec::new();
        let mut device_type_count = 0u32;

        for line in lines {
            for _match in self.labels.matches(line).iter() {
                let Some((left, right)) = line.split_once(':') else {
                    continue;
                };

                // "Serial#" carries a disambiguating marker in the report
                // format; the attribute is plain "Serial".
                let mut name = left.replace("Serial#", "Serial");

                if name.contains(DEVICE_TYPE_LABEL) {
                    device_type_count += 1;
                    if device_type_count == 2 {
                        name.push('2');
                    }
                }

                fields.push(ReportField {
                    name: name.replace(' ', ""),
                    value: right.trim().to_string(),
                });
            }
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<ReportField> {
        ReportScanner::new().scan_lines(text.lines())
    }

    fn field(name: &str, value: &str) -> ReportField {
        ReportField {
            name: name.into(),
            value: value.into(),
        }
    }

    #[test]
    fn single_label_yields_one_field() {
        let fields = scan("Logger Model: FTS H2\n");
        assert_eq!(fields, vec![field("LoggerModel", "FTS H2")]);
    }

    #[test]
    fn value_is_trimmed() {
        let fields = scan("Standard:   CGVD28   ");
        assert_eq!(fields, vec![field("Standard", "CGVD28")]);
    }

    #[test]
    fn hash_marker_is_normalized() {
        let fields = scan("Serial#: ABC123");
        assert_eq!(fields, vec![field("Serial", "ABC123")]);
    }

    #[test]
    fn spaces_are_removed_from_names() {
        let fields = scan("Antenna Bearing: 273");
        assert_eq!(fields, vec![field("AntennaBearing", "273")]);
    }

    #[test]
    fn second_device_type_is_renamed_not_overwritten() {
        let fields = scan("Device Type: Receiver\nDevice Type: Antenna\n");
        assert_eq!(
            fields,
            vec![field("DeviceType", "Receiver"), field("DeviceType2", "Antenna")]
        );
    }

    #[test]
    fn split_is_at_first_colon() {
        let fields = scan("SW Ver: 2.1:beta");
        assert_eq!(fields, vec![field("SWVer", "2.1:beta")]);
    }

    #[test]
    fn no_matches_is_a_valid_empty_result() {
        assert!(scan("just a note about site access\n\n").is_empty());
    }

    #[test]
    fn unknown_labels_are_ignored() {
        let fields = scan("Visited By: O. Bedard\nOS Version: 8.12");
        assert_eq!(fields, vec![field("OSVersion", "8.12")]);
    }

    #[test]
    fn one_line_can_match_multiple_labels() {
        // Both labels occur in the line; each match splits the same line
        // at the first colon and emits independently.
        let fields = scan("Logger Model: H2 with Logger Version: 4");
        assert_eq!(
            fields,
            vec![
                field("LoggerModel", "H2 with Logger Version: 4"),
                field("LoggerModel", "H2 with Logger Version: 4"),
            ]
        );
    }

    #[test]
    fn label_anywhere_in_line_matches() {
        let fields = scan("note Standard: CGVD28");
        assert_eq!(fields, vec![field("noteStandard", "CGVD28")]);
    }

    #[test]
    fn extraction_order_is_first_seen() {
        let text = "Device Type: Receiver\nSerial#: ABC\nDevice Type: Antenna";
        let fields = scan(text);
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["DeviceType", "Serial", "DeviceType2"]);
    }

    #[test]
    fn scan_file_missing_report_is_an_error() {
        let scanner = ReportScanner::new();
        let err = scanner
            .scan_file(Path::new("/nonexistent/evr.txt"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnreadableReport { .. }));
    }

    #[test]
    fn scan_file_reads_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evr.txt");
        std::fs::write(&path, "Serial Number: 0042\n").unwrap();

        let fields = ReportScanner::new().scan_file(&path).unwrap();
        assert_eq!(fields, vec![field("SerialNumber", "0042")]);
    }
}
