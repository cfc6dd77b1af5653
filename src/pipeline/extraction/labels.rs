//! The fixed set of End Visit Report labels the scanner searches for.

use regex::RegexSet;

/// Known report labels, in scan order. Matching is substring-based for
/// compatibility with the report formats in the field — a label anywhere
/// in a line counts, so labels here must be distinctive enough to avoid
/// accidental hits in free text.
pub const KNOWN_LABELS: [&str; 11] = [
    "Logger Model:",
    "Logger Version:",
    "Serial Number:",
    "OS Version:",
    "Software Version:",
    "Serial#:",
    "SW Ver:",
    "Device Type:",
    "Standard:",
    "Antenna Bearing:",
    "Antenna Inclination:",
];

/// Label subject to the duplicate-occurrence rename rule. Sensor reports
/// routinely list two devices (e.g. receiver and antenna), and a merged
/// document cannot carry the same attribute twice.
pub const DEVICE_TYPE_LABEL: &str = "Device Type";

/// Build the matcher for the known-label table. Patterns are escaped
/// literals, so substring semantics are preserved exactly.
pub fn label_set() -> RegexSet {
    RegexSet::new(KNOWN_LABELS.iter().map(|label| regex::escape(label)))
        .expect("known-label table is a valid pattern set")
}
