use std::collections::HashMap;
use std::sync::LazyLock;

/// Label returned for any code not present in the table.
pub const UNKNOWN_ATTRIBUTE: &str = "Unknown Attribute";

// Several codes in the 0x29–0x3A range share a label. arcconf reports them
// that way, so they are kept as-is.
const DESCRIPTORS: &[(&str, &str)] = &[
    ("0x01", "Read Error Rate"),
    ("0x02", "Throughput Performance"),
    ("0x03", "Spin-Up Time"),
    ("0x04", "Start/Stop Count"),
    ("0x05", "Reallocated Sector Count"),
    ("0x07", "Seek Error Rate"),
    ("0x08", "Seek Time Performance"),
    ("0x09", "Power-On Hours"),
    ("0x0A", "Spin Retry Count"),
    ("0x0C", "Power Cycle Count"),
    ("0x0D", "Soft Read Error Rate"),
    ("0x0E", "Temperature"),
    ("0x10", "Hardware ECC Recovered"),
    ("0x11", "Reallocation Event Count"),
    ("0x12", "Current Pending Sector Count"),
    ("0x13", "Uncorrectable Sector Count"),
    ("0x15", "Program Fail Count"),
    ("0x16", "Erase Fail Count"),
    ("0x17", "Runtime Bad Block"),
    ("0x18", "End-to-End Error"),
    ("0x1D", "Soft ECC Correction"),
    ("0x1E", "Reported Uncorrectable Errors"),
    ("0x24", "Mechanical Hours"),
    ("0x27", "Airflow Temperature"),
    ("0x28", "Drive Temperature"),
    ("0x29", "Hardware ECC Recovered"),
    ("0x2A", "Total LBAs Written"),
    ("0x2B", "Total LBAs Read"),
    ("0x2C", "Total LBAs Written Expanded"),
    ("0x2D", "Total LBAs Read Expanded"),
    ("0x2E", "Data Units Read"),
    ("0x2F", "Data Units Written"),
    ("0x30", "Head Flying Hours"),
    ("0x31", "Total LBAs Written Expanded"),
    ("0x32", "Total LBAs Read Expanded"),
    ("0x33", "Total LBAs Read Expanded"),
    ("0x34", "Total LBAs Written Expanded"),
    ("0x35", "Total LBAs Read Expanded"),
    ("0x36", "Total LBAs Written Expanded"),
    ("0x37", "Total LBAs Read Expanded"),
    ("0x38", "Total LBAs Written Expanded"),
    ("0x39", "Total LBAs Read Expanded"),
    ("0x3A", "Total LBAs Written Expanded"),
];

static TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| DESCRIPTORS.iter().copied().collect());

/// Human-readable name for a SMART attribute code such as `0x05`.
///
/// Never fails: codes missing from the table, including ones written with
/// lowercase hex digits that still don't match, resolve to
/// [`UNKNOWN_ATTRIBUTE`].
pub fn describe(code: &str) -> &'static str {
    if let Some(name) = TABLE.get(code).copied() {
        return name;
    }
    // arcconf has been seen emitting "0x0a" as well as "0x0A"
    let canonical = match code.strip_prefix("0x").or_else(|| code.strip_prefix("0X")) {
        Some(hex) => format!("0x{}", hex.to_ascii_uppercase()),
        None      => return UNKNOWN_ATTRIBUTE,
    };
    TABLE.get(canonical.as_str()).copied().unwrap_or(UNKNOWN_ATTRIBUTE)
}

/// Number of codes with a known descriptor.
pub fn known_count() -> usize {
    TABLE.len()
}
