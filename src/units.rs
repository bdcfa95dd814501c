//! Human-readable byte counts.
//!
//! Both formatters print whole bytes below one unit and a single decimal
//! place above it. Negative counts are always below one unit, so they print
//! as plain bytes (`-5B`).

const SI_UNIT: i64 = 1000;
const IEC_UNIT: i64 = 1024;

const SI_PREFIXES: [char; 6] = ['k', 'M', 'G', 'T', 'P', 'E'];
const IEC_PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

/// Decimal units: `1500` → `"1.5kB"`.
pub fn format_si(bytes: i64) -> String {
    format_with(bytes, SI_UNIT, &SI_PREFIXES, "B")
}

/// Binary units: `1536` → `"1.5KiB"`.
pub fn format_iec(bytes: i64) -> String {
    format_with(bytes, IEC_UNIT, &IEC_PREFIXES, "iB")
}

fn format_with(bytes: i64, unit: i64, prefixes: &[char; 6], suffix: &str) -> String {
    if bytes < unit {
        return format!("{}B", bytes);
    }

    let mut div = unit;
    let mut exp = 0usize;
    let mut n = bytes / unit;
    // i64::MAX stays below unit^7, so exp never passes the last prefix.
    while n >= unit && exp + 1 < prefixes.len() {
        div *= unit;
        exp += 1;
        n /= unit;
    }

    format!("{:.1}{}{}", bytes as f64 / div as f64, prefixes[exp], suffix)
}
