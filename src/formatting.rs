use std::io;

use failure::Error;
use handlebars::{no_escape, Handlebars};
use serde::Serialize;
use serde_json::Value;

use crate::loader::record_date;

mod helpers {
    handlebars_helper!(header: |v: str| format!("{}\n{}", v, str::repeat("=", v.chars().count())));
}

/// The template engine used for every plaintext rendering. `{{header "X"}}` underlines X.
pub(crate) fn handlebars() -> Handlebars {
    let mut handlebars = Handlebars::new();
    handlebars.register_helper("header", Box::new(helpers::header));
    handlebars.register_escape_fn(no_escape);
    handlebars.set_strict_mode(true);
    handlebars
}

/// Write `rows` as csv to `out`, with a header row taken from the row type's field names.
/// Returns how many rows were written.
pub fn write_csv<W, R, I>(out: W, rows: I) -> Result<usize, Error>
where
    W: io::Write,
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut writer = csv::Writer::from_writer(out);
    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Shown wherever the backend left a value out.
pub const MISSING: &str = "Sin datos";

/// The text of an optional string, or `MISSING` if it's absent or blank.
/// ```rust
/// # use inventario::formatting::or_missing;
/// assert_eq!(or_missing(Some("TI")), "TI".to_string());
/// assert_eq!(or_missing(Some("  ")), "Sin datos".to_string());
/// assert_eq!(or_missing(None), "Sin datos".to_string());
/// ```
pub fn or_missing(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

/// Render a loosely typed json scalar. Numbers and strings come back as text, anything else
/// (null, an empty string, objects) as `None`.
/// ```rust
/// # #[macro_use] extern crate serde_json;
/// # use inventario::formatting::value_text;
/// # fn main() {
/// assert_eq!(value_text(&json!(16)), Some("16".to_string()));
/// assert_eq!(value_text(&json!("2.4 GHz")), Some("2.4 GHz".to_string()));
/// assert_eq!(value_text(&json!(null)), None);
/// # }
/// ```
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A date from the backend as `dd-mm-yyyy`.
/// ```rust
/// # use inventario::formatting::display_date;
/// assert_eq!(display_date(Some("2024-03-05T00:00:00")), "05-03-2024".to_string());
/// assert_eq!(display_date(None), "Sin datos".to_string());
/// ```
pub fn display_date(raw: Option<&str>) -> String {
    raw.and_then(record_date)
        .map(|date| date.format("%d-%m-%Y").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// A storage capacity in gigabytes.
/// ```rust
/// # #[macro_use] extern crate serde_json;
/// # use inventario::formatting::gigabytes;
/// # fn main() {
/// assert_eq!(gigabytes(Some(&json!(512))), "512 GB".to_string());
/// assert_eq!(gigabytes(Some(&json!(0))), "Sin datos".to_string());
/// assert_eq!(gigabytes(None), "Sin datos".to_string());
/// # }
/// ```
pub fn gigabytes(capacity: Option<&Value>) -> String {
    match capacity.and_then(value_text) {
        // A zero capacity is as good as none
        Some(ref n) if n == "0" => MISSING.to_string(),
        Some(n) => format!("{} GB", n),
        None => MISSING.to_string(),
    }
}

/// A value paired with its qualifier, eg "16 DDR4" or, wrapped, "i5 (2.4 GHz)". Half a pair
/// tells the reader nothing, so unless both are present this is `MISSING`.
pub fn with_qualifier(value: Option<String>, qualifier: Option<String>, wrap: bool) -> String {
    match (value, qualifier) {
        (Some(v), Some(q)) if wrap => format!("{} ({})", v, q),
        (Some(v), Some(q)) => format!("{} {}", v, q),
        _ => MISSING.to_string(),
    }
}
