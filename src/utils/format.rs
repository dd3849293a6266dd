use serde::{Deserialize, Deserializer, Serializer};

/// Format a proportion the way the group table shows it
pub fn format_rate(rate: f64) -> String {
    format!("{:.6}", rate)
}

/// Format a fraction as a signed percentage, e.g. `+43.08%`
pub fn format_percent(value: f64) -> String {
    format!("{:+.2}%", value * 100.0)
}

/// Format a threshold without trailing zeros: `0.05`, `0.1`, `0.001`
pub fn format_alpha(alpha: f64) -> String {
    let s = format!("{:.6}", alpha);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Pad `text` to `width` display characters on the left or right
pub fn pad(text: &str, width: usize, right_align: bool) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let fill = " ".repeat(width - len);
    if right_align {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

/// Serialize a delimiter byte as a one-character string
pub fn serialize_delimiter<S>(delimiter: &u8, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&(*delimiter as char).to_string())
}

/// Deserialize a one-character string into a delimiter byte. `\t` and `tab` mean tab.
pub fn deserialize_delimiter<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let s = String::deserialize(deserializer)?;
    if matches!(s.as_str(), "\\t" | "tab") {
        return Ok(b'\t');
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(D::Error::custom(format!(
            "delimiter must be a single ASCII character, got '{}'",
            s
        ))),
    }
}
