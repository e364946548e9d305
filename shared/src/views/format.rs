//! Display formatting helpers shared by the views

use chrono::DateTime;

/// Epoch milliseconds as `YYYY-MM-DD HH:MM:SS` (UTC)
pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| millis.to_string())
}

/// Group the integer part with commas and keep up to three decimals
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let integer = abs.trunc() as u64;
    let fraction = abs - abs.trunc();

    let mut out = group_digits(integer);
    if fraction > 0.0 {
        let decimals = format!("{:.3}", fraction);
        let decimals = decimals.trim_start_matches('0').trim_end_matches('0');
        if decimals.len() > 1 {
            out.push_str(decimals);
        }
    }
    if negative && out != "0" {
        out.insert(0, '-');
    }
    out
}

pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1` -> `1st`, `12` -> `12th`, `22` -> `22nd`, `45.5` -> `45.5th`
pub fn ordinalize(value: f64) -> String {
    let suffix = if value.fract() != 0.0 {
        "th"
    } else {
        let n = value.abs() as u64;
        match (n % 10, n % 100) {
            (1, m) if m != 11 => "st",
            (2, m) if m != 12 => "nd",
            (3, m) if m != 13 => "rd",
            _ => "th",
        }
    };
    format!("{}{}", trim_float(value), suffix)
}

/// Usage percentile label, e.g. `Usage - 45th pctile` or bare `45th pctile`
pub fn usage_percentile(percentile_rank: f64, literal: bool) -> String {
    let percentile = (percentile_rank * 10.0).round() / 10.0;
    let label = format!("{} pctile", ordinalize(percentile));
    if literal {
        format!("Usage - {}", label)
    } else {
        label
    }
}

/// `columnNames` -> `Column Names`, `service_type` -> `Service Type`
pub fn start_case(input: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for ch in input.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }

        let boundary = match prev {
            Some(p) => {
                (p.is_lowercase() && ch.is_uppercase())
                    || (p.is_alphabetic() && ch.is_numeric())
                    || (p.is_numeric() && ch.is_alphabetic())
            }
            None => false,
        };
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
        prev = Some(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(format_timestamp(1_700_000_000_000), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(-98765.4321), "-98,765.432");
    }

    #[test]
    fn test_ordinalize() {
        assert_eq!(ordinalize(1.0), "1st");
        assert_eq!(ordinalize(2.0), "2nd");
        assert_eq!(ordinalize(3.0), "3rd");
        assert_eq!(ordinalize(11.0), "11th");
        assert_eq!(ordinalize(13.0), "13th");
        assert_eq!(ordinalize(22.0), "22nd");
        assert_eq!(ordinalize(45.5), "45.5th");
    }

    #[test]
    fn test_usage_percentile() {
        assert_eq!(usage_percentile(45.04, true), "Usage - 45th pctile");
        assert_eq!(usage_percentile(91.26, false), "91.3th pctile");
    }

    #[test]
    fn test_start_case() {
        assert_eq!(start_case("columnNames"), "Column Names");
        assert_eq!(start_case("description"), "Description");
        assert_eq!(start_case("service_type"), "Service Type");
        assert_eq!(start_case("columns.name"), "Columns Name");
        assert_eq!(start_case("tier2Tags"), "Tier 2 Tags");
    }
}
