//! Display formatting of stat values.
//!
//! Aggregation always yields raw numbers; these functions are applied
//! afterwards, only for rendering.

use contracts::shared::indicators::ValueFormat;

/// Rounds half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(i32::from(decimals));
    (value * factor).round() / factor
}

/// Formats a number with comma thousands separators
///
/// # Examples
/// ```
/// use list_query::format::format_number;
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-1234.5, 2), "-1,234.50");
/// ```
pub fn format_number(value: f64, decimals: u8) -> String {
    let fixed = format!("{:.*}", usize::from(decimals), round_to(value.abs(), decimals));
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let mut result: String = grouped.chars().rev().collect();
    if let Some(frac_part) = frac_part {
        result.push('.');
        result.push_str(frac_part);
    }

    // -0.4 rounds to "0", not "-0"
    let is_zero = !result.chars().any(|ch| ch.is_ascii_digit() && ch != '0');
    if value < 0.0 && !is_zero {
        result.insert(0, '-');
    }
    result
}

pub fn format_percent(value: f64, decimals: u8) -> String {
    format!("{}%", format_number(round_to(value, decimals), decimals))
}

pub fn format_money(value: f64, currency: &str) -> String {
    let number = format_number(value, 2);
    match number.strip_prefix('-') {
        Some(unsigned) => format!("-{currency}{unsigned}"),
        None => format!("{currency}{number}"),
    }
}

/// Thousands with a "K" suffix: 12_345 -> "$12K"
pub fn format_compact_money(value: f64, currency: &str) -> String {
    let number = format_number(value / 1000.0, 0);
    match number.strip_prefix('-') {
        Some(unsigned) => format!("-{currency}{unsigned}K"),
        None => format!("{currency}{number}K"),
    }
}

pub fn format_value(value: f64, format: &ValueFormat) -> String {
    match format {
        ValueFormat::Money { currency } => format_money(value, currency),
        ValueFormat::CompactMoney { currency } => format_compact_money(value, currency),
        ValueFormat::Number { decimals } => format_number(value, *decimals),
        ValueFormat::Percent { decimals } => format_percent(value, *decimals),
        ValueFormat::Integer => format_number(value.round(), 0),
    }
}
