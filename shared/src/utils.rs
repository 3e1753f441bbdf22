//! # Shared Utility Functions
//!
//! Display formatting shared by every front end of the expense client.
//!
//! ## Money Formatting
//!
//! Amounts are rendered in the Brazilian convention: `.` groups thousands and
//! `,` separates decimals, always with two decimal places.
//!
//! ```rust
//! use shared::utils::{format_currency, format_money, format_percent};
//!
//! assert_eq!(format_money(1234567.891), "1.234.567,89");
//! assert_eq!(format_currency(50.0), "R$ 50,00");
//! assert_eq!(format_percent(12.5), "12.50%");
//! ```

/// Format an amount with `.` thousands grouping and `,` decimals (two places).
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_money;
///
/// assert_eq!(format_money(0.0), "0,00");
/// assert_eq!(format_money(-1500.5), "-1.500,50");
/// ```
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let integer_grouped: String = grouped.chars().rev().collect();

    // Rounding can turn a tiny negative into "0,00"; keep the sign off in that case
    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{},{}", sign, integer_grouped, decimal_part)
}

/// Format an amount in reais (`R$ 1.234,56`)
pub fn format_currency(value: f64) -> String {
    format!("R$ {}", format_money(value))
}

/// Format a percentage with two decimals (`12.50%`)
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}
