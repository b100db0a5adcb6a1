//! Minor-currency-unit arithmetic and display formatting
//!
//! Amounts are stored as integer cents to keep arithmetic exact; the
//! decimal form only exists at the form boundary (input coercion and edit
//! pre-population).

/// Convert a major-unit decimal amount (e.g. `10.50`) to integer cents
///
/// Rounds to the nearest cent so that inputs like `10.10` do not lose a
/// cent to binary floating point.
pub fn to_cents(major: f64) -> i64 {
    (major * 100.0).round() as i64
}

/// Convert integer cents back to the major-unit decimal form used to
/// pre-populate edit forms
pub fn to_major(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Format integer cents as an en-US currency string: `$1,234.56`
///
/// This is the display contract for every formatted amount the dashboard
/// shows (latest invoices, card totals, customer totals).
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let dollars = cents / 100;
    let remainder = cents % 100;
    format!("{}${}.{:02}", sign, group_thousands(dollars), remainder)
}

/// Insert comma separators every three digits
fn group_thousands(mut n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let mut groups = Vec::new();
    while n >= 1000 {
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.push(n.to_string());
    groups.reverse();
    groups.join(",")
}
