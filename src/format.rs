//! Currency rendering. Presentation only: nothing here feeds back into
//! stored or summed values.

use rust_decimal::Decimal;

/// Whole-dollar label for charts and axes, e.g. `1234.5` → `"$1,234"`.
/// Halves round to even.
pub(crate) fn format_currency(val: Decimal) -> String {
    let rounded = val.round();
    let digits = format!("{:.0}", rounded.abs());
    signed(rounded < Decimal::ZERO, &group_thousands(&digits))
}

/// The value at its own precision with thousands separators, e.g.
/// `5000` → `"$5,000"`, `1234.56` → `"$1,234.56"`. Used for tables, totals
/// and export.
pub(crate) fn format_amount(val: Decimal) -> String {
    let text = val.abs().normalize().to_string();
    let body = match text.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{frac_part}", group_thousands(int_part)),
        None => group_thousands(&text),
    };
    signed(val < Decimal::ZERO, &body)
}

/// Insert a comma every three digits from the right.
pub(crate) fn group_thousands(digits: &str) -> String {
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",")
}

fn signed(negative: bool, body: &str) -> String {
    if negative {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}
