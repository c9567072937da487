/// Formats an amount as `$1,234.56`. The sign is dropped; callers decide how to
/// present direction (income vs expense).
pub fn format_currency(symbol: &str, amount: f64, show_decimals: bool) -> String {
    let abs = amount.abs();
    let rendered = if show_decimals {
        format!("{:.2}", abs)
    } else {
        format!("{:.0}", abs)
    };
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{symbol}{grouped}.{fraction}"),
        None => format!("{symbol}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::format_currency;

    #[test]
    fn groups_thousands_and_keeps_two_decimals() {
        assert_eq!(format_currency("$", 1234567.5, true), "$1,234,567.50");
        assert_eq!(format_currency("$", 999.0, true), "$999.00");
    }

    #[test]
    fn drops_sign_and_decimals_on_request() {
        assert_eq!(format_currency("$", -219.4, false), "$219");
        assert_eq!(format_currency("€", 0.0, true), "€0.00");
    }
}
