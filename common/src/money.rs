/// Currency symbol carried by catalog price strings.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Parse a display price string (`"₹9,999"`) into whole rupees.
///
/// Strips the currency symbol and digit-group separators, then parses the
/// remainder as an integer. Malformed or empty input resolves to `0` rather
/// than an error; a bad price string must never take down a cart render.
pub fn parse(raw: &str) -> u64 {
    let cleaned = raw.replace(CURRENCY_SYMBOL, "").replace(',', "");
    cleaned.trim().parse().unwrap_or(0)
}

/// Like [`parse`], for optional price fields. `None` resolves to `0`.
pub fn parse_opt(raw: Option<&str>) -> u64 {
    raw.map(parse).unwrap_or(0)
}

/// Render whole rupees back into the catalog display form (`₹12,999`).
pub fn format(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{CURRENCY_SYMBOL}{grouped}")
}
