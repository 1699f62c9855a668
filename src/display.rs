// Presentation helpers shared by every listing surface
pub const CURRENCY_SYMBOL: &str = "₦";
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-image.png";
pub const PLACEHOLDER_AVATAR: &str = "/placeholder-avatar.png";

/// Formats a naira amount with thousands separators: `₦1,500`, `₦1,500.50`.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() || price <= 0.0 {
        return format!("{}0", CURRENCY_SYMBOL);
    }

    let cents = (price * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    match cents % 100 {
        0 => format!("{}{}", CURRENCY_SYMBOL, whole),
        fraction => format!("{}{}.{:02}", CURRENCY_SYMBOL, whole, fraction),
    }
}

fn group_thousands(value: u64) -> String {
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

/// Full URLs pass through; storage paths are prefixed with `base`.
pub fn resolve_media_url(path: &str, base: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    Some(format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}
