use regex::Regex;

/// Flattens the simple HTML the feed puts in descriptions into plain text:
/// h3 headers become bulleted section titles, list items become dashes,
/// every other tag is dropped.
pub fn format_description(html: &str) -> String {
    if html.trim().is_empty() {
        return "No description available.".to_string();
    }
    strip_markup(html).unwrap_or_else(|| html.trim().to_string())
}

fn strip_markup(html: &str) -> Option<String> {
    let h3_open = Regex::new(r"(?i)<h3[^>]*>").ok()?;
    let h3_close = Regex::new(r"(?i)</h3>").ok()?;
    let li_open = Regex::new(r"(?i)<li[^>]*>").ok()?;
    let any_tag = Regex::new(r"<[^>]+>").ok()?;

    let text = h3_open.replace_all(html, "\n\n● ");
    let text = h3_close.replace_all(&text, "\n");
    let text = li_open.replace_all(&text, "\n  - ");
    let text = any_tag.replace_all(&text, "");
    Some(text.replace("&amp;", "&").trim().to_string())
}

/// 1234567 -> "1,234,567"
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
