/// Truncates `value` to at most `max_chars` characters, appending `...` when
/// anything was cut off. Counts characters, not bytes.
pub fn truncate_with_ellipsis(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &value[..byte_index]),
        None => value.to_string(),
    }
}

/// Formats an integer with `,` thousands separators.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Joins whole `items` with `separator` within `max_chars` characters.
///
/// Items that no longer fit are dropped and summarized as `(+N more)`.
pub fn join_within(items: &[String], separator: &str, max_chars: usize) -> String {
    let joined = items.join(separator);
    if joined.chars().count() <= max_chars {
        return joined;
    }

    let separator_chars = separator.chars().count();
    let more = |dropped: usize| format!("(+{} more)", dropped);

    let mut kept = 0;
    let mut kept_chars = 0;
    for item in items {
        let item_chars = item.chars().count() + if kept > 0 { separator_chars } else { 0 };
        let summary_chars = separator_chars + more(items.len() - kept - 1).chars().count();

        if kept_chars + item_chars + summary_chars > max_chars {
            break;
        }

        kept += 1;
        kept_chars += item_chars;
    }

    if kept == 0 {
        return more(items.len());
    }

    format!(
        "{}{}{}",
        items[..kept].join(separator),
        separator,
        more(items.len() - kept)
    )
}
