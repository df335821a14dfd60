//! Display helpers for scene content

/// Next auto-numbered name "<label> <n>", one past the highest existing suffix
pub fn next_numbered_name<'a>(label: &str, names: impl IntoIterator<Item = &'a str>) -> String {
    let prefix = format!("{label} ");
    let highest = names
        .into_iter()
        .filter_map(|name| name.strip_prefix(&prefix)?.trim().parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{label} {}", highest + 1)
}

/// Get shortened ID (first 8 characters)
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name_is_one() {
        assert_eq!(next_numbered_name("Box", std::iter::empty()), "Box 1");
    }

    #[test]
    fn test_uses_highest_suffix_not_count() {
        let names = ["Box 1", "Box 7", "Box 3", "Sphere 12", "Boxy 40", "Box x"];
        assert_eq!(next_numbered_name("Box", names), "Box 8");
    }

    #[test]
    fn test_multi_word_label() {
        let names = ["CAD Plan 2", "CAD 9"];
        assert_eq!(next_numbered_name("CAD Plan", names), "CAD Plan 3");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
