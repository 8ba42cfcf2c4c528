//! HTML attribute escaping for emitted tags and unescaping of captured hrefs.

/// Escapes a value for use inside a double-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverses the entity forms hosts commonly use inside `href` attributes.
pub fn unescape_attr(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&#038;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_attr("https://x.test/?a=1&b=\"2\"<'>"),
            "https://x.test/?a=1&amp;b=&quot;2&quot;&lt;&#039;&gt;"
        );
        assert_eq!(escape_attr("https://example.com/"), "https://example.com/");
    }

    #[test]
    fn unescape_common_entities() {
        assert_eq!(unescape_attr("/a/?x=1&#038;y=2"), "/a/?x=1&y=2");
        assert_eq!(unescape_attr("/a/?x=1&amp;y=2"), "/a/?x=1&y=2");
        assert_eq!(unescape_attr("/plain/"), "/plain/");
    }
}
