//! Minimal reader for Java `.properties` files

use std::collections::BTreeMap;

/// Parse `.properties` content into key/value pairs.
///
/// Supports `#`/`!` comments, `=`, `:` or whitespace separators and trailing
/// backslash line continuations. Escapes other than continuations are kept
/// verbatim.
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();
    let mut logical = String::new();

    for raw in content.lines() {
        let line = raw.trim_start();
        if logical.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
        {
            continue;
        }

        if let Some(continued) = line.strip_suffix('\\') {
            logical.push_str(continued);
            continue;
        }

        logical.push_str(line);
        if let Some((key, value)) = split_entry(&logical) {
            entries.insert(key, value);
        }
        logical.clear();
    }

    if let Some((key, value)) = split_entry(&logical) {
        entries.insert(key, value);
    }

    entries
}

fn split_entry(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let separator = line.find(['=', ':']).or_else(|| line.find(char::is_whitespace));
    let (key, value) = match separator {
        Some(index) => (&line[..index], &line[index + 1..]),
        None => (line, ""),
    };

    Some((key.trim().to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_properties() {
        let props = parse_properties(
            "# comment\n! other comment\nserver.port=8081\nspring.application.name : orders\n\nflag\nlist=a,\\\n  b\n",
        );

        assert_eq!(props.get("server.port").map(String::as_str), Some("8081"));
        assert_eq!(
            props.get("spring.application.name").map(String::as_str),
            Some("orders")
        );
        assert_eq!(props.get("flag").map(String::as_str), Some(""));
        assert_eq!(props.get("list").map(String::as_str), Some("a,b"));
        assert_eq!(props.len(), 4);
    }
}
