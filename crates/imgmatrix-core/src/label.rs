//! Pipeline step labels.
//!
//! Codefresh step and stage ids must be plain identifiers, while image names
//! and tags contain dots and dashes. Labels are rebuilt from the same inputs
//! wherever a step is referenced, so [`sanitize`] has to stay a pure function.

/// Builds a label from `prefix` followed by `name` with every non-word
/// character escaped.
///
/// `.` becomes `_dot_`, `-` becomes `_dash_`, and anything else outside
/// `[A-Za-z0-9_]` becomes `_0x<hex>_` over its UTF-8 bytes.
pub fn sanitize(prefix: &str, name: &str) -> String {
    let mut label = String::with_capacity(prefix.len() + name.len());
    label.push_str(prefix);
    for c in name.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => label.push(c),
            '.' => label.push_str("_dot_"),
            '-' => label.push_str("_dash_"),
            other => {
                let mut buf = [0u8; 4];
                label.push_str("_0x");
                for byte in other.encode_utf8(&mut buf).bytes() {
                    label.push_str(&format!("{byte:02x}"));
                }
                label.push('_');
            }
        }
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_and_dashes_use_named_tokens() {
        assert_eq!(sanitize("b", "7.4-npm"), "b7_dot_4_dash_npm");
    }

    #[test]
    fn word_characters_pass_through() {
        assert_eq!(sanitize("build_", "selenium"), "build_selenium");
        assert_eq!(sanitize("", "a_B_9"), "a_B_9");
    }

    #[test]
    fn other_characters_are_hex_escaped() {
        assert_eq!(sanitize("p", "a/b"), "pa_0x2f_b");
        assert_eq!(sanitize("p", "a b"), "pa_0x20_b");
    }

    #[test]
    fn non_ascii_escapes_all_utf8_bytes() {
        assert_eq!(sanitize("t", "é"), "t_0xc3a9_");
    }

    #[test]
    fn empty_name_yields_prefix() {
        assert_eq!(sanitize("t", ""), "t");
    }
}
