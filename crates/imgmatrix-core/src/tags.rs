use crate::config::VersionAliases;

/// Computes every tag an image is published under.
///
/// The first element is always `image_name`. Each alias of each version is
/// tried in order; a substitution that changes the name is appended.
pub fn derive_tags(image_name: &str, aliases: &[VersionAliases]) -> Vec<String> {
    let mut tags = vec![image_name.to_owned()];
    for entry in aliases {
        for alias in &entry.aliases {
            let replaced = replace_version(image_name, &entry.version, alias);
            if replaced != image_name {
                tags.push(replaced);
            }
        }
    }
    tags
}

/// Replaces every occurrence of `version` in `haystack` that is not
/// adjacent to another digit, so `7.4` leaves `17.4` and `7.40` alone.
fn replace_version(haystack: &str, version: &str, alias: &str) -> String {
    if version.is_empty() {
        return haystack.to_owned();
    }

    let bytes = haystack.as_bytes();
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    let mut pos = 0;

    while let Some(found) = haystack[pos..].find(version) {
        let start = pos + found;
        let end = start + version.len();
        let digit_before = start > 0 && bytes[start - 1].is_ascii_digit();
        let digit_after = end < bytes.len() && bytes[end].is_ascii_digit();

        if digit_before || digit_after {
            // advance by one char so overlapping candidates are still seen
            pos = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
            continue;
        }

        out.push_str(&haystack[last..start]);
        out.push_str(alias);
        last = end;
        pos = end;
    }

    out.push_str(&haystack[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(version: &str, names: &[&str]) -> VersionAliases {
        VersionAliases {
            version: version.to_owned(),
            aliases: names.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    #[test]
    fn replace_whole_token() {
        assert_eq!(replace_version("7.4-npm", "7.4", "7.x"), "7.x-npm");
    }

    #[test]
    fn replace_skips_digit_neighbours() {
        assert_eq!(replace_version("17.4", "7.4", "7.x"), "17.4");
        assert_eq!(replace_version("7.40", "7.4", "7.x"), "7.40");
    }

    #[test]
    fn replace_finds_token_after_rejected_candidate() {
        assert_eq!(replace_version("17.4-7.4", "7.4", "x"), "17.4-x");
    }

    #[test]
    fn replace_all_occurrences() {
        assert_eq!(replace_version("8.0-8.0", "8.0", "latest"), "latest-latest");
    }

    #[test]
    fn empty_version_never_substitutes() {
        assert_eq!(replace_version("8.0", "", "x"), "8.0");
    }

    #[test]
    fn no_alias_keeps_only_original() {
        assert_eq!(derive_tags("7.2-npm", &[aliases("7.4", &["7.x"])]), vec!["7.2-npm"]);
    }
}
