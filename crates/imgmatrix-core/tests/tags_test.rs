use imgmatrix_core::{MatrixConfig, VersionAliases, derive_tags, sanitize};
use proptest::prelude::*;

fn aliases(version: &str, names: &[&str]) -> VersionAliases {
    VersionAliases {
        version: version.to_owned(),
        aliases: names.iter().map(|s| (*s).to_owned()).collect(),
    }
}

// ── derive_tags ──

#[test]
fn latest_version_gets_all_aliases_in_order() {
    let map = vec![aliases("8.0", &["8.x", "latest"])];
    assert_eq!(derive_tags("8.0", &map), vec!["8.0", "8.x", "latest"]);
}

#[test]
fn aliases_keep_target_suffix() {
    let config = MatrixConfig::default();
    assert_eq!(
        derive_tags("8.0-selenium", &config.aliases),
        vec!["8.0-selenium", "8.x-selenium", "latest-selenium"]
    );
    assert_eq!(derive_tags("7.4-npm", &config.aliases), vec!["7.4-npm", "7.x-npm"]);
}

#[test]
fn version_inside_longer_number_is_untouched() {
    let map = vec![aliases("7.4", &["7.x"])];
    assert_eq!(derive_tags("17.4", &map), vec!["17.4"]);
    assert_eq!(derive_tags("7.40", &map), vec!["7.40"]);
}

#[test]
fn alias_map_order_is_preserved() {
    let map = vec![aliases("8.0", &["latest"]), aliases("8.0", &["8.x"])];
    assert_eq!(derive_tags("8.0", &map), vec!["8.0", "latest", "8.x"]);
}

#[test]
fn alias_equal_to_version_is_not_duplicated() {
    let map = vec![aliases("8.0", &["8.0"])];
    assert_eq!(derive_tags("8.0", &map), vec!["8.0"]);
}

// ── sanitize ──

#[test]
fn sanitize_is_deterministic() {
    assert_eq!(sanitize("p", "8.x-npm"), sanitize("p", "8.x-npm"));
}

#[test]
fn sanitize_build_stage_labels() {
    assert_eq!(sanitize("build_", "base"), "build_base");
    assert_eq!(sanitize("build_", "."), "build__dot_");
}

proptest! {
    #[test]
    fn sanitize_only_emits_word_characters(
        prefix in "[A-Za-z_][A-Za-z0-9_]{0,8}",
        name in "\\PC{0,32}",
    ) {
        let label = sanitize(&prefix, &name);
        prop_assert!(label.starts_with(&prefix));
        prop_assert!(label.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    #[test]
    fn sanitize_is_pure(name in "\\PC{0,32}") {
        prop_assert_eq!(sanitize("b", &name), sanitize("b", &name));
    }

    #[test]
    fn whole_token_version_is_substituted(
        major in 1u8..20,
        minor in 0u8..10,
        suffix in "(-[a-z]{1,8})?",
    ) {
        let version = format!("{major}.{minor}");
        let name = format!("{version}{suffix}");
        let map = vec![aliases(&version, &["latest"])];

        let tags = derive_tags(&name, &map);
        prop_assert_eq!(&tags[0], &name);
        prop_assert_eq!(tags.len(), 2);
        prop_assert_eq!(&tags[1], &format!("latest{suffix}"));
    }

    #[test]
    fn longer_number_is_never_substituted(
        major in 1u8..10,
        minor in 0u8..10,
        extra in 0u8..10,
    ) {
        let version = format!("{major}.{minor}");
        let map = vec![aliases(&version, &["latest"])];

        let leading = format!("1{version}");
        let trailing = format!("{version}{extra}");
        prop_assert_eq!(derive_tags(&leading, &map), vec![leading.clone()]);
        prop_assert_eq!(derive_tags(&trailing, &map), vec![trailing.clone()]);
    }
}
