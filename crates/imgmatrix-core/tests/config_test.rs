use imgmatrix_core::{MatrixConfig, VersionAliases};
use tempfile::TempDir;

#[test]
fn load_returns_defaults_when_no_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = MatrixConfig::load(tmp.path()).unwrap();

    assert_eq!(config.image.name, "atk4/image");
    assert_eq!(config.image.registry, "atk4");
    assert_eq!(config.image.repo, "atk4/image");
    assert_eq!(config.image.push_branch, "master");
    assert_eq!(config.matrix.versions, vec!["7.2", "7.3", "7.4", "8.0"]);
    assert_eq!(config.matrix.variants, vec![""]);
    assert_eq!(config.matrix.targets, vec!["base", "npm", "selenium"]);
    assert_eq!(config.matrix.default_target, "base");
    assert_eq!(
        config.aliases,
        vec![
            VersionAliases {
                version: "7.4".to_owned(),
                aliases: vec!["7.x".to_owned()],
            },
            VersionAliases {
                version: "8.0".to_owned(),
                aliases: vec!["8.x".to_owned(), "latest".to_owned()],
            },
        ]
    );
}

#[test]
fn load_parses_full_config() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[image]
name = "acme/php"
registry = "acme"
repo = "acme/php-images"
push_branch = "main"

[matrix]
versions = ["8.1", "8.2"]
variants = ["", "zts"]
targets = ["base", "npm"]
default_target = "base"

[[aliases]]
version = "8.2"
aliases = ["8.x", "latest"]
"#;
    std::fs::write(tmp.path().join("imgmatrix.toml"), toml).unwrap();

    let config = MatrixConfig::load(tmp.path()).unwrap();

    assert_eq!(config.image.name, "acme/php");
    assert_eq!(config.image.registry, "acme");
    assert_eq!(config.image.repo, "acme/php-images");
    assert_eq!(config.image.push_branch, "main");
    assert_eq!(config.matrix.versions, vec!["8.1", "8.2"]);
    assert_eq!(config.matrix.variants, vec!["", "zts"]);
    assert_eq!(config.matrix.targets, vec!["base", "npm"]);
    assert_eq!(config.aliases.len(), 1);
    assert_eq!(config.aliases[0].aliases, vec!["8.x", "latest"]);
}

#[test]
fn load_partial_config_fills_defaults() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[matrix]
versions = ["8.0"]
"#;
    std::fs::write(tmp.path().join("imgmatrix.toml"), toml).unwrap();

    let config = MatrixConfig::load(tmp.path()).unwrap();

    assert_eq!(config.matrix.versions, vec!["8.0"]);
    // Defaults preserved
    assert_eq!(config.matrix.targets, vec!["base", "npm", "selenium"]);
    assert_eq!(config.image.name, "atk4/image");
    assert_eq!(config.aliases.len(), 2);
}

#[test]
fn load_explicit_empty_aliases() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("imgmatrix.toml"), "aliases = []\n").unwrap();

    let config = MatrixConfig::load(tmp.path()).unwrap();
    assert!(config.aliases.is_empty());
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("imgmatrix.toml"), "not valid {{{{ toml").unwrap();

    let result = MatrixConfig::load(tmp.path());
    assert!(result.is_err());

    let err = result.unwrap_err().to_string();
    assert!(err.contains("parse"));
}

#[test]
fn load_empty_config_returns_defaults() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("imgmatrix.toml"), "").unwrap();

    let config = MatrixConfig::load(tmp.path()).unwrap();
    assert_eq!(config.matrix.versions, vec!["7.2", "7.3", "7.4", "8.0"]);
}

#[test]
fn unmatched_alias_versions_lists_unknown_keys() {
    let mut config = MatrixConfig::default();
    assert!(config.unmatched_alias_versions().is_empty());

    config.aliases.push(VersionAliases {
        version: "5.6".to_owned(),
        aliases: vec!["5.x".to_owned()],
    });
    assert_eq!(config.unmatched_alias_versions(), vec!["5.6"]);
}
