use std::{env, fs, time::Duration};

use scopegate_server::config::loader::load_config;

#[test]
fn config_parsing_and_env_overrides_and_validation() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("scopegate.toml");

    let toml_content = r#"
[server]
host = "127.0.0.1"
port = 8081
body_limit_bytes = 4096

[logging]
level = "debug"

[auth.consent]
enabled = true

[auth.oauth]
authorization_code_lifetime = "5m"

[auth.session]
cookie_name = "sg_session"

[[bootstrap.applications]]
owner = "admin"
name = "app-docs"
client_id = "docs-client"
redirect_uris = ["https://docs.example.com/callback"]

[[bootstrap.applications.custom_scopes]]
scope = "read"
display_name = "Read documents"

[[bootstrap.applications.custom_scopes]]
scope = "write"

[[bootstrap.users]]
owner = "built-in"
name = "alice"
login_session = true
"#;
    fs::write(&path, toml_content).expect("write toml");

    // 1) Valid config parses
    let cfg = load_config(path.to_str()).expect("should parse config");
    assert_eq!(cfg.server.port, 8081);
    assert_eq!(cfg.server.body_limit_bytes, 4096);
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(
        cfg.auth.oauth.authorization_code_lifetime,
        Duration::from_secs(300)
    );
    assert_eq!(cfg.auth.session.cookie_name, "sg_session");
    assert_eq!(cfg.bootstrap.applications.len(), 1);
    assert_eq!(cfg.bootstrap.applications[0].custom_scopes.len(), 2);
    assert_eq!(cfg.bootstrap.users[0].name, "alice");
    assert!(cfg.bootstrap.users[0].login_session);

    // 2) Env override should win over file
    unsafe {
        env::set_var("SCOPEGATE__AUTH__CONSENT__ENABLED", "false");
    }
    let cfg_env = load_config(path.to_str()).expect("should parse config with env overrides");
    assert!(!cfg_env.auth.consent.enabled);
    unsafe {
        env::remove_var("SCOPEGATE__AUTH__CONSENT__ENABLED");
    }

    // 3) Duplicate scope in a catalog should error
    let invalid_path = dir.path().join("invalid.toml");
    let invalid_toml = r#"
[[bootstrap.applications]]
owner = "admin"
name = "app-docs"
client_id = "docs-client"

[[bootstrap.applications.custom_scopes]]
scope = "read"

[[bootstrap.applications.custom_scopes]]
scope = "read"
"#;
    fs::write(&invalid_path, invalid_toml).expect("write invalid toml");
    let err = load_config(invalid_path.to_str()).expect_err("expected validation error");
    assert!(err.contains("bootstrap application admin/app-docs"));

    // 4) Code lifetime above one hour should error
    let long_path = dir.path().join("long.toml");
    fs::write(
        &long_path,
        "[auth.oauth]\nauthorization_code_lifetime = \"2h\"\n",
    )
    .expect("write toml");
    let err = load_config(long_path.to_str()).expect_err("expected validation error");
    assert!(err.contains("authorization_code_lifetime"));

    // 5) Sub-second code lifetime would expire codes on issue
    let short_path = dir.path().join("short.toml");
    fs::write(
        &short_path,
        "[auth.oauth]\nauthorization_code_lifetime = \"500ms\"\n",
    )
    .expect("write toml");
    let err = load_config(short_path.to_str()).expect_err("expected validation error");
    assert!(err.contains("at least 1s"));
}

#[test]
fn explicit_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("missing.toml");
    let err = load_config(path.to_str()).expect_err("missing file");
    assert!(err.contains("config file not found"));
}
