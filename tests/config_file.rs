use fixture_app::config::Config;
use std::io::Write;

#[test]
fn load_reads_toml_named_by_env() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[api]\nendpoint = \"http://localhost:4000/feed\"\ntimeout_ms = 1500\n\n[logging]\nlevel = \"fixture_app=debug\""
    )
    .unwrap();

    unsafe {
        std::env::set_var("FIXTURE_APP_CONFIG", file.path());
        std::env::set_var("FIXTURE_ENV_FILE", "/nonexistent/.env");
        std::env::remove_var("FIXTURE_ENDPOINT");
        std::env::remove_var("FIXTURE_TIMEOUT_MS");
        std::env::remove_var("RUST_LOG");
    }

    let config = Config::load().unwrap();
    assert_eq!(config.api.endpoint, "http://localhost:4000/feed");
    assert_eq!(config.api.timeout_ms, 1500);
    assert_eq!(config.logging.level, "fixture_app=debug");

    unsafe {
        std::env::remove_var("FIXTURE_APP_CONFIG");
        std::env::remove_var("FIXTURE_ENV_FILE");
    }
}
