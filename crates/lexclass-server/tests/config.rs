use std::fs;

use lexclass_llm::config::{DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use lexclass_server::config::Settings;

fn settings(api_key: Option<&str>) -> Settings {
    Settings {
        api_key: api_key.map(str::to_string),
        base_url: DEFAULT_BASE_URL.to_string(),
        model: DEFAULT_MODEL.to_string(),
        max_tokens: DEFAULT_MAX_TOKENS,
        timeout_secs: 120,
        template_dir: None,
    }
}

#[test]
fn missing_api_key_fails_before_serving() {
    let settings = settings(None);

    let err = settings.chat_config().unwrap_err();
    assert!(err.to_string().contains("OPENAI_API_KEY"), "{err}");
    assert!(settings.pipeline().is_err());
}

#[test]
fn blank_api_key_counts_as_missing() {
    let settings = settings(Some("   "));

    let err = settings.chat_config().unwrap_err();
    assert!(err.to_string().contains("OPENAI_API_KEY"), "{err}");
    assert!(settings.pipeline().is_err());
}

#[test]
fn zero_timeout_is_rejected() {
    let mut settings = settings(Some("sk-test-0123456789"));
    settings.timeout_secs = 0;

    let err = settings.pipeline().err().unwrap();
    assert!(err.to_string().contains("timeout"), "{err}");
}

#[test]
fn valid_settings_build_a_pipeline() {
    let settings = settings(Some("sk-test-0123456789"));

    let config = settings.chat_config().unwrap();
    assert_eq!(config.model, DEFAULT_MODEL);
    assert_eq!(config.timeout.as_secs(), 120);
    assert!(settings.pipeline().is_ok());
}

#[test]
fn template_dir_with_missing_file_fails_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("1a1_prompt.jinja"),
        "Classify: {{ document_text }}",
    )
    .unwrap();

    let mut settings = settings(Some("sk-test-0123456789"));
    settings.template_dir = Some(dir.path().to_path_buf());

    assert!(settings.registry().is_err());
    assert!(settings.pipeline().is_err());
}
