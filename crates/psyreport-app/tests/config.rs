use std::collections::HashMap;
use std::path::PathBuf;

use psyreport_app::config::{AppConfig, CredentialSource, DEFAULT_MODEL_ID, DEFAULT_REGION, config_info};

fn config_from(vars: &[(&str, &str)]) -> eyre::Result<AppConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn empty_environment_uses_defaults() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.region, DEFAULT_REGION);
    assert_eq!(config.model_id, DEFAULT_MODEL_ID);
    assert!(matches!(config.credentials, CredentialSource::DefaultChain));
    assert!(config.output_dir.is_none());
}

#[test]
fn region_prefers_app_variable() {
    let config = config_from(&[
        ("AWS_REGION", "eu-west-1"),
        ("PSYREPORT_REGION", "ap-southeast-2"),
    ])
    .unwrap();
    assert_eq!(config.region, "ap-southeast-2");

    let config = config_from(&[("AWS_REGION", "eu-west-1")]).unwrap();
    assert_eq!(config.region, "eu-west-1");
}

#[test]
fn blank_values_count_as_unset() {
    let config = config_from(&[("PSYREPORT_REGION", "  "), ("PSYREPORT_MODEL_ID", "")]).unwrap();

    assert_eq!(config.region, DEFAULT_REGION);
    assert_eq!(config.model_id, DEFAULT_MODEL_ID);
}

#[test]
fn inline_keys_are_used() {
    let config = config_from(&[
        ("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE12345"),
        ("AWS_SECRET_ACCESS_KEY", "secret"),
        ("AWS_SESSION_TOKEN", "token"),
    ])
    .unwrap();

    let CredentialSource::Inline {
        access_key_id,
        session_token,
        ..
    } = &config.credentials
    else {
        panic!("expected inline credentials");
    };
    assert_eq!(access_key_id, "AKIAEXAMPLE12345");
    assert_eq!(session_token.as_deref(), Some("token"));

    let info = config_info(&config);
    assert_eq!(info.credential_type, "temporary");
    assert_eq!(info.access_key_hint.as_deref(), Some("AKIA...2345"));
}

#[test]
fn profile_wins_over_inline_keys() {
    let config = config_from(&[
        ("PSYREPORT_AWS_PROFILE", "clinic"),
        ("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE12345"),
        ("AWS_SECRET_ACCESS_KEY", "secret"),
    ])
    .unwrap();

    assert!(matches!(
        config.credentials,
        CredentialSource::Profile { ref profile_name } if profile_name == "clinic"
    ));
    assert_eq!(config_info(&config).access_key_hint, None);
}

#[test]
fn half_set_key_pair_is_an_error() {
    assert!(config_from(&[("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE12345")]).is_err());
    assert!(config_from(&[("AWS_SECRET_ACCESS_KEY", "secret")]).is_err());
}

#[test]
fn configured_output_dir_is_preferred() {
    let config = config_from(&[("PSYREPORT_OUTPUT_DIR", "/srv/reports")]).unwrap();

    assert_eq!(config.default_output_dir(), PathBuf::from("/srv/reports"));
}
