use anyhow::Result;
use voip_push::config::{Config, DEFAULT_ONESIGNAL_API_URL};

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Test: Only the OneSignal credentials are required
#[test]
fn test_defaults_apply() -> Result<()> {
    let config = Config::from_vars(vars(&[
        ("ONESIGNAL_APP_ID", "app-1"),
        ("ONESIGNAL_API_KEY", "key-1"),
    ]))?;

    assert_eq!(config.onesignal_api_url, DEFAULT_ONESIGNAL_API_URL);
    assert_eq!(config.channel_namespace, "tawsilet");
    assert_eq!(config.android_channel_id, "voip_calls");
    assert_eq!(config.http_timeout_seconds, 10);
    assert!(config.fcm_project_id.is_none());
    assert!(!config.log_json);

    Ok(())
}

/// Test: Missing credentials fail to load
#[test]
fn test_missing_credentials_fail() {
    assert!(Config::from_vars(vars(&[("ONESIGNAL_APP_ID", "app-1")])).is_err());
}

/// Test: Library settings are derived from configuration
#[test]
fn test_derived_settings() -> Result<()> {
    let config = Config::from_vars(vars(&[
        ("ONESIGNAL_APP_ID", "app-1"),
        ("ONESIGNAL_API_KEY", "key-1"),
        ("CHANNEL_NAMESPACE", "driverapp"),
        ("ANDROID_CHANNEL_ID", "incoming_calls"),
        ("FCM_PROJECT_ID", "driver-app"),
    ]))?;

    let options = config.payload_options(true);
    assert_eq!(options.app_id, "app-1");
    assert_eq!(options.android_channel_id, "incoming_calls");
    assert!(options.data_only);

    assert_eq!(config.channel_generator().namespace(), "driverapp");
    assert_eq!(config.fcm_project_id.as_deref(), Some("driver-app"));

    Ok(())
}
