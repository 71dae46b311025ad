use anyhow::Result;
use public_api_config::baseserver::ListenAddress;
use public_api_config::config::loader;
use public_api_config::utils::scrubbing;
use public_api_config::utils::validation::Validate;
use public_api_config::ConfigError;
use std::io::Write;
use tempfile::{Builder, TempDir};

fn write_config(dir: &TempDir, name: &str, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok(path)
}

#[test]
fn test_read_json_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_config(
        &temp_dir,
        "config.json",
        r#"{
    "gitpodServiceUrl": "wss://gitpod.example.com/api/v1",
    "server": {
        "services": {
            "grpc": { "address": ":9001" },
            "http": {
                "address": ":9002",
                "tls": { "caPath": "", "certPath": "/certs/tls.crt", "keyPath": "/certs/tls.key" }
            }
        }
    }
}"#,
    )?;

    let config = loader::read(&path)?;
    config.validate()?;

    assert_eq!(config.gitpod_service_url, "wss://gitpod.example.com/api/v1");
    let services = &config.server.as_ref().unwrap().services;
    assert_eq!(services.grpc.as_ref().unwrap().address, ":9001");
    assert!(services.http.as_ref().unwrap().is_tls());
    Ok(())
}

#[test]
fn test_read_toml_file() -> Result<()> {
    let mut temp_file = Builder::new().suffix(".toml").tempfile()?;
    temp_file.write_all(
        br#"
gitpodServiceUrl = "https://gitpod.example.com"

[server.services.grpc]
address = "127.0.0.1:9001"
"#,
    )?;

    let config = loader::read(temp_file.path())?;
    config.validate()?;

    let grpc = config.server.unwrap().services.grpc.unwrap();
    assert_eq!(
        grpc.listen_address()?,
        ListenAddress::Ip("127.0.0.1:9001".parse::<std::net::SocketAddr>()?)
    );
    Ok(())
}

#[test]
fn test_env_var_substitution() -> Result<()> {
    std::env::set_var("PUBLIC_API_TEST_SERVICE_URL", "https://from-env.example.com");

    let config = loader::parse(
        r#"{"gitpodServiceUrl": "${PUBLIC_API_TEST_SERVICE_URL}"}"#,
        loader::ConfigFormat::Json,
    )?;
    assert_eq!(config.gitpod_service_url, "https://from-env.example.com");

    std::env::remove_var("PUBLIC_API_TEST_SERVICE_URL");
    Ok(())
}

#[test]
fn test_env_var_with_backslash_and_quote() -> Result<()> {
    std::env::set_var("PUBLIC_API_TEST_CERT_DIR", r#"C:\certs\"primary""#);

    let json = loader::parse(
        r#"{"gitpodServiceUrl": "https://gitpod.example.com", "server": {"services": {"grpc": {"address": ":9001", "tls": {"certPath": "${PUBLIC_API_TEST_CERT_DIR}"}}}}}"#,
        loader::ConfigFormat::Json,
    )?;
    let toml = loader::parse(
        r#"
gitpodServiceUrl = "https://gitpod.example.com"

[server.services.grpc]
address = ":9001"

[server.services.grpc.tls]
certPath = "${PUBLIC_API_TEST_CERT_DIR}"
"#,
        loader::ConfigFormat::Toml,
    )?;

    std::env::remove_var("PUBLIC_API_TEST_CERT_DIR");

    for config in [json, toml] {
        let tls = config.server.unwrap().services.grpc.unwrap().tls.unwrap();
        assert_eq!(tls.cert_path, r#"C:\certs\"primary""#);
    }
    Ok(())
}

#[test]
fn test_env_var_cannot_inject_keys() -> Result<()> {
    let injected = r#"https://gitpod.example.com", "server": {"services": {}}, "x": ""#;
    std::env::set_var("PUBLIC_API_TEST_INJECTED_URL", injected);

    let config = loader::parse(
        r#"{"gitpodServiceUrl": "${PUBLIC_API_TEST_INJECTED_URL}"}"#,
        loader::ConfigFormat::Json,
    )?;
    std::env::remove_var("PUBLIC_API_TEST_INJECTED_URL");

    assert_eq!(config.gitpod_service_url, injected);
    assert!(config.server.is_none());
    Ok(())
}

#[test]
fn test_hostname_listener_is_valid() -> Result<()> {
    let config = loader::parse(
        r#"{
    "gitpodServiceUrl": "https://gitpod.example.com",
    "server": { "services": { "grpc": { "address": "public-api.gitpod.svc.cluster.local:9001" } } }
}"#,
        loader::ConfigFormat::Json,
    )?;

    config.validate()?;
    Ok(())
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = loader::read(temp_dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "config.yaml", "gitpodServiceUrl: x").unwrap();
    assert!(matches!(
        loader::read(&path),
        Err(ConfigError::UnsupportedFormatError { .. })
    ));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "config.toml", "gitpodServiceUrl = ").unwrap();
    match loader::read(&path) {
        Err(ConfigError::ParseError { format, .. }) => assert_eq!(format, "TOML"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_loaded_config_fails_validation_on_bad_url() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_config(&temp_dir, "config.json", r#"{"gitpodServiceUrl": "not a url"}"#)?;

    // decoding is lenient, the policy lives in validate()
    let config = loader::read(&path)?;
    match config.validate() {
        Err(ConfigError::InvalidConfigValueError { field, .. }) => {
            assert_eq!(field, "gitpodServiceUrl")
        }
        other => panic!("unexpected result: {:?}", other),
    }
    Ok(())
}

#[test]
fn test_scrubbed_config_hides_key_path() -> Result<()> {
    let config = loader::parse(
        r#"{
    "gitpodServiceUrl": "https://gitpod.example.com",
    "server": { "services": { "grpc": {
        "address": ":9001",
        "tls": { "caPath": "/certs/ca.crt", "certPath": "/certs/tls.crt", "keyPath": "/certs/tls.key" }
    } } }
}"#,
        loader::ConfigFormat::Json,
    )?;

    let scrubbed = scrubbing::scrub_serializable(&config, true)?;
    let tls = &scrubbed["server"]["services"]["grpc"]["tls"];
    assert_eq!(scrubbed["gitpodServiceUrl"], "https://gitpod.example.com");
    assert_eq!(tls["certPath"], "/certs/tls.crt");
    assert_eq!(tls["keyPath"], "[redacted]");
    Ok(())
}

#[test]
fn test_scrubbed_config_without_nesting() -> Result<()> {
    let config = loader::parse(
        r#"{"gitpodServiceUrl": "https://gitpod.example.com", "server": {"services": {"grpc": {"address": ":9001"}}}}"#,
        loader::ConfigFormat::Json,
    )?;

    let scrubbed = scrubbing::scrub_serializable(&config, false)?;
    assert_eq!(
        scrubbed,
        serde_json::json!({
            "gitpodServiceUrl": "https://gitpod.example.com",
            "server": "[redacted:nested:object]"
        })
    );
    Ok(())
}
