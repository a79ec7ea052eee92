//! Integration tests

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::time::Duration;

use envbind::configtype::{Base64, JsonFile, YamlFile};
use envbind::{EnvConf, EnvError, Loader, TextDecode};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serial_test::serial;

/// Sets variables for the duration of a test and removes them afterwards.
struct EnvVars(Vec<String>);

impl EnvVars {
    fn set(vars: &[(&str, &str)]) -> Self {
        for (key, value) in vars {
            env::set_var(key, value);
        }
        Self(vars.iter().map(|(key, _)| key.to_string()).collect())
    }

    fn clear(keys: &[&str]) -> Self {
        for key in keys {
            env::remove_var(key);
        }
        Self(Vec::new())
    }
}

impl Drop for EnvVars {
    fn drop(&mut self) {
        for key in &self.0 {
            env::remove_var(key);
        }
    }
}

#[derive(Debug, Default, EnvConf)]
struct BasicConfig {
    #[env(name = "HOST")]
    pub host: String,
    pub port: i64,
    pub timeout: Duration,
    pub debug: bool,
    pub numbers: Vec<i32>,
    pub settings: HashMap<String, String>,
}

#[derive(Debug, Default, EnvConf)]
struct DbConfig {
    pub host: String,
    pub port: i32,
    #[env(name = "DB_PASSWORD")]
    pub password: String,
}

#[derive(Debug, Default, EnvConf)]
struct NestedConfig {
    pub server: BasicConfig,
    pub db: DbConfig,
}

#[derive(Debug, Default, EnvConf)]
struct PointerConfig {
    pub server: Option<BasicConfig>,
    pub db: Option<DbConfig>,
}

#[derive(Debug, Default, EnvConf)]
struct CustomTransformerConfig {
    pub db_connection: String,
    pub api_key: String,
    pub user_id: String,
}

#[test]
#[serial]
fn test_basic_config() {
    let _env = EnvVars::set(&[
        ("HOST", "localhost"),
        ("PORT", "8080"),
        ("TIMEOUT", "5s"),
        ("DEBUG", "true"),
        ("NUMBERS", "1,2,3,4"),
        ("SETTINGS", r#"{"key":"value"}"#),
    ]);

    let mut cfg = BasicConfig::default();
    envbind::load(&mut cfg).unwrap();

    assert_eq!(cfg.host, "localhost");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.timeout, Duration::from_secs(5));
    assert!(cfg.debug);
    assert_eq!(cfg.numbers, vec![1, 2, 3, 4]);
    assert_eq!(
        cfg.settings,
        HashMap::from([("key".to_string(), "value".to_string())])
    );
}

#[test]
#[serial]
fn test_from_env() {
    let _env = EnvVars::set(&[("HOST", "example.com"), ("PORT", "443")]);

    let cfg = BasicConfig::from_env().unwrap();
    assert_eq!(cfg.host, "example.com");
    assert_eq!(cfg.port, 443);
}

#[test]
#[serial]
fn test_nested_config() {
    let _env = EnvVars::set(&[
        ("HOST", "localhost"),
        ("SERVER_PORT", "8080"),
        ("DB_HOST", "db.example.com"),
        ("DB_PORT", "5432"),
        ("DB_PASSWORD", "secret"),
    ]);

    let mut cfg = NestedConfig::default();
    envbind::load(&mut cfg).unwrap();

    assert_eq!(cfg.server.host, "localhost");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.db.host, "db.example.com");
    assert_eq!(cfg.db.port, 5432);
    assert_eq!(cfg.db.password, "secret");
}

#[test]
#[serial]
fn test_pointer_config() {
    let _env = EnvVars::set(&[
        ("HOST", "localhost"),
        ("SERVER_PORT", "8080"),
        ("DB_HOST", "db.example.com"),
        ("DB_PORT", "5432"),
    ]);

    let mut cfg = PointerConfig::default();
    envbind::load(&mut cfg).unwrap();

    let server = cfg.server.expect("server should be allocated");
    assert_eq!(server.host, "localhost");
    assert_eq!(server.port, 8080);
    let db = cfg.db.expect("db should be allocated");
    assert_eq!(db.host, "db.example.com");
    assert_eq!(db.port, 5432);
    assert_eq!(db.password, "");
}

#[derive(Debug, Default, EnvConf)]
struct OptionalSections {
    pub cache: Option<DbConfig>,
    pub queue: Option<DbConfig>,
}

#[test]
#[serial]
fn test_pointer_stays_none_without_values() {
    let _clear = EnvVars::clear(&[
        "OPT_CACHE_HOST",
        "OPT_CACHE_PORT",
        "OPT_QUEUE_HOST",
        "OPT_QUEUE_PORT",
        "DB_PASSWORD",
    ]);
    let _env = EnvVars::set(&[("OPT_QUEUE_PORT", "5672")]);

    let mut cfg = OptionalSections::default();
    envbind::load_with(&mut cfg, |loader| loader.with_prefix("OPT")).unwrap();

    assert!(cfg.cache.is_none());
    let queue = cfg.queue.expect("queue should be allocated");
    assert_eq!(queue.port, 5672);
    assert_eq!(queue.host, "");
}

#[test]
#[serial]
fn test_nothing_found_leaves_zero_values() {
    let _clear = EnvVars::clear(&[
        "EMPTY_SERVER_TIMEOUT",
        "EMPTY_SERVER_DEBUG",
        "EMPTY_SERVER_NUMBERS",
        "EMPTY_SERVER_SETTINGS",
        "EMPTY_DB_HOST",
        "EMPTY_DB_PORT",
        "EMPTY_SERVER_PORT",
        "HOST",
        "DB_PASSWORD",
    ]);

    let loader = Loader::new().with_prefix("EMPTY");
    let mut cfg = NestedConfig::default();
    let found = loader.bind_record(&mut cfg, &[]).unwrap();

    assert!(!found);
    assert_eq!(cfg.server.host, "");
    assert_eq!(cfg.server.port, 0);
    assert_eq!(cfg.server.timeout, Duration::ZERO);
    assert!(!cfg.server.debug);
    assert!(cfg.server.numbers.is_empty());
    assert!(cfg.server.settings.is_empty());
    assert_eq!(cfg.db.host, "");
}

#[test]
#[serial]
fn test_custom_transformer() {
    let _env = EnvVars::set(&[
        ("db_connection", "postgres://localhost:5432/db"),
        ("api_key", "secret-key"),
        ("user_id", "123"),
    ]);

    let mut cfg = CustomTransformerConfig::default();
    let loader = Loader::new().with_key_transformer(|name| name.to_lowercase());
    loader.load(&mut cfg).unwrap();

    assert_eq!(cfg.db_connection, "postgres://localhost:5432/db");
    assert_eq!(cfg.api_key, "secret-key");
    assert_eq!(cfg.user_id, "123");
}

#[test]
#[serial]
fn test_prefix_and_separator() {
    let _env = EnvVars::set(&[
        ("HOST", "localhost"),
        ("APP.SERVER.PORT", "8080"),
        ("APP.DB.HOST", "db.example.com"),
    ]);

    let mut cfg = NestedConfig::default();
    let loader = Loader::new().with_prefix("APP").with_separator(".");
    loader.load(&mut cfg).unwrap();

    assert_eq!(cfg.server.host, "localhost");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.db.host, "db.example.com");
}

#[test]
#[serial]
fn test_array_separator() {
    let _env = EnvVars::set(&[("NUMBERS", "1;2;3;4")]);

    let mut cfg = BasicConfig::default();
    let loader = Loader::new().with_array_separator(";");
    loader.load(&mut cfg).unwrap();

    assert_eq!(cfg.numbers, vec![1, 2, 3, 4]);
}

#[test]
#[serial]
fn test_error_handling() {
    let cases = [
        ("invalid port number", "PORT", "invalid"),
        ("invalid duration", "TIMEOUT", "invalid"),
        ("invalid bool", "DEBUG", "maybe"),
        ("invalid number element", "NUMBERS", "1,x"),
        ("invalid json map", "SETTINGS", "invalid json"),
    ];

    for (name, key, value) in cases {
        let _clear = EnvVars::clear(&["PORT", "TIMEOUT", "DEBUG", "NUMBERS", "SETTINGS"]);
        let _env = EnvVars::set(&[(key, value)]);

        let mut cfg = BasicConfig::default();
        let err = envbind::load(&mut cfg).expect_err(name);
        assert_eq!(err.key(), Some(key), "{name}");
        assert!(err.to_string().contains(key), "{name}: {err}");
    }
}

#[test]
#[serial]
fn test_malformed_port_aborts_bind() {
    let _env = EnvVars::set(&[("HOST", "localhost"), ("PORT", "abc"), ("DEBUG", "true")]);

    let mut cfg = BasicConfig::default();
    let err = envbind::load(&mut cfg).unwrap_err();

    assert!(matches!(&err, EnvError::Field { key, .. } if key == "PORT"));
    assert!(matches!(err.root_cause(), EnvError::Parse { .. }));
    // Fields before the failing one keep their values.
    assert_eq!(cfg.host, "localhost");
}

#[derive(Debug, Default, EnvConf)]
struct Common {
    pub region: String,
    pub zone: String,
}

#[derive(Debug, Default, EnvConf)]
struct Service {
    #[env(flatten)]
    pub common: Common,
    #[env(alias = "LISTEN")]
    pub address: String,
    #[env(skip)]
    pub cache: Vec<String>,
}

#[derive(Debug, Default, EnvConf)]
struct Deployment {
    pub service: Service,
}

#[test]
#[serial]
fn test_flatten_alias_and_skip() {
    let _env = EnvVars::set(&[
        ("SVC_SERVICE_REGION", "eu-west-1"),
        ("SVC_SERVICE_ZONE", "b"),
        ("SVC_SERVICE_LISTEN", "0.0.0.0:80"),
        ("SVC_SERVICE_CACHE", "ignored"),
    ]);

    let mut cfg = Deployment {
        service: Service {
            cache: vec!["kept".to_string()],
            ..Default::default()
        },
    };
    envbind::load_with(&mut cfg, |loader| loader.with_prefix("SVC")).unwrap();

    assert_eq!(cfg.service.common.region, "eu-west-1");
    assert_eq!(cfg.service.common.zone, "b");
    assert_eq!(cfg.service.address, "0.0.0.0:80");
    assert_eq!(cfg.service.cache, vec!["kept".to_string()]);
}

#[derive(Debug, Default, EnvConf)]
struct ExactNames {
    #[env(name = "EXACT_TOKEN", alias = "IGNORED")]
    pub token: String,
    #[env(alias = "SHORT")]
    pub long_field_name: u8,
}

#[test]
#[serial]
fn test_name_precedence() {
    let _clear = EnvVars::clear(&["PRE_EXACT_TOKEN", "PRE_IGNORED", "SHORT"]);
    let _env = EnvVars::set(&[("EXACT_TOKEN", "t0k3n"), ("PRE_SHORT", "7")]);

    let mut cfg = ExactNames::default();
    envbind::load_with(&mut cfg, |loader| loader.with_prefix("PRE")).unwrap();

    assert_eq!(cfg.token, "t0k3n");
    assert_eq!(cfg.long_field_name, 7);
}

#[derive(Debug, Default, PartialEq)]
enum Level {
    #[default]
    Info,
    Debug,
}

impl TextDecode for Level {
    fn decode_text(&mut self, text: &str) -> anyhow::Result<()> {
        *self = match text {
            "info" => Level::Info,
            "debug" => Level::Debug,
            other => anyhow::bail!("unknown level: {other}"),
        };
        Ok(())
    }
}

#[derive(Debug, Default, EnvConf)]
struct Logging {
    pub level: Level,
    pub levels: Vec<Level>,
    pub fallback: Option<Level>,
    pub limits: BTreeMap<String, u32>,
}

#[test]
#[serial]
fn test_text_decode_capability() {
    let _env = EnvVars::set(&[
        ("LOG_LEVEL", "debug"),
        ("LOG_LEVELS", "info,debug"),
        ("LOG_FALLBACK", "info"),
        ("LOG_LIMITS", r#"{"burst":10}"#),
    ]);

    let mut cfg = Logging::default();
    envbind::load_with(&mut cfg, |loader| loader.with_prefix("LOG")).unwrap();

    assert_eq!(cfg.level, Level::Debug);
    assert_eq!(cfg.levels, vec![Level::Info, Level::Debug]);
    assert_eq!(cfg.fallback, Some(Level::Info));
    assert_eq!(cfg.limits.get("burst"), Some(&10));
}

#[test]
#[serial]
fn test_text_decode_error_is_wrapped_with_key() {
    let _clear = EnvVars::clear(&["LOG_LEVELS", "LOG_FALLBACK", "LOG_LIMITS"]);
    let _env = EnvVars::set(&[("LOG_LEVEL", "verbose")]);

    let mut cfg = Logging::default();
    let err = envbind::load_with(&mut cfg, |loader| loader.with_prefix("LOG")).unwrap_err();

    assert_eq!(err.key(), Some("LOG_LEVEL"));
    match err.root_cause() {
        EnvError::Decode { type_name, source } => {
            assert!(type_name.ends_with("Level"));
            assert_eq!(source.to_string(), "unknown level: verbose");
        }
        other => panic!("Expected Decode error, got {other:?}"),
    }
}

#[derive(Debug, Default, EnvConf)]
struct Strict {
    pub value: Panicky,
}

#[derive(Debug, Default)]
struct Panicky;

impl TextDecode for Panicky {
    fn decode_text(&mut self, _text: &str) -> anyhow::Result<()> {
        panic!("decoder exploded")
    }
}

#[derive(Debug, Default, EnvConf)]
struct Outer {
    pub inner: Strict,
}

#[test]
#[serial]
fn test_panic_is_reported_with_context() {
    let _env = EnvVars::set(&[("GUARD_INNER_VALUE", "x")]);

    let mut cfg = Outer::default();
    let err = envbind::load_with(&mut cfg, |loader| loader.with_prefix("GUARD")).unwrap_err();

    match err {
        EnvError::Panic {
            type_name,
            prefix,
            message,
        } => {
            assert!(type_name.ends_with("Strict"));
            assert_eq!(prefix, "INNER");
            assert_eq!(message, "decoder exploded");
        }
        other => panic!("Expected Panic error, got {other:?}"),
    }
}

#[derive(Debug, Default, Deserialize, PartialEq)]
struct FileSettings {
    pub name: String,
    pub replicas: u32,
}

#[derive(Debug, Default, EnvConf)]
struct FileBacked {
    #[env(name = "FILE_JSON_CONFIG")]
    pub json: JsonFile<FileSettings>,
    #[env(name = "FILE_YAML_CONFIG")]
    pub yaml: Option<YamlFile<FileSettings>>,
    #[env(name = "FILE_SECRET")]
    pub secret: Base64,
}

#[test]
#[serial]
fn test_file_backed_fields() {
    let dir = tempfile::TempDir::new().unwrap();
    let json_path = dir.path().join("app.json");
    fs::write(&json_path, r#"{"name": "$FILE_APP_NAME", "replicas": 3}"#).unwrap();

    let _clear = EnvVars::clear(&["FILE_YAML_CONFIG"]);
    let _env = EnvVars::set(&[
        ("FILE_JSON_CONFIG", json_path.to_str().unwrap()),
        ("FILE_APP_NAME", "api"),
        ("FILE_SECRET", "dGVzdC1zZWNyZXQ="),
    ]);

    let cfg = FileBacked::from_env().unwrap();

    assert_eq!(
        cfg.json.data,
        FileSettings {
            name: "api".to_string(),
            replicas: 3
        }
    );
    assert!(cfg.yaml.is_none());
    assert_eq!(cfg.secret.as_str(), Some("test-secret"));
}

#[test]
#[serial]
fn test_missing_file_error_names_key_and_path() {
    let _clear = EnvVars::clear(&["FILE_YAML_CONFIG", "FILE_SECRET"]);
    let _env = EnvVars::set(&[("FILE_JSON_CONFIG", "/nonexistent/app.json")]);

    let mut cfg = FileBacked::default();
    let err = envbind::load(&mut cfg).unwrap_err();

    assert_eq!(err.key(), Some("FILE_JSON_CONFIG"));
    assert!(matches!(err.root_cause(), EnvError::Decode { .. }));
    assert!(format!("{err}").contains("/nonexistent/app.json"));
}

#[derive(Debug, Default, EnvConf)]
struct Generic<T> {
    pub value: T,
    pub values: Vec<T>,
}

#[test]
#[serial]
fn test_generic_record() {
    let _env = EnvVars::set(&[("GEN_VALUE", "2.5"), ("GEN_VALUES", "1,1.5")]);

    let mut cfg = Generic::<f64>::default();
    envbind::load_with(&mut cfg, |loader| loader.with_prefix("GEN")).unwrap();

    assert_eq!(cfg.value, 2.5);
    assert_eq!(cfg.values, vec![1.0, 1.5]);
}
