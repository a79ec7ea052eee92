//! Example demonstrating file-backed fields and base64 secrets

use envbind::configtype::{Base64, JsonFile};
use envbind::EnvConf;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
}

#[derive(Debug, Default, EnvConf)]
struct AppConfig {
    // DB_CONFIG holds the path of a JSON file
    #[env(name = "DB_CONFIG")]
    pub db: JsonFile<DbConfig>,

    // API_SECRET holds a base64-encoded value
    #[env(name = "API_SECRET")]
    pub secret: Base64,
}

fn main() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join("envbind-demo");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(
        dir.join("db.json"),
        r#"{"host": "$DB_HOST", "port": 5432, "database": "mydb"}"#,
    )?;

    // The path itself may reference other variables
    std::env::set_var("DEMO_DIR", &dir);
    std::env::set_var("DB_HOST", "db.internal");
    std::env::set_var("DB_CONFIG", "${DEMO_DIR}/db.json");
    std::env::set_var("API_SECRET", "dGVzdC1zZWNyZXQ=");

    let mut config = AppConfig::from_env()?;

    println!(
        "Database: {}:{}/{}",
        config.db.data.host, config.db.data.port, config.db.data.database
    );
    println!("Secret: {}", config.secret.as_str().unwrap_or("<binary>"));

    // Pick up changes to the file without touching the environment
    config.db.reload()?;

    Ok(())
}
