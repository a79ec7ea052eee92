//! Example demonstrating scalar, sequence and map fields

use std::collections::HashMap;
use std::time::Duration;

use envbind::EnvConf;

#[derive(Debug, Default, EnvConf)]
struct Config {
    // Exact name: always read from HOST
    #[env(name = "HOST")]
    pub host: String,

    // Derived names: PORT, TIMEOUT, DEBUG, ...
    pub port: u16,
    pub timeout: Duration,
    pub debug: bool,

    // Comma-separated list
    pub numbers: Vec<i32>,

    // JSON object
    pub settings: HashMap<String, String>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("HOST", "localhost");
    std::env::set_var("PORT", "8080");
    std::env::set_var("TIMEOUT", "5s");
    std::env::set_var("DEBUG", "true");
    std::env::set_var("NUMBERS", "1,2,3,4");
    std::env::set_var("SETTINGS", r#"{"key":"value"}"#);

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Host: {}", config.host);
    println!("  Port: {}", config.port);
    println!("  Timeout: {:?}", config.timeout);
    println!("  Debug: {}", config.debug);
    println!("  Numbers: {:?}", config.numbers);
    println!("  Settings: {:?}", config.settings);

    Ok(())
}
