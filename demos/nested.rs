//! Example demonstrating nested records, prefix and separator

use envbind::{EnvConf, Loader};

#[derive(Debug, Default, EnvConf)]
struct Database {
    pub host: String,
    pub port: u16,

    // Exact names ignore prefix and nesting
    #[env(name = "DB_PASSWORD")]
    pub password: String,
}

#[derive(Debug, Default, EnvConf)]
struct Tls {
    pub cert: String,
    pub key: String,
}

#[derive(Debug, Default, EnvConf)]
struct Config {
    // MYAPP.DB.HOST, MYAPP.DB.PORT
    pub db: Database,

    // Stays None unless MYAPP.TLS.CERT or MYAPP.TLS.KEY is set
    pub tls: Option<Tls>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYAPP.DB.HOST", "db.example.com");
    std::env::set_var("MYAPP.DB.PORT", "5432");
    std::env::set_var("DB_PASSWORD", "secret");

    let loader = Loader::new().with_prefix("MYAPP").with_separator(".");
    let mut config = Config::default();
    loader.load(&mut config)?;

    println!("Configuration with prefix 'MYAPP' and separator '.':");
    println!("  Database: {}:{}", config.db.host, config.db.port);
    println!("  Password set: {}", !config.db.password.is_empty());
    println!("  TLS: {:?}", config.tls);

    Ok(())
}
