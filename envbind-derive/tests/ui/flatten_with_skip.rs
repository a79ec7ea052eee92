// A flattened field is bound under its parent, so it cannot be skipped

use envbind::EnvConf;

struct Common;

#[derive(EnvConf)]
struct Config {
    #[env(flatten, skip)] common: Common,
}

fn main() {}
