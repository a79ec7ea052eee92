// Only structs are records; deriving on an enum is rejected

use envbind::EnvConf;

#[derive(EnvConf)]
enum Mode { Fast }

fn main() {
    let _mode = Mode::Fast;
}
