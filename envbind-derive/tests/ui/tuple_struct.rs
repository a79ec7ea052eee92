// Tuple structs have no field names to derive variable names from

use envbind::EnvConf;

#[derive(EnvConf)]
struct Pair(u16, u16);

fn main() {
    let pair = Pair(1, 2);
    let _sum = pair.0 + pair.1;
}
