//! Interactive grid viewer.
//!
//! Usage: `cargo run --example grid_viewer [options.json]`
//!
//! Without an argument the default Z-up scene with an XY grid is shown.

use infigrid::*;

fn main() -> Result<()> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => ViewerOptions::load_json(path)?,
        None => ViewerOptions::default(),
    };

    show(options)
}
