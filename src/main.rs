//! poppy main entrypoint.

use poppy::run;
use poppy::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(e.exit_code());
    }
}
