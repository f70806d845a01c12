//! rPunchClock main entrypoint.

use env_logger::Env;
use rpunchclock::run;
use rpunchclock::ui::messages;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
