//! Entry point for the bootstrap command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = gazetteer_cli::run() {
        eprintln!("gazetteer: {err}");
        std::process::exit(1);
    }
}
