use protorest::logging::{init_logging, LogConfig};

fn main() {
    if let Err(e) = init_logging(&LogConfig::from_env()) {
        eprintln!("warning: {e:#}");
    }

    if let Err(e) = protorest::cli::run_cli() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
