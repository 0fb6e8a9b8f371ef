// src/main.rs
use closure_minify::cli;

fn main() {
    if let Err(err) = cli::run() {
        cli::report_error(&err);
        std::process::exit(1);
    }
}
