use std::process::ExitCode;

fn main() -> ExitCode {
    term_chart::cli::run()
}
