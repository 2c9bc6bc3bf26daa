use std::process::ExitCode;

fn main() -> ExitCode {
    fitfinder_cli::run()
}
