use std::process::ExitCode;

fn main() -> ExitCode {
    match msglogd::run_daemon() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("msglogd: {error}");
            ExitCode::FAILURE
        }
    }
}
