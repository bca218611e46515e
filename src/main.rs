use std::process::ExitCode;

fn main() -> ExitCode {
    match stock_trends_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
