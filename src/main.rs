use std::process::ExitCode;

fn main() -> ExitCode {
    match labelindex::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            labelindex::print_error(&err);
            ExitCode::FAILURE
        }
    }
}
