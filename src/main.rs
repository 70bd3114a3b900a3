use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(docsift::run())
}
