use std::process::ExitCode;

fn main() -> ExitCode {
    zipcrack::cli::main()
}
