use diag_serializer_cli::{run_with_args, ExitStatus};

fn main() -> Result<(), anyhow::Error> {
    pretty_env_logger::init();

    match run_with_args(std::env::args_os())? {
        ExitStatus::Success => Ok(()),
        ExitStatus::Error => std::process::exit(1),
    }
}
