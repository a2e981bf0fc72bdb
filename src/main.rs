use std::process::ExitCode;

use clap::Parser;

use icon_glyphs::{render_icon, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .format_timestamp(None)
        .init();

    match render_icon(&args) {
        Ok(path) => {
            println!("Ok: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
