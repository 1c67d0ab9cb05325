use anyhow::Result;
use vela::cli::Command;
use vela::{cli, runner};

fn main() -> Result<()> {
    env_logger::init();
    let args = cli::parse_command_line_args();
    let output = match &args.command {
        Command::Layouts { filepath } => runner::layouts(filepath)?,
        Command::Vtables { filepath } => runner::vtables(filepath)?,
        Command::Subtype { filepath, sub, sup } => runner::subtype(filepath, sub, sup)?,
        Command::Ancestors { filepath, class } => runner::ancestors(filepath, class)?,
        Command::Resolve {
            filepath,
            class,
            method,
        } => runner::resolve(filepath, class, method)?,
    };
    println!("{}", output);
    Ok(())
}
