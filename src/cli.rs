use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[clap(name = "vela", author, version, about)]
pub struct Arguments {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the instance layout of each class
    Layouts { filepath: PathBuf },
    /// Print the vtable of each class
    Vtables { filepath: PathBuf },
    /// Tell if `sub` is a subtype of `sup`
    Subtype {
        filepath: PathBuf,
        sub: String,
        sup: String,
    },
    /// Print the superclass chain of a class
    Ancestors { filepath: PathBuf, class: String },
    /// Print which method body a call is dispatched to
    Resolve {
        filepath: PathBuf,
        class: String,
        method: String,
    },
}

pub fn parse_command_line_args() -> Arguments {
    Arguments::parse()
}
