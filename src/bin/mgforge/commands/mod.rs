mod build;
mod encode;
mod inspect;

use build::run_build;
use encode::run_encode;
use inspect::run_inspect;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Build(args) => run_build(args, ctx),
        Command::Encode(args) => run_encode(args, ctx),
        Command::Inspect(args) => run_inspect(args, ctx),
    }
}
