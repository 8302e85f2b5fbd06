use std::sync::LazyLock;

use clap::Parser as _;
use cli::Cli;
use color_eyre::{eyre::Context as _, Result};

mod cli;

pub static ARGS: LazyLock<Cli> = LazyLock::new(Cli::parse);

const EXEMPLO1: &str = "
program exemplo1;
var fat, num, cont: integer;
begin
    read(num);
    fat := 1;
    cont := 2;
    while cont <= num do
    begin
        fat := fat * num;
        cont := cont + 1
    end;
    write(fat)
end.
";

fn main() -> Result<()> {
    color_eyre::install()?;

    stderrlog::new()
        .module(module_path!())
        .module("compiler")
        .quiet(ARGS.quiet)
        .verbosity(usize::from(ARGS.verbose) + 1)
        .init()
        .wrap_err("failed to initialize logging")?;

    let source = match ARGS.source {
        Some(ref source) => {
            log::debug!("compiling {}", source.display());

            std::fs::read_to_string(source).wrap_err("source file does not exist")?
        }
        None => {
            log::debug!("compiling bundled example");

            EXEMPLO1.to_string()
        }
    };

    match compiler::compile(&source) {
        Ok(instructions) => print!("{}", compiler::Listing(&instructions)),
        Err(error) => {
            println!("Error: {error}");
            std::process::exit(1);
        }
    }

    Ok(())
}
