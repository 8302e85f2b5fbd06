use std::path::PathBuf;

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Compiles a program into stack machine instructions.")]
pub struct Cli {
    #[arg(help = "Path to file with source code (defaults to the bundled example)")]
    pub source: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
    #[arg(short, long, help = "Silence all log output")]
    pub quiet: bool,
}
