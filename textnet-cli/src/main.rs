use std::fs;

use clap::Parser;
use log::info;

mod args;
mod tasks;

use args::Args;
use tasks::{load_analyzer, Task};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    // Validate the task before touching any input file
    let task = Task::from_args(&args)?;

    let mut analyzer = load_analyzer(&args)?;

    let document = task.run(&mut analyzer)?;
    let output = serde_json::to_string_pretty(&document)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!("result written to {}", path.display());
        }
        None => println!("{output}"),
    }

    Ok(())
}
