use std::{env, process};

use expense_ledger::{
    cli::{self, commands, CliError},
    config::ConfigManager,
    init,
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        if matches!(err, CliError::Input(_)) {
            eprintln!("{}", commands::USAGE);
        }
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("shell") => cli::run_cli(),
        Some("help" | "--help" | "-h") => {
            println!("{}", commands::USAGE);
            Ok(())
        }
        Some(_) => commands::run_command(&args, &ConfigManager::new()),
    }
}
