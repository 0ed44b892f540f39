use std::io::{self, BufRead, Write};

use colored::Colorize;
use yz_session::Console;

use super::Options;

pub fn run(options: &Options) -> Result<(), String> {
    let session = options.session()?;
    let providers = if options.offline {
        "offline".to_string()
    } else {
        "providers from environment".to_string()
    };
    let mut console = Console::new(session);

    println!("  {} divination session", "Starting".bold());
    println!(
        "  {} hexagrams | {providers}",
        console.session().catalog().len()
    );
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match console.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    Ok(())
}
