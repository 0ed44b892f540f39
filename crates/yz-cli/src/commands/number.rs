use colored::Colorize;
use yz_core::CastMethod;

use super::Options;

pub fn run(options: &Options, n: u64, question: &str, json: bool) -> Result<(), String> {
    let mut session = options.session()?;
    session
        .enter_question(question)
        .and_then(|()| session.select_method(CastMethod::NumberInput))
        .and_then(|()| session.submit_number(n))
        .map_err(|e| e.to_string())?;

    if json {
        return super::print_snapshot(&session);
    }

    println!("  {} {question}", "问题".bold());
    if let Some(seed) = session.reading().and_then(|r| r.seed) {
        println!("  数字 {n}（seed {seed}）");
    }
    super::print_reading(&session);
    Ok(())
}
