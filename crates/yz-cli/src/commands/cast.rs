use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use yz_core::CastMethod;
use yz_core::line::position_name;

use super::Options;

pub fn run(options: &Options, question: &str, json: bool) -> Result<(), String> {
    let mut session = options.session()?;
    session
        .enter_question(question)
        .and_then(|()| session.select_method(CastMethod::ManualCoins))
        .map_err(|e| e.to_string())?;

    let mut tosses = Vec::new();
    while tosses.len() < yz_session::phase::LINES_PER_CAST {
        tosses.push(session.toss().map_err(|e| e.to_string())?);
    }

    if json {
        return super::print_snapshot(&session);
    }

    println!("  {} {question}", "问题".bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["爻位", "铜钱", "爻", "种子"]);
    // Top line first, the way a hexagram is drawn.
    for toss in tosses.iter().rev() {
        let coins: String = toss.coins.iter().map(ToString::to_string).collect();
        let line = toss.line();
        let mark = if line.is_changing() {
            format!("{line} ○")
        } else {
            line.to_string()
        };
        table.add_row(vec![
            position_name(toss.index).to_string(),
            coins,
            mark,
            toss.seed.to_string(),
        ]);
    }
    println!("{table}");

    super::print_reading(&session);
    Ok(())
}
