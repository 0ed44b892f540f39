use colored::Colorize;

use super::Options;

pub fn run(options: &Options, question: &str) -> Result<(), String> {
    let question = question.trim();
    if question.is_empty() {
        return Err("please enter a question".into());
    }
    let responder = options.responder()?;
    let answer = responder.answer(&options.enricher(), question, None);

    println!("{answer}");
    println!();
    println!(
        "  {} {} ({:.1})",
        "来源".bold(),
        answer.origin,
        answer.confidence_score
    );
    if !answer.follow_ups.is_empty() {
        println!();
        println!("  {}", "可以继续问".bold());
        for q in &answer.follow_ups {
            println!("  - {q}");
        }
    }
    Ok(())
}
