use comfy_table::{ContentArrangement, Table};

use super::Options;

pub fn run(options: &Options, filter: Option<&str>) -> Result<(), String> {
    let catalog = options.load_catalog()?;

    let entries: Vec<_> = catalog
        .iter()
        .filter(|h| filter.is_none_or(|f| h.name.contains(f)))
        .collect();

    if entries.is_empty() {
        println!("  No hexagrams found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "卦名", "卦象", "卦辞"]);

    for h in &entries {
        let judgment: String = if h.judgment_text.chars().count() > 24 {
            let head: String = h.judgment_text.chars().take(23).collect();
            format!("{head}…")
        } else {
            h.judgment_text.clone()
        };
        table.add_row(vec![
            h.id.to_string(),
            h.name.clone(),
            h.symbol.to_string(),
            judgment,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} hexagrams", entries.len());

    Ok(())
}
