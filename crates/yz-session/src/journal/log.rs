//! Journal storage and export.

use serde::{Deserialize, Serialize};
use yz_core::line::position_name;

use super::entry::JournalEntry;

/// A chronological log of session events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

fn coins_text(coins: Option<&[yz_core::casting::Coin; 3]>) -> String {
    match coins {
        Some(c) => c.iter().map(ToString::to_string).collect(),
        None => "手动".to_string(),
    }
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# 占卜日志\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::Question { text, .. } => {
                    out.push_str(&format!("## 问题：{text}\n\n"));
                }
                JournalEntry::MethodSelected { method, .. } => {
                    out.push_str(&format!("**起卦方式**: {method}\n\n"));
                }
                JournalEntry::Toss {
                    index,
                    coins,
                    line,
                    seed,
                    ..
                } => {
                    out.push_str(&format!(
                        "- {} [{}] → **{line}**",
                        position_name(*index),
                        coins_text(coins.as_ref())
                    ));
                    if let Some(seed) = seed {
                        out.push_str(&format!(" (seed {seed})"));
                    }
                    out.push('\n');
                }
                JournalEntry::NumberCast { number, seed, .. } => {
                    out.push_str(&format!("**数字起卦**: {number}"));
                    if let Some(seed) = seed {
                        out.push_str(&format!(" (seed {seed})"));
                    }
                    out.push_str("\n\n");
                }
                JournalEntry::CastReset { discarded, .. } => {
                    out.push_str(&format!("*重新起卦，舍弃 {discarded} 爻*\n\n"));
                }
                JournalEntry::Resolution {
                    symbol,
                    hexagram,
                    fallback,
                    transformed,
                    guide,
                    ..
                } => {
                    out.push_str(&format!("\n**本卦**: {hexagram} ({symbol})"));
                    if *fallback {
                        out.push_str(" *默认卦*");
                    }
                    out.push('\n');
                    if let Some(t) = transformed {
                        out.push_str(&format!("**变卦**: {t}\n"));
                    }
                    out.push_str(&format!("**断法**: {guide}\n\n"));
                }
                JournalEntry::Enrichment { sections, .. } => {
                    out.push_str("**解读来源**:\n");
                    for (label, origin) in sections {
                        out.push_str(&format!("- {label}: {origin}\n"));
                    }
                    out.push('\n');
                }
                JournalEntry::FollowUp {
                    question,
                    answer,
                    origin,
                    confidence,
                    ..
                } => {
                    out.push_str(&format!("**追问** ({origin}, {confidence:.1}): {question}\n"));
                    out.push_str(&format!("  {answer}\n\n"));
                }
                JournalEntry::Note { text, .. } => {
                    out.push_str(&format!("> {text}\n\n"));
                }
                JournalEntry::Restart { .. } => {
                    out.push_str("---\n\n");
                }
            }
        }
        out
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("占卜日志\n========\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::Question { text, .. } => {
                    out.push_str(&format!("问题: {text}\n"));
                }
                JournalEntry::MethodSelected { method, .. } => {
                    out.push_str(&format!("起卦方式: {method}\n"));
                }
                JournalEntry::Toss {
                    index, coins, line, ..
                } => {
                    out.push_str(&format!(
                        "  {} [{}] {line}\n",
                        position_name(*index),
                        coins_text(coins.as_ref())
                    ));
                }
                JournalEntry::NumberCast { number, .. } => {
                    out.push_str(&format!("数字起卦: {number}\n"));
                }
                JournalEntry::CastReset { discarded, .. } => {
                    out.push_str(&format!("重新起卦 (舍弃 {discarded} 爻)\n"));
                }
                JournalEntry::Resolution {
                    symbol,
                    hexagram,
                    fallback,
                    transformed,
                    guide,
                    ..
                } => {
                    out.push_str(&format!("本卦: {hexagram} ({symbol})"));
                    if *fallback {
                        out.push_str(" [默认卦]");
                    }
                    out.push('\n');
                    if let Some(t) = transformed {
                        out.push_str(&format!("变卦: {t}\n"));
                    }
                    out.push_str(&format!("断法: {guide}\n\n"));
                }
                JournalEntry::Enrichment { sections, .. } => {
                    let parts: Vec<String> = sections
                        .iter()
                        .map(|(label, origin)| format!("{label}={origin}"))
                        .collect();
                    out.push_str(&format!("解读来源: {}\n\n", parts.join(", ")));
                }
                JournalEntry::FollowUp {
                    question, origin, ..
                } => {
                    out.push_str(&format!("追问 ({origin}): {question}\n"));
                }
                JournalEntry::Note { text, .. } => {
                    out.push_str(&format!("备注: {text}\n\n"));
                }
                JournalEntry::Restart { .. } => {
                    out.push_str("--- 重新开始 ---\n\n");
                }
            }
        }
        out
    }
}
