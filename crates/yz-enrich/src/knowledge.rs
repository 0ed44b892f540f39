//! Keyword-scored knowledge base.
//!
//! Records are JSON lines with an `answer`, the `source_text` it came from,
//! and a `segment_index`. Relevance is the share of the question's I Ching
//! keywords that appear in a record.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KnowledgeError, KnowledgeResult};

/// Records shipped with the crate.
const BUILTIN: &str = include_str!("../data/knowledge_base.jsonl");

/// Records scoring at or below this are ignored.
pub const RELEVANCE_THRESHOLD: f64 = 0.1;

/// Default number of contexts returned by a search.
pub const DEFAULT_TOP_K: usize = 5;

/// The fixed keyword vocabulary.
pub const KEYWORDS: &[&str] = &[
    "乾", "坤", "震", "巽", "坎", "离", "艮", "兑", "卦", "爻", "变爻", "世爻", "应爻", "飞神",
    "伏神", "五行", "阴阳", "八卦", "六十四卦", "京氏易传", "预测", "占卜", "吉凶", "旺衰", "生克",
];

/// One knowledge-base record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    /// The explanatory text.
    pub answer: String,
    /// Where the text came from.
    #[serde(default)]
    pub source_text: String,
    /// Position in the source document.
    #[serde(default)]
    pub segment_index: usize,
}

/// A record matched by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredContext {
    /// The record's answer text.
    pub content: String,
    /// The record's source text.
    pub source: String,
    /// Relevance in `(0, 1]`.
    pub score: f64,
    /// The record's segment index.
    pub segment_index: usize,
}

/// Vocabulary keywords present in `text`, in vocabulary order.
pub fn extract_keywords(text: &str) -> Vec<&'static str> {
    KEYWORDS.iter().copied().filter(|k| text.contains(k)).collect()
}

/// Share of `keywords` found in the record's answer or source.
pub fn relevance(keywords: &[&str], record: &KnowledgeRecord) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    let content = format!("{} {}", record.answer, record.source_text);
    let matched = keywords.iter().filter(|k| content.contains(*k)).count();
    matched as f64 / keywords.len() as f64
}

/// An in-memory knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    records: Vec<KnowledgeRecord>,
}

impl KnowledgeBase {
    /// A knowledge base over the given records.
    pub fn from_records(records: Vec<KnowledgeRecord>) -> Self {
        Self { records }
    }

    /// The records shipped with the crate.
    pub fn builtin() -> Self {
        match Self::from_jsonl_str(BUILTIN) {
            Ok(kb) => kb,
            Err(e) => {
                tracing::error!(error = %e, "built-in knowledge base is invalid");
                Self::default()
            }
        }
    }

    /// Parse JSON lines. Blank lines are skipped.
    pub fn from_jsonl_str(text: &str) -> KnowledgeResult<Self> {
        let mut records = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(line)
                .map_err(|source| KnowledgeError::Json { line: i + 1, source })?;
            records.push(record);
        }
        Ok(Self { records })
    }

    /// Load a JSON-lines file.
    pub fn load_jsonl(path: &Path) -> KnowledgeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let kb = Self::from_jsonl_str(&text)?;
        tracing::info!(path = %path.display(), records = kb.len(), "loaded knowledge base");
        Ok(kb)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records.
    pub fn records(&self) -> &[KnowledgeRecord] {
        &self.records
    }

    /// The `top_k` most relevant records scoring above the threshold,
    /// best first.
    pub fn search(&self, question: &str, top_k: usize) -> Vec<ScoredContext> {
        let keywords = extract_keywords(question);
        let mut hits: Vec<ScoredContext> = self
            .records
            .iter()
            .filter_map(|record| {
                let score = relevance(&keywords, record);
                (score > RELEVANCE_THRESHOLD).then(|| ScoredContext {
                    content: record.answer.clone(),
                    source: record.source_text.clone(),
                    score,
                    segment_index: record.segment_index,
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(top_k);
        tracing::debug!(?keywords, hits = hits.len(), "knowledge search");
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(answer: &str, source: &str, index: usize) -> KnowledgeRecord {
        KnowledgeRecord {
            answer: answer.to_string(),
            source_text: source.to_string(),
            segment_index: index,
        }
    }

    #[test]
    fn keywords_in_vocabulary_order() {
        assert_eq!(extract_keywords("变爻和五行有什么关系"), vec!["爻", "变爻", "五行"]);
        assert!(extract_keywords("今天天气").is_empty());
    }

    #[test]
    fn relevance_is_a_share() {
        let r = record("讲五行", "无", 0);
        assert_eq!(relevance(&["五行", "阴阳"], &r), 0.5);
        assert_eq!(relevance(&[], &r), 0.0);
        let r = record("无", "阴阳之道", 0);
        assert_eq!(relevance(&["阴阳"], &r), 1.0);
    }

    #[test]
    fn search_ranks_and_caps() {
        let kb = KnowledgeBase::from_records(vec![
            record("五行生克", "", 0),
            record("阴阳五行", "", 1),
            record("无关内容", "", 2),
        ]);
        let hits = kb.search("五行与阴阳", 5);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].segment_index, 1);
        assert_eq!(hits[0].score, 1.0);
        assert_eq!(hits[1].score, 0.5);
        assert_eq!(kb.search("五行与阴阳", 1).len(), 1);
        assert!(kb.search("今天天气如何", 5).is_empty());
    }

    #[test]
    fn threshold_excludes_weak_matches() {
        // 11 question keywords, one match: 1/11 < 0.1
        let kb = KnowledgeBase::from_records(vec![record("乾", "", 0)]);
        let q = "乾坤震巽坎离艮兑卦预测占卜";
        assert_eq!(extract_keywords(q).len(), 11);
        assert!(kb.search(q, 5).is_empty());
    }

    #[test]
    fn jsonl_parsing() {
        let text = "{\"answer\": \"甲\", \"source_text\": \"乙\", \"segment_index\": 3}\n\n{\"answer\": \"丙\"}\n";
        let kb = KnowledgeBase::from_jsonl_str(text).unwrap();
        assert_eq!(kb.len(), 2);
        assert_eq!(kb.records()[0].segment_index, 3);
        assert_eq!(kb.records()[1].source_text, "");

        let err = KnowledgeBase::from_jsonl_str("{\"answer\": \"甲\"}\nnot json").unwrap_err();
        assert!(matches!(err, KnowledgeError::Json { line: 2, .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.jsonl");
        std::fs::write(&path, "{\"answer\": \"五行\"}\n").unwrap();
        let kb = KnowledgeBase::load_jsonl(&path).unwrap();
        assert_eq!(kb.len(), 1);
        assert!(matches!(
            KnowledgeBase::load_jsonl(&dir.path().join("missing.jsonl")),
            Err(KnowledgeError::Io(_))
        ));
    }

    #[test]
    fn builtin_loads_and_answers() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.len() >= 10);
        let hits = kb.search("什么是变爻？", DEFAULT_TOP_K);
        assert!(!hits.is_empty());
        assert!(hits.len() <= DEFAULT_TOP_K);
        assert!(hits.iter().any(|h| h.content.contains("动爻")));
    }
}
