//! Follow-up question answering.
//!
//! A question is answered by the first provider that replies, with the
//! best knowledge-base matches as context. Without a provider the answer is
//! assembled from the knowledge base alone; when nothing matches, a canned
//! answer chosen by hashing the question is returned. Answering never fails.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::enrich::Enricher;
use crate::followup::suggest_follow_ups;
use crate::knowledge::{DEFAULT_TOP_K, KnowledgeBase, ScoredContext};
use crate::prompt::qa_prompt;

const STEP_ANALYSIS: &str = "步骤1：分析问题关键词 - 识别问题中的周易理论要素\n\
步骤2：检索相关上下文 - 从知识库中找到相关的卦象、爻辞等内容\n\
步骤3：理解传统理论 - 结合京氏易传等经典理论进行解读\n\
步骤4：现代应用分析 - 将传统理论与现代生活相结合\n\
步骤5：综合归纳总结 - 基于以上分析得出完整答案";

const REASONING_SUMMARY: &str =
    "通过关键词分析、上下文检索、理论解读、现代应用和综合归纳五个步骤，基于传统周易理论提供专业回答。";

const CANNED_ANSWERS: [&str; 4] = [
    "根据易经理论，这个问题涉及到阴阳平衡的智慧。从周易的角度来看，需要结合天时地利人和来考虑。",
    "易经告诉我们，变化是永恒的，需要顺应自然规律。根据卦象分析，建议保持中庸之道，不可偏激。",
    "从传统易经理论出发，这个问题体现了阴阳互动的哲学思想。建议您保持内心的平衡，顺应时势变化。",
    "根据周易的智慧，万物皆有定数，但也需要人为的努力。建议您既要有耐心，也要有行动力。",
];

/// Confidence reported when the knowledge base has nothing relevant.
pub const NO_CONTEXT_CONFIDENCE: f64 = 0.3;

/// Where an answer came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "provider", rename_all = "snake_case")]
pub enum AnswerOrigin {
    /// Written by the named provider.
    Provider(String),
    /// Assembled from knowledge-base matches.
    Knowledge,
    /// Nothing matched; a canned answer.
    Canned,
}

impl std::fmt::Display for AnswerOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider(name) => write!(f, "{name}"),
            Self::Knowledge => write!(f, "knowledge"),
            Self::Canned => write!(f, "canned"),
        }
    }
}

/// A structured answer to a follow-up question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaAnswer {
    /// The question answered.
    pub question: String,
    /// How the answer was reasoned.
    pub step_by_step_analysis: String,
    /// One-line summary of the reasoning.
    pub reasoning_summary: String,
    /// The answer itself.
    pub final_answer: String,
    /// Abbreviated sources, numbered from 1.
    pub relevant_sources: Vec<String>,
    /// Confidence in `[0, 0.9]`.
    pub confidence_score: f64,
    /// Where the answer came from.
    pub origin: AnswerOrigin,
    /// Suggested next questions.
    pub follow_ups: Vec<String>,
}

impl std::fmt::Display for QaAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "**分步分析：**\n{}\n", self.step_by_step_analysis)?;
        writeln!(f, "**推理总结：**\n{}\n", self.reasoning_summary)?;
        let sources = if self.relevant_sources.is_empty() {
            "暂无相关来源".to_string()
        } else {
            self.relevant_sources.join("，")
        };
        writeln!(f, "**相关来源：**\n{sources}\n")?;
        write!(f, "**最终答案：**\n{}", self.final_answer)
    }
}

/// Confidence for a number of matched contexts.
pub fn confidence_for(matches: usize) -> f64 {
    (0.5 + 0.1 * matches as f64).min(0.9)
}

/// The canned answer for a question. The same question always gets the
/// same answer.
pub fn canned_answer(question: &str) -> &'static str {
    let digest = Sha256::digest(question.as_bytes());
    let index = usize::from(digest[0]) % CANNED_ANSWERS.len();
    CANNED_ANSWERS[index]
}

fn source_lines(contexts: &[ScoredContext]) -> Vec<String> {
    contexts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let short: String = c.source.chars().take(100).collect();
            format!("来源{}: {short}...", i + 1)
        })
        .collect()
}

fn knowledge_answer(question: &str, contexts: &[ScoredContext]) -> String {
    let mut out = format!("基于知识库中的周易理论，回答您的问题：{question}\n\n");
    for c in contexts.iter().take(3) {
        out.push_str(&c.content);
        out.push('\n');
    }
    out.push_str(
        "\n在实际运用中，需要综合考虑卦象的变化、爻位的旺衰以及阴阳的消长，\
         既尊重传统理论的深度，也结合自身的实际情况理性判断。",
    );
    out
}

/// Answers follow-up questions.
#[derive(Debug, Clone, Default)]
pub struct QaResponder {
    knowledge: KnowledgeBase,
}

impl QaResponder {
    /// A responder over a knowledge base.
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self { knowledge }
    }

    /// A responder over the built-in knowledge base.
    pub fn builtin() -> Self {
        Self::new(KnowledgeBase::builtin())
    }

    /// The knowledge base.
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Answer a question. `reading_summary` describes the current reading,
    /// if there is one, and is passed to providers as context.
    pub fn answer(&self, enricher: &Enricher, question: &str, reading_summary: Option<&str>) -> QaAnswer {
        let contexts = self.knowledge.search(question, DEFAULT_TOP_K);
        let texts: Vec<String> = contexts.iter().map(|c| c.content.clone()).collect();

        let prompt = qa_prompt(question, &texts, reading_summary, enricher.config());
        let mut answer = if let Some(reply) = enricher.ask(&prompt, 1) {
            QaAnswer {
                question: question.to_string(),
                step_by_step_analysis: STEP_ANALYSIS.to_string(),
                reasoning_summary: REASONING_SUMMARY.to_string(),
                final_answer: reply.text,
                relevant_sources: source_lines(&contexts),
                confidence_score: confidence_for(contexts.len()),
                origin: AnswerOrigin::Provider(reply.provider),
                follow_ups: Vec::new(),
            }
        } else if !contexts.is_empty() {
            QaAnswer {
                question: question.to_string(),
                step_by_step_analysis: STEP_ANALYSIS.to_string(),
                reasoning_summary: REASONING_SUMMARY.to_string(),
                final_answer: knowledge_answer(question, &contexts),
                relevant_sources: source_lines(&contexts),
                confidence_score: confidence_for(contexts.len()),
                origin: AnswerOrigin::Knowledge,
                follow_ups: Vec::new(),
            }
        } else {
            tracing::debug!(question, "no knowledge match, using canned answer");
            QaAnswer {
                question: question.to_string(),
                step_by_step_analysis: "未找到相关上下文，基于通用周易理论进行分析".to_string(),
                reasoning_summary: "基于通用理论进行推理".to_string(),
                final_answer: format!(
                    "抱歉，在知识库中未找到与'{question}'直接相关的内容。建议您提供更具体的问题，\
                     或参考传统周易理论进行理解。\n\n{}",
                    canned_answer(question)
                ),
                relevant_sources: Vec::new(),
                confidence_score: NO_CONTEXT_CONFIDENCE,
                origin: AnswerOrigin::Canned,
                follow_ups: Vec::new(),
            }
        };
        answer.follow_ups = suggest_follow_ups(question, &answer.final_answer)
            .into_iter()
            .map(str::to_string)
            .collect();
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnrichmentConfig;
    use crate::error::{ProviderError, ProviderResult};
    use crate::provider::{ChatPrompt, TextProvider};
    use std::sync::{Arc, Mutex};

    struct Echo {
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl TextProvider for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn complete(&self, prompt: &ChatPrompt) -> ProviderResult<String> {
            self.prompts.lock().unwrap().push(prompt.user.clone());
            Ok("变爻是由老阳老阴变化而来的爻。".to_string())
        }
    }

    struct Down;

    impl TextProvider for Down {
        fn name(&self) -> &str {
            "down"
        }

        fn complete(&self, _prompt: &ChatPrompt) -> ProviderResult<String> {
            Err(ProviderError::EmptyResponse("down".to_string()))
        }
    }

    #[test]
    fn confidence_grows_and_caps() {
        assert_eq!(confidence_for(0), 0.5);
        assert!((confidence_for(2) - 0.7).abs() < 1e-9);
        assert_eq!(confidence_for(5), 0.9);
        assert_eq!(confidence_for(9), 0.9);
    }

    #[test]
    fn canned_answer_is_stable() {
        let a = canned_answer("人生的意义是什么？");
        assert_eq!(a, canned_answer("人生的意义是什么？"));
        assert!(CANNED_ANSWERS.contains(&a));
    }

    #[test]
    fn provider_answer_carries_context() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let enricher = Enricher::new(
            vec![Box::new(Down), Box::new(Echo { prompts: prompts.clone() })],
            EnrichmentConfig::default(),
        );
        let qa = QaResponder::builtin();
        let answer = qa.answer(&enricher, "什么是变爻？", Some("既济卦 101010"));
        assert_eq!(answer.origin, AnswerOrigin::Provider("echo".to_string()));
        assert!(answer.final_answer.contains("老阳老阴"));
        assert!(!answer.relevant_sources.is_empty());
        assert!(answer.relevant_sources[0].starts_with("来源1: "));
        assert!(answer.follow_ups.len() <= 3);

        let seen = prompts.lock().unwrap();
        assert!(seen[0].contains("上下文1:"));
        assert!(seen[0].contains("当前卦象：既济卦 101010"));
    }

    #[test]
    fn offline_answers_from_knowledge() {
        let qa = QaResponder::builtin();
        let answer = qa.answer(&Enricher::default(), "五行生克怎么看？", None);
        assert_eq!(answer.origin, AnswerOrigin::Knowledge);
        assert!(answer.final_answer.contains("五行"));
        assert!(answer.confidence_score > 0.5);
        assert!(answer.step_by_step_analysis.starts_with("步骤1"));
    }

    #[test]
    fn unmatched_question_gets_canned_answer() {
        let qa = QaResponder::builtin();
        let answer = qa.answer(&Enricher::default(), "今天午饭吃什么好", None);
        assert_eq!(answer.origin, AnswerOrigin::Canned);
        assert_eq!(answer.confidence_score, NO_CONTEXT_CONFIDENCE);
        assert!(answer.final_answer.contains("今天午饭吃什么好"));
        assert!(answer.final_answer.ends_with(canned_answer("今天午饭吃什么好")));
        assert!(answer.relevant_sources.is_empty());
        assert_eq!(answer.follow_ups.len(), 3);
    }

    #[test]
    fn display_has_all_parts() {
        let qa = QaResponder::new(KnowledgeBase::default());
        let text = qa.answer(&Enricher::default(), "随便", None).to_string();
        assert!(text.contains("**分步分析：**"));
        assert!(text.contains("暂无相关来源"));
        assert!(text.contains("**最终答案：**"));
    }
}
