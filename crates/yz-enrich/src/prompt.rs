//! Prompt construction.

use yz_core::LifeAspect;

use crate::config::EnrichmentConfig;
use crate::enrich::EnrichmentRequest;
use crate::provider::ChatPrompt;

/// System message for enrichment.
pub const ENRICH_SYSTEM: &str = "你是一位精通易经的专家，擅长详细、深入、全面地解读卦象的含义。\
请提供详细、丰富、实用的解答，每个方面200-300字，内容要精炼但有深度。";

/// System message for follow-up questions.
pub const QA_SYSTEM: &str = "你是一个专业的周易理论专家，请基于提供的上下文信息回答用户的问题。\
请提供详细、准确、有深度的回答，结合传统易经理论和现代应用。";

fn question_or_placeholder(question: &str) -> &str {
    if question.trim().is_empty() {
        "未指定具体问题"
    } else {
        question
    }
}

fn labels(aspects: &[LifeAspect]) -> Vec<&'static str> {
    aspects.iter().map(|a| a.label()).collect()
}

/// The output contract appended to both enrichment prompts.
fn output_contract(aspects: &[LifeAspect]) -> String {
    let keys = labels(aspects)
        .iter()
        .map(|l| format!("  \"{l}\": \"……\""))
        .collect::<Vec<_>>()
        .join(",\n");
    let sections = labels(aspects)
        .iter()
        .map(|l| format!("## {l}\n[详细解读内容]"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "请只输出一个JSON对象，键为以下方面名称，值为对应的解读文本：\n{{\n{keys}\n}}\n\n\
         如果无法输出JSON，请按以下格式输出，每个方面用\"##\"分隔：\n{sections}"
    )
}

/// The full enrichment prompt.
pub fn enrichment_prompt(request: &EnrichmentRequest, config: &EnrichmentConfig) -> ChatPrompt {
    let aspects = labels(&request.aspects).join("、");
    let user = format!(
        "请根据以下信息，详细解读{name}在占卜问题相关方面的含义：\n\n\
         卦名：{name}\n卦象：{symbol}\n卦辞：{judgment}\n象辞：{image}\n占卜问题：{question}\n\n\
         请针对以下方面提供详细、丰富、深入的解释（每个方面200-300字）：{aspects}\n\
         要求：\n\
         1. 深入分析该卦象在此方面的象征意义和深层含义，结合易经原理详细阐述\n\
         2. 结合卦辞、象辞进行详细解读\n\
         3. 提供具体的指导建议、行动步骤和注意事项，要有可操作性\n\
         4. 结合占卜问题给出针对性的分析和建议，直接回答用户的问题\n\
         5. 语言通俗易懂，具有实用价值\n\n{contract}",
        name = request.hexagram.name,
        symbol = request.hexagram.symbol,
        judgment = request.hexagram.judgment_text,
        image = request.hexagram.image_text,
        question = question_or_placeholder(&request.question),
        contract = output_contract(&request.aspects),
    );
    ChatPrompt {
        system: ENRICH_SYSTEM.to_string(),
        user,
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    }
}

/// The shorter prompt used for the last retry.
pub fn simplified_prompt(request: &EnrichmentRequest, config: &EnrichmentConfig) -> ChatPrompt {
    let list = labels(&request.aspects)
        .iter()
        .map(|l| format!("- {l}"))
        .collect::<Vec<_>>()
        .join("\n");
    let user = format!(
        "请详细解读{name}关于\"{question}\"这个问题的含义。\n\n\
         卦名：{name}\n卦象：{symbol}\n卦辞：{judgment}\n象辞：{image}\n\n\
         请针对以下方面提供详细解释（每个方面200-300字）：\n{list}\n\n{contract}",
        name = request.hexagram.name,
        question = question_or_placeholder(&request.question),
        symbol = request.hexagram.symbol,
        judgment = request.hexagram.judgment_text,
        image = request.hexagram.image_text,
        contract = output_contract(&request.aspects),
    );
    ChatPrompt {
        system: ENRICH_SYSTEM.to_string(),
        user,
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    }
}

/// A follow-up question prompt, with knowledge-base context and the
/// current reading if there is one.
pub fn qa_prompt(
    question: &str,
    context: &[String],
    reading_summary: Option<&str>,
    config: &EnrichmentConfig,
) -> ChatPrompt {
    let mut user = format!("问题：{question}\n");
    if let Some(summary) = reading_summary {
        user.push_str(&format!("\n当前卦象：{summary}\n"));
    }
    if !context.is_empty() {
        user.push_str("\n相关上下文：\n");
        for (i, c) in context.iter().enumerate() {
            user.push_str(&format!("上下文{}:\n{c}\n", i + 1));
        }
    }
    user.push_str("\n请基于以上信息，提供详细的回答。");
    ChatPrompt {
        system: QA_SYSTEM.to_string(),
        user,
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    }
}
