//! Splitting a provider reply into per-aspect sections.
//!
//! Replies are asked to be a JSON object keyed by aspect label. Models do
//! not always comply, so a reply that is not JSON, or whose JSON names no
//! requested aspect, is split on `##` headings instead. Anything that cannot be attributed to a requested
//! aspect is dropped.

use std::collections::BTreeMap;

use yz_core::LifeAspect;

/// How a reply was understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    /// A JSON object keyed by label.
    Json,
    /// `##`-separated sections.
    Headings,
}

/// Sections parsed out of one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// Which parser succeeded.
    pub format: ReplyFormat,
    /// Text per requested aspect. Aspects not found are absent.
    pub sections: BTreeMap<LifeAspect, String>,
}

/// Parse a reply for the requested aspects.
pub fn parse_reply(reply: &str, requested: &[LifeAspect]) -> ParsedReply {
    // A JSON fragment inside prose must not hide the headings around it.
    if let Some(sections) = parse_json(reply, requested).filter(|s| !s.is_empty()) {
        return ParsedReply {
            format: ReplyFormat::Json,
            sections,
        };
    }
    ParsedReply {
        format: ReplyFormat::Headings,
        sections: parse_headings(reply, requested),
    }
}

/// The outermost `{...}` span, which also strips code fences.
fn json_span(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

fn parse_json(reply: &str, requested: &[LifeAspect]) -> Option<BTreeMap<LifeAspect, String>> {
    let value: serde_json::Value = serde_json::from_str(json_span(reply)?).ok()?;
    let object = value.as_object()?;
    let mut sections = BTreeMap::new();
    for (key, value) in object {
        let Some(aspect) = LifeAspect::from_label(key) else {
            continue;
        };
        if !requested.contains(&aspect) {
            continue;
        }
        if let Some(text) = value.as_str() {
            sections.insert(aspect, text.trim().to_string());
        }
    }
    Some(sections)
}

fn parse_headings(reply: &str, requested: &[LifeAspect]) -> BTreeMap<LifeAspect, String> {
    let mut sections = BTreeMap::new();
    for part in reply.split("##") {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        for aspect in requested {
            if sections.contains_key(aspect) {
                continue;
            }
            let body = if let Some((_, rest)) = part.split_once(aspect.label()) {
                Some(rest)
            } else {
                let (heading, rest) = part.split_once('\n').unwrap_or((part, ""));
                heading.contains(aspect.short_name()).then_some(rest)
            };
            if let Some(body) = body {
                let text = body.trim_start_matches(['：', ':', ' ', '"']).trim();
                if !text.is_empty() {
                    sections.insert(*aspect, text.to_string());
                }
                break;
            }
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: [LifeAspect; 2] = [LifeAspect::Career, LifeAspect::TimeFortune];

    #[test]
    fn json_reply() {
        let reply = "```json\n{\"事业（事业发展）\": \"稳步推进\", \"时运（运势分析）\": \"先吉后乱\", \"财运\": \"忽略\"}\n```";
        let parsed = parse_reply(reply, &BOTH);
        assert_eq!(parsed.format, ReplyFormat::Json);
        assert_eq!(parsed.sections[&LifeAspect::Career], "稳步推进");
        assert_eq!(parsed.sections[&LifeAspect::TimeFortune], "先吉后乱");
        assert!(!parsed.sections.contains_key(&LifeAspect::Wealth));
    }

    #[test]
    fn heading_reply() {
        let reply = "前言\n## 事业（事业发展）\n事业内容\n\n## 时运（运势分析）\n时运内容";
        let parsed = parse_reply(reply, &BOTH);
        assert_eq!(parsed.format, ReplyFormat::Headings);
        assert_eq!(parsed.sections[&LifeAspect::Career], "事业内容");
        assert_eq!(parsed.sections[&LifeAspect::TimeFortune], "时运内容");
    }

    #[test]
    fn inline_json_falls_back_to_headings() {
        let reply = "## 事业（事业发展）\n宜稳健，参考配置 {\"k\": 1} 即可。\n## 时运（运势分析）\n先难后易";
        let parsed = parse_reply(reply, &BOTH);
        assert_eq!(parsed.format, ReplyFormat::Headings);
        assert_eq!(parsed.sections[&LifeAspect::Career], "宜稳健，参考配置 {\"k\": 1} 即可。");
        assert_eq!(parsed.sections[&LifeAspect::TimeFortune], "先难后易");
    }

    #[test]
    fn short_heading_names() {
        let reply = "## 事业\n只有短标题";
        let parsed = parse_reply(reply, &BOTH);
        assert_eq!(parsed.sections[&LifeAspect::Career], "只有短标题");
    }

    #[test]
    fn malformed_reply_yields_nothing() {
        let parsed = parse_reply("完全没有结构的一段话", &BOTH);
        assert!(parsed.sections.is_empty());
        let broken_json = parse_reply("{\"事业（事业发展）\": ", &BOTH);
        assert!(broken_json.sections.is_empty());
    }

    #[test]
    fn unrequested_headings_are_ignored() {
        let reply = "## 感情（感情运势）\n不该出现";
        assert!(parse_reply(reply, &BOTH).sections.is_empty());
    }
}
