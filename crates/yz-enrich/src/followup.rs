//! Follow-up question helpers.
//!
//! Recommended questions are offered once a reading is ready; derived
//! follow-ups are offered after each answer. Both are pure keyword rules.

use serde::{Deserialize, Serialize};
use yz_core::HexagramDefinition;

/// Most recommended questions returned.
pub const MAX_RECOMMENDED: usize = 5;
/// Most derived follow-ups returned.
pub const MAX_FOLLOW_UPS: usize = 3;

/// The broad kind of a free-form question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Home layout and orientation (风水).
    FengShui,
    /// Dream interpretation (梦境).
    Dream,
    /// Everyday life (日常).
    Daily,
    /// Anything else (综合).
    General,
}

const FENG_SHUI_KEYWORDS: &[&str] = &[
    "风水", "朝向", "楼层", "家具", "客厅", "卧室", "厨房", "财位", "五行", "方位", "属", "生肖",
    "买房", "装修", "布局",
];
const DREAM_KEYWORDS: &[&str] = &["梦", "梦见", "周公", "解梦", "梦境"];
const DAILY_KEYWORDS: &[&str] = &[
    "健康", "饮食", "运动", "工作", "学习", "情感", "家庭", "朋友", "爱情", "事业", "职业", "升职",
    "跳槽", "如何", "怎样", "怎么", "怎么办",
];

fn mentions(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

impl QuestionKind {
    /// Classify a question. Checks feng shui, then dreams, then daily life.
    pub fn detect(question: &str) -> Self {
        if mentions(question, FENG_SHUI_KEYWORDS) {
            Self::FengShui
        } else if mentions(question, DREAM_KEYWORDS) {
            Self::Dream
        } else if mentions(question, DAILY_KEYWORDS) {
            Self::Daily
        } else {
            Self::General
        }
    }

    /// Chinese name.
    pub fn chinese_name(self) -> &'static str {
        match self {
            Self::FengShui => "风水",
            Self::Dream => "梦境",
            Self::Daily => "日常",
            Self::General => "综合",
        }
    }

    /// Example questions of this kind.
    pub fn examples(self) -> &'static [&'static str] {
        match self {
            Self::FengShui => &[
                "客厅沙发应该怎么摆放？",
                "卧室床头朝向有什么讲究？",
                "买房时楼层选择有什么建议？",
            ],
            Self::Dream => &["梦见龙是什么意思？", "梦见水代表什么？", "梦见老人有什么含义？"],
            Self::Daily => &["如何提高工作效率？", "怎样保持身心健康？", "如何改善人际关系？"],
            Self::General => &["请分析一下我的运势", "怎样规划人生发展？", "如何提升个人魅力？"],
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.chinese_name())
    }
}

/// Questions worth asking next, given the question just answered and the
/// answer text.
pub fn suggest_follow_ups(question: &str, answer: &str) -> Vec<&'static str> {
    let list: &[&str] = if mentions(question, &["风水", "朝向", "楼层", "家具", "客厅", "卧室", "厨房"]) {
        &[
            "如何布置这个空间的财位？",
            "这个方位的五行属性是什么？",
            "如何通过调整家具位置改善运势？",
        ]
    } else if mentions(question, &["梦", "梦见", "周公", "解梦"]) {
        &[
            "这个梦境的吉凶程度如何？",
            "梦境中的细节有什么特殊含义？",
            "我应该如何应对这个梦境所预示的情况？",
        ]
    } else if mentions(question, &["感情", "爱情", "恋爱", "婚姻", "伴侣"]) {
        &[
            "如何改善当前的感情状况？",
            "这个感情问题的根本原因是什么？",
            "我应该如何与对方沟通？",
        ]
    } else if mentions(question, &["事业", "工作", "职业", "升职", "跳槽"]) {
        &[
            "我应该在事业上注意什么？",
            "如何提升我的职场运势？",
            "我应该如何规划职业发展？",
        ]
    } else if mentions(question, &["健康", "身体", "疾病", "养生", "饮食"]) {
        &[
            "如何改善我的健康状况？",
            "我应该如何调整生活方式？",
            "有什么预防措施可以采取？",
        ]
    } else if mentions(question, &["财运", "财富", "投资", "理财", "收入"]) {
        &[
            "如何提升我的财运？",
            "这个投资机会是否合适？",
            "有什么需要注意的财务风险？",
        ]
    } else if mentions(answer, &["建议", "应该"]) {
        &[
            "具体应该如何实施这个建议？",
            "实施过程中需要注意什么？",
            "有什么风险需要防范？",
        ]
    } else if question.contains("运势") || answer.contains("运势") {
        &[
            "如何改善当前的运势？",
            "我应该如何把握时机？",
            "需要注意哪些不利因素？",
        ]
    } else {
        &[
            "这个问题还有其他需要注意的方面吗？",
            "我可以从哪些角度深入理解这个问题？",
            "如何将这个问题应用到实际生活中？",
        ]
    };
    list.iter().copied().take(MAX_FOLLOW_UPS).collect()
}

/// Questions recommended once a reading is ready, from the hexagram and
/// the original question. De-duplicated, at most [`MAX_RECOMMENDED`].
pub fn recommended_questions(hexagram: &HexagramDefinition, question: &str) -> Vec<String> {
    let name = hexagram.short_name();
    let by_hexagram: &[&str] = match name {
        "屯" => &[
            "如何在当前运势下把握机遇？",
            "需要注意哪些方面的挑战？",
            "什么时间段运势会好转？",
            "如何改善当前的困境？",
        ],
        "蒙" => &["如何提升自己的认知水平？", "当前的学习方向是否正确？"],
        "需" => &["何时行动最为有利？", "应该如何等待和准备？"],
        "讼" => &["如何化解当前的矛盾冲突？", "应该如何维护自己的权益？"],
        "师" => &["如何组织和管理团队？", "当前是否适合采取行动？"],
        "比" => &["如何建立良好的人际关系？", "当前是否适合合作？"],
        "小畜" | "大畜" => &["如何积累资源和能力？", "当前的投资方向是否正确？"],
        "履" => &["如何谨慎行事避免风险？", "当前的行为是否恰当？"],
        "泰" => &["如何保持当前的良好状态？", "如何进一步扩大优势？"],
        "否" => &["如何扭转当前的不利局面？", "何时会出现转机？"],
        _ => &[
            "如何在当前运势下把握机遇？",
            "需要注意哪些方面的挑战？",
            "什么时间段运势会好转？",
        ],
    };
    let by_question: &[&str] = if mentions(question, &["运势", "运程"]) {
        &["如何改善运势？", "运势的关键转折点在哪里？"]
    } else if mentions(question, &["事业", "工作"]) {
        &["事业发展的关键时机是什么时候？", "如何提升事业运势？"]
    } else if mentions(question, &["感情", "爱情", "恋爱"]) {
        &["感情发展的关键因素是什么？", "如何改善感情关系？"]
    } else if mentions(question, &["财运", "财富"]) {
        &["如何提升财运？", "投资理财的最佳时机是什么时候？"]
    } else if mentions(question, &["健康", "身体"]) {
        &["如何改善健康状况？", "需要注意哪些健康问题？"]
    } else {
        &[]
    };

    let mut out: Vec<String> = Vec::new();
    for q in by_hexagram.iter().chain(by_question) {
        if !out.iter().any(|existing| existing == q) {
            out.push((*q).to_string());
        }
    }
    out.truncate(MAX_RECOMMENDED);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use yz_core::Catalog;

    #[test]
    fn question_kinds() {
        assert_eq!(QuestionKind::detect("客厅沙发怎么摆"), QuestionKind::FengShui);
        assert_eq!(QuestionKind::detect("昨晚梦见一条龙"), QuestionKind::Dream);
        assert_eq!(QuestionKind::detect("如何提高工作效率"), QuestionKind::Daily);
        assert_eq!(QuestionKind::detect("乾卦讲什么"), QuestionKind::General);
        assert_eq!(QuestionKind::detect(""), QuestionKind::General);
    }

    #[test]
    fn follow_ups_are_capped() {
        for (q, a) in [
            ("卧室朝向", ""),
            ("梦见水", ""),
            ("婚姻如何", ""),
            ("跳槽好吗", ""),
            ("养生之道", ""),
            ("投资方向", ""),
            ("什么是爻", "建议多读经典"),
            ("运势", ""),
            ("随便问问", "无"),
        ] {
            let f = suggest_follow_ups(q, a);
            assert!(!f.is_empty() && f.len() <= MAX_FOLLOW_UPS, "{q}");
        }
    }

    #[test]
    fn follow_ups_by_topic() {
        assert_eq!(suggest_follow_ups("婚姻如何", "")[0], "如何改善当前的感情状况？");
        assert_eq!(
            suggest_follow_ups("什么是爻", "建议多读经典")[0],
            "具体应该如何实施这个建议？"
        );
    }

    #[test]
    fn recommended_dedupes_and_caps() {
        let catalog = Catalog::standard();
        let zhun = catalog.by_id(3).unwrap();
        let recs = recommended_questions(zhun, "我今年的事业运势如何？");
        assert_eq!(recs.len(), MAX_RECOMMENDED);
        assert_eq!(recs[0], "如何在当前运势下把握机遇？");
        assert_eq!(recs[4], "如何改善运势？");

        let tai = catalog.by_id(11).unwrap();
        let recs = recommended_questions(tai, "");
        assert_eq!(recs, vec!["如何保持当前的良好状态？", "如何进一步扩大优势？"]);
    }

    #[test]
    fn generic_hexagrams_share_defaults() {
        let catalog = Catalog::standard();
        let recs = recommended_questions(catalog.by_id(63).unwrap(), "感情会好吗");
        assert_eq!(recs.len(), 5);
        assert!(recs.contains(&"如何改善感情关系？".to_string()));
        let unique: std::collections::HashSet<&String> = recs.iter().collect();
        assert_eq!(unique.len(), recs.len());
    }
}
