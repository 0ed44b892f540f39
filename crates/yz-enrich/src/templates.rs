//! Deterministic fallback texts.
//!
//! Every text here depends only on the hexagram, the aspect, and the
//! question, so a reading without any provider is still complete and
//! reproducible.

use yz_core::{HexagramDefinition, LifeAspect};

/// Whether a hexagram's judgment reads as favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outlook {
    /// More auspicious than inauspicious markers.
    Favourable,
    /// Balanced or inauspicious.
    Cautious,
}

impl Outlook {
    /// Weigh auspicious markers (吉 亨 利 无咎) against inauspicious ones
    /// (凶 吝 厉 悔 不利 无攸利) in a judgment text.
    pub fn of_judgment(judgment: &str) -> Self {
        let count = |needle: &str| judgment.matches(needle).count() as i64;
        let negated_li = count("不利") + count("无攸利");
        let positive = count("吉") + count("亨") + count("利") - negated_li + count("无咎");
        let negative = count("凶") + count("吝") + count("厉") + count("悔") - count("悔亡")
            + negated_li;
        if positive > negative {
            Self::Favourable
        } else {
            Self::Cautious
        }
    }

    /// Outlook of a hexagram.
    pub fn of(hexagram: &HexagramDefinition) -> Self {
        Self::of_judgment(&hexagram.judgment_text)
    }
}

fn question_or_default(question: &str) -> &str {
    if question.trim().is_empty() {
        "您所问之事"
    } else {
        question
    }
}

/// Aspect-specific guidance lines used inside the default section.
fn aspect_focus(aspect: LifeAspect, outlook: Outlook) -> [&'static str; 2] {
    match (aspect, outlook) {
        (LifeAspect::Career, Outlook::Favourable) => [
            "工作中可主动争取关键机会，把握上升的势头",
            "与同事、上级保持顺畅沟通，借势推进目标",
        ],
        (LifeAspect::Career, Outlook::Cautious) => [
            "工作中宜先稳固基础，不宜贸然跳槽或扩张",
            "遇到阻力时多反思方法，少与人正面冲突",
        ],
        (LifeAspect::Romance, Outlook::Favourable) => [
            "感情中以诚相待，适合增进了解、加深承诺",
            "多创造共处的时间，让关系自然升温",
        ],
        (LifeAspect::Romance, Outlook::Cautious) => [
            "感情中宜冷静倾听，避免情绪化的决定",
            "分歧出现时先求理解，再谈是非",
        ],
        (LifeAspect::Wealth, Outlook::Favourable) => [
            "财务上可以审慎布局，把握稳健的机会",
            "分散配置，收益与风险并重",
        ],
        (LifeAspect::Wealth, Outlook::Cautious) => [
            "财务上以保值为先，远离高风险投机",
            "控制开支，先稳固现有的财务状况",
        ],
        (LifeAspect::Health, Outlook::Favourable) => [
            "身体状态总体平稳，宜趁势调养、增强体质",
            "规律作息，适度运动，保持心情舒畅",
        ],
        (LifeAspect::Health, Outlook::Cautious) => [
            "留意身体发出的信号，不适时及时就医",
            "减少透支，饮食清淡，给身体恢复的空间",
        ],
        (LifeAspect::Household, Outlook::Favourable) => [
            "家中气氛和顺，适合商议家庭大事",
            "多陪伴家人，共同规划居住与生活",
        ],
        (LifeAspect::Household, Outlook::Cautious) => [
            "家中事务宜多商量，避免一人独断",
            "搬迁、装修等大事可稍缓，先理顺关系",
        ],
        (LifeAspect::TimeFortune, Outlook::Favourable) => [
            "整体运势向好，宜顺势而为，积极行动",
            "机会出现时果断把握，同时留有余地",
        ],
        (LifeAspect::TimeFortune, Outlook::Cautious) => [
            "整体运势起伏，宜守正待时，不可冒进",
            "把精力放在能掌控的小事上，积累转机",
        ],
    }
}

/// Default text for one aspect of a reading.
pub fn default_section(hexagram: &HexagramDefinition, aspect: LifeAspect, question: &str) -> String {
    let name = &hexagram.name;
    let symbol = hexagram.symbol;
    let upper = hexagram.upper().chinese_name();
    let lower = hexagram.lower().chinese_name();
    let category = aspect.short_name();
    let question = question_or_default(question);
    let outlook = Outlook::of(hexagram);
    let [focus_a, focus_b] = aspect_focus(aspect, outlook);

    if hexagram.short_name() == "屯" {
        return format!(
            "**卦象核心含义：**\n\
             屯卦象征万物始生之艰难，在{category}方面意味着当前正处于初始阶段，虽然充满希望，\
             但也面临诸多挑战。卦辞“{judgment}”提醒我们，此时需要耐心经营，不可轻举妄动。\n\n\
             **深度解析：**\n\
             屯卦的卦象“{symbol}”（上{upper}下{lower}，云雷交动）体现了初创时期困难与机遇并存。\
             在{category}方面，当前阶段需要积蓄力量，注重基础建设，稳固根基才能长久发展。\n\n\
             **具体建议：**\n\
             • 不要急于求成，先稳固基础，做好准备工作\n\
             • {focus_a}\n\
             • {focus_b}\n\
             • 寻求贵人相助，建立良好的人际关系网络\n\n\
             **针对您的问题：**\n\
             关于“{question}”，屯卦提醒当前需要耐心等待，不可急躁。虽然现状可能不尽如人意，\
             但只要稳扎稳打、循序渐进，未来会有好的发展。重大决策宜待形势更加明朗之后再做。",
            judgment = hexagram.judgment_text,
        );
    }

    format!(
        "**卦象核心含义：**\n\
         {name}的卦象“{symbol}”（上{upper}下{lower}）体现了阴阳消长的规律。从卦辞“{judgment}”\
         和象辞“{image}”可以看出，此卦在{category}方面具有深刻的指导意义：{interpretation}\n\n\
         **深度解析：**\n\
         此卦反映了当前在{category}方面的状态和趋势。卦象的阴阳组合显示了事物发展的规律，\
         提醒我们既要顺应时势，也要发挥主观能动性。\n\n\
         **具体建议：**\n\
         • {focus_a}\n\
         • {focus_b}\n\
         • 在决策时综合考虑各方面因素，不可偏执一端\n\
         • 注重长期规划，不要只看眼前利益\n\n\
         **针对您的问题：**\n\
         关于“{question}”，{name}提醒我们审时度势，把握关键时机，同时保持耐心和坚持。\
         建议根据实际情况灵活调整策略，不可固守一成不变的方法。",
        judgment = hexagram.judgment_text,
        image = hexagram.image_text,
        interpretation = hexagram.interpretation,
    )
}

/// The closing summary of a reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conclusion {
    /// Favourable or cautious.
    pub outlook: Outlook,
    /// 核心总结.
    pub core_summary: String,
    /// 行动建议.
    pub action_advice: String,
}

impl std::fmt::Display for Conclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "【核心总结】{}\n\n【行动建议】{}",
            self.core_summary, self.action_advice
        )
    }
}

/// The aspect a conclusion is specialised for: the first of career,
/// romance, wealth, or health the question mentions.
fn conclusion_focus(question: &str) -> Option<LifeAspect> {
    LifeAspect::detect(question).into_iter().find(|a| {
        matches!(
            a,
            LifeAspect::Career | LifeAspect::Romance | LifeAspect::Wealth | LifeAspect::Health
        )
    })
}

/// Build the conclusion for a hexagram and question.
pub fn conclusion(hexagram: &HexagramDefinition, question: &str) -> Conclusion {
    let outlook = Outlook::of(hexagram);
    let focus = conclusion_focus(question);
    let (field, favourable_tone, cautious_tone) = match focus {
        Some(LifeAspect::Career) => ("事业发展", "宜把握机遇，顺势而为", "需审慎应对，稳中求进"),
        Some(LifeAspect::Romance) => ("感情", "宜以诚相待，用心经营", "需冷静思考，理性处理"),
        Some(LifeAspect::Wealth) => ("财运", "宜审时度势，稳健投资", "需谨慎理财，避免冒险"),
        Some(LifeAspect::Health) => ("健康", "宜注重调养，保持平衡", "需及时关注，适当调理"),
        _ => ("您所问之事", "宜把握时机，顺势而为", "需审慎应对，稳中求进"),
    };
    let tone = match outlook {
        Outlook::Favourable => favourable_tone,
        Outlook::Cautious => cautious_tone,
    };
    let trend = match outlook {
        Outlook::Favourable => "整体趋势向好，内外环境相对和谐，有利于推进目标",
        Outlook::Cautious => "当前可能面临一定的挑战和阻力，需要更多耐心",
    };
    let core_summary = format!(
        "{name}卦象显示，当前{field}方面{tone}。卦辞「{judgment}」揭示了当前阶段的关键特征；\
         从象辞「{image}」来看，{trend}。",
        name = hexagram.name,
        judgment = hexagram.judgment_text,
        image = hexagram.image_text,
    );
    let middle = match outlook {
        Outlook::Favourable => "把握有利时机，积极行动，但需审慎评估风险，避免盲目冒进",
        Outlook::Cautious => "保持耐心，稳扎稳打，先解决内部问题，在合适的时机再采取更大行动",
    };
    let action_advice = format!(
        "1) 理性分析当前形势：将卦象指导与{field}的实际情况相结合，制定切实可行的计划；\n\
         2) {middle}；\n\
         3) 持续观察与调整：至少间隔15天再占同一问题，对比前后卦象，及时调整策略。"
    );
    Conclusion {
        outlook,
        core_summary,
        action_advice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yz_core::Catalog;

    #[test]
    fn outlook_markers() {
        assert_eq!(Outlook::of_judgment("元亨利贞。"), Outlook::Favourable);
        assert_eq!(Outlook::of_judgment("不利有攸往。"), Outlook::Cautious);
        assert_eq!(Outlook::of_judgment("征凶，无攸利。"), Outlook::Cautious);
        assert_eq!(
            Outlook::of_judgment("有孚，窒惕，中吉，终凶。利见大人，不利涉大川。"),
            Outlook::Cautious
        );
        assert_eq!(Outlook::of_judgment("巳日乃孚，元亨利贞，悔亡。"), Outlook::Favourable);
    }

    #[test]
    fn default_sections_are_substantial() {
        let catalog = Catalog::standard();
        for hexagram in catalog.iter() {
            for aspect in LifeAspect::ALL {
                let text = default_section(hexagram, aspect, "问");
                assert!(text.chars().count() >= 200, "{} {aspect}", hexagram.name);
                assert!(text.contains(aspect.short_name()));
            }
        }
    }

    #[test]
    fn zhun_has_its_own_text() {
        let catalog = Catalog::standard();
        let zhun = catalog.by_id(3).unwrap();
        let text = default_section(zhun, LifeAspect::Career, "我今年的事业运势如何？");
        assert!(text.contains("万物始生之艰难"));
        assert!(text.contains("上坎下震"));
        assert!(text.contains("我今年的事业运势如何？"));
    }

    #[test]
    fn conclusion_follows_question() {
        let catalog = Catalog::standard();
        let jiji = catalog.by_id(63).unwrap();
        let c = conclusion(jiji, "我今年的事业运势如何？");
        assert_eq!(c.outlook, Outlook::Favourable);
        assert!(c.core_summary.contains("事业发展"));
        let rendered = c.to_string();
        assert!(rendered.starts_with("【核心总结】"));
        assert!(rendered.contains("【行动建议】"));

        let pi = catalog.by_id(12).unwrap();
        let general = conclusion(pi, "");
        assert_eq!(general.outlook, Outlook::Cautious);
        assert!(general.core_summary.contains("您所问之事"));
    }
}
