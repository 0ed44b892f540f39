//! Life-aspect categories.
//!
//! A question is scanned for keywords; every category with a matching
//! keyword is requested, in a fixed order. A question that matches nothing
//! asks about general fortune.

use serde::{Deserialize, Serialize};

/// A domain of life a question can be about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeAspect {
    /// General fortune and timing (时运).
    TimeFortune,
    /// Work and career (事业).
    Career,
    /// Love and relationships (感情).
    Romance,
    /// Money and investment (财运).
    Wealth,
    /// Health and body (身体).
    Health,
    /// Home and family (家宅).
    Household,
}

impl LifeAspect {
    /// Detection order.
    pub const ALL: [LifeAspect; 6] = [
        Self::Career,
        Self::Romance,
        Self::Wealth,
        Self::Health,
        Self::Household,
        Self::TimeFortune,
    ];

    /// The section label used in prompts and output, e.g. "事业（事业发展）".
    pub fn label(self) -> &'static str {
        match self {
            Self::TimeFortune => "时运（运势分析）",
            Self::Career => "事业（事业发展）",
            Self::Romance => "感情（感情运势）",
            Self::Wealth => "财运（财富运势）",
            Self::Health => "身体（健康建议）",
            Self::Household => "家宅（家庭和谐）",
        }
    }

    /// The two-character name, e.g. "事业".
    pub fn short_name(self) -> &'static str {
        match self {
            Self::TimeFortune => "时运",
            Self::Career => "事业",
            Self::Romance => "感情",
            Self::Wealth => "财运",
            Self::Health => "身体",
            Self::Household => "家宅",
        }
    }

    /// Keywords that select this category.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Career => &["事业", "工作", "职业", "职场", "升职", "跳槽", "创业"],
            Self::Romance => &["感情", "爱情", "恋爱", "婚姻", "结婚", "分手", "复合", "桃花"],
            Self::Wealth => &["财运", "财富", "投资", "理财", "赚钱", "收入", "经济"],
            Self::Health => &["健康", "身体", "疾病", "生病", "养生", "调理"],
            Self::Household => &["家宅", "家庭", "家居", "房屋", "搬家", "装修"],
            Self::TimeFortune => &["运势", "运程", "时运", "运气", "未来", "前景"],
        }
    }

    /// Whether the question mentions any keyword of this category.
    pub fn matches(self, question: &str) -> bool {
        self.keywords().iter().any(|k| question.contains(k))
    }

    /// Categories requested by a question, in detection order. Never empty.
    pub fn detect(question: &str) -> Vec<LifeAspect> {
        let found: Vec<LifeAspect> = Self::ALL
            .iter()
            .copied()
            .filter(|a| a.matches(question))
            .collect();
        if found.is_empty() {
            vec![Self::TimeFortune]
        } else {
            found
        }
    }

    /// The first specific category of a question, ignoring general fortune
    /// when something more specific matched.
    pub fn dominant(question: &str) -> LifeAspect {
        Self::detect(question)
            .first()
            .copied()
            .unwrap_or(Self::TimeFortune)
    }

    /// Find a category by label, short name, or English name.
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.iter().copied().find(|a| {
            a.label() == s
                || a.short_name() == s
                || s.starts_with(a.short_name())
                || format!("{a:?}").eq_ignore_ascii_case(s)
        })
    }
}

impl std::fmt::Display for LifeAspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_time_fortune() {
        assert_eq!(LifeAspect::detect("今天怎么样"), vec![LifeAspect::TimeFortune]);
        assert_eq!(LifeAspect::detect(""), vec![LifeAspect::TimeFortune]);
    }

    #[test]
    fn example_question() {
        assert_eq!(
            LifeAspect::detect("我今年的事业运势如何？"),
            vec![LifeAspect::Career, LifeAspect::TimeFortune]
        );
        assert_eq!(LifeAspect::dominant("我今年的事业运势如何？"), LifeAspect::Career);
    }

    #[test]
    fn multiple_categories_keep_order() {
        let found = LifeAspect::detect("搬家之后感情和收入会好吗");
        assert_eq!(
            found,
            vec![LifeAspect::Romance, LifeAspect::Wealth, LifeAspect::Household]
        );
    }

    #[test]
    fn labels_round_trip() {
        for a in LifeAspect::ALL {
            assert_eq!(LifeAspect::from_label(a.label()), Some(a));
            assert_eq!(LifeAspect::from_label(a.short_name()), Some(a));
        }
        assert_eq!(LifeAspect::from_label("career"), Some(LifeAspect::Career));
        assert_eq!(LifeAspect::from_label("天气"), None);
    }
}
