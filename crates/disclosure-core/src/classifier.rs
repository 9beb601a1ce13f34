use serde::{Deserialize, Serialize};

/// Disclosure category inferred from a report title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisclosureCategory {
    CapitalChange,
    Dividend,
    Earnings,
    ExecutiveChange,
    MergerAcquisition,
    Contract,
    Litigation,
    General,
}

/// Keyword groups in priority order. The first group with a keyword contained
/// in the title wins, so a title mentioning both 배당 and 소송 is a dividend
/// filing.
pub const CATEGORY_CASCADE: &[(DisclosureCategory, &[&str])] = &[
    (DisclosureCategory::CapitalChange, &["증자", "감자"]),
    (DisclosureCategory::Dividend, &["배당"]),
    (DisclosureCategory::Earnings, &["실적", "매출"]),
    (DisclosureCategory::ExecutiveChange, &["임원", "대표이사"]),
    (DisclosureCategory::MergerAcquisition, &["합병", "인수"]),
    (DisclosureCategory::Contract, &["계약"]),
    (DisclosureCategory::Litigation, &["소송"]),
];

impl DisclosureCategory {
    /// Two-line summary shown under the filing in the alert.
    pub fn summary(&self, title: &str) -> String {
        match self {
            DisclosureCategory::CapitalChange => {
                format!("자본금 변동 공시. {title}에 대한 결정사항입니다.")
            }
            DisclosureCategory::Dividend => {
                "배당 관련 공시. 주주 배당에 대한 중요 정보입니다.".to_string()
            }
            DisclosureCategory::Earnings => {
                "실적 공시. 회사의 재무성과에 대한 정보입니다.".to_string()
            }
            DisclosureCategory::ExecutiveChange => {
                "경영진 변동 공시. 회사 임원진 관련 변경사항입니다.".to_string()
            }
            DisclosureCategory::MergerAcquisition => {
                "M&A 관련 공시. 기업 인수합병 관련 중요 정보입니다.".to_string()
            }
            DisclosureCategory::Contract => {
                "주요 계약 공시. 회사의 중요 계약 체결 정보입니다.".to_string()
            }
            DisclosureCategory::Litigation => {
                "소송 관련 공시. 법적 분쟁에 대한 정보입니다.".to_string()
            }
            DisclosureCategory::General => {
                format!("{title}. 회사의 주요 경영사항에 대한 공시입니다.")
            }
        }
    }
}

pub fn categorize(title: &str) -> DisclosureCategory {
    CATEGORY_CASCADE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| title.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(DisclosureCategory::General)
}

/// Best-effort summary for a report title.
pub fn classify(title: &str) -> String {
    categorize(title).summary(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_group_matches() {
        assert_eq!(categorize("유상증자결정"), DisclosureCategory::CapitalChange);
        assert_eq!(categorize("감자결정"), DisclosureCategory::CapitalChange);
        assert_eq!(categorize("현금ㆍ현물배당결정"), DisclosureCategory::Dividend);
        assert_eq!(categorize("연결재무제표기준영업(잠정)실적(공정공시)"), DisclosureCategory::Earnings);
        assert_eq!(categorize("매출액또는손익구조30%이상변경"), DisclosureCategory::Earnings);
        assert_eq!(categorize("대표이사변경"), DisclosureCategory::ExecutiveChange);
        assert_eq!(categorize("임원ㆍ주요주주특정증권등소유상황보고서"), DisclosureCategory::ExecutiveChange);
        assert_eq!(categorize("회사합병결정"), DisclosureCategory::MergerAcquisition);
        assert_eq!(categorize("단일판매ㆍ공급계약체결"), DisclosureCategory::Contract);
        assert_eq!(categorize("소송등의제기"), DisclosureCategory::Litigation);
    }

    #[test]
    fn test_earlier_group_wins_tie() {
        assert_eq!(categorize("배당 관련 소송 제기"), DisclosureCategory::Dividend);
        assert_eq!(
            classify("배당 관련 소송 제기"),
            "배당 관련 공시. 주주 배당에 대한 중요 정보입니다."
        );
        // capital change outranks M&A
        assert_eq!(categorize("합병에 따른 감자"), DisclosureCategory::CapitalChange);
    }

    #[test]
    fn test_fallback_echoes_title() {
        assert_eq!(
            classify("기업설명회(IR)개최"),
            "기업설명회(IR)개최. 회사의 주요 경영사항에 대한 공시입니다."
        );
    }

    #[test]
    fn test_capital_change_interpolates_title() {
        assert_eq!(
            classify("유상증자결정"),
            "자본금 변동 공시. 유상증자결정에 대한 결정사항입니다."
        );
    }

    #[test]
    fn test_cascade_order_is_declared_once() {
        let order: Vec<DisclosureCategory> = CATEGORY_CASCADE.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            order,
            vec![
                DisclosureCategory::CapitalChange,
                DisclosureCategory::Dividend,
                DisclosureCategory::Earnings,
                DisclosureCategory::ExecutiveChange,
                DisclosureCategory::MergerAcquisition,
                DisclosureCategory::Contract,
                DisclosureCategory::Litigation,
            ]
        );
    }
}
