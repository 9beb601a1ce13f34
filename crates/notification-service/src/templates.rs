use chrono::{DateTime, FixedOffset};
use disclosure_core::{classify, kst, FilingRecord};

pub const DETAIL_URL_BASE: &str = "https://dart.fss.or.kr/dsaf001/main.do?rcpNo=";

const RULE: &str = "━━━━━━━━━━━━━━━━━━";

/// A filing paired with its category summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub filing: FilingRecord,
    pub summary: String,
}

/// Deduplicated filings ready to render, in delivery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationBatch {
    entries: Vec<BatchEntry>,
}

impl NotificationBatch {
    /// Classify each filing and keep the input order.
    pub fn from_filings(filings: Vec<FilingRecord>) -> Self {
        let entries = filings
            .into_iter()
            .map(|filing| {
                let summary = classify(&filing.report_nm);
                BatchEntry { filing, summary }
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Escape text for Telegram's HTML parse mode, including the single quote
/// that delimits the detail link's `href`.
pub fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&#39;")
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

pub struct AlertTemplate;

impl AlertTemplate {
    /// Render a batch as a single HTML message. `None` for an empty batch:
    /// nothing should be sent.
    pub fn render_batch(batch: &NotificationBatch, now: DateTime<FixedOffset>) -> Option<String> {
        if batch.is_empty() {
            return None;
        }

        let now = now.with_timezone(&kst());
        let mut message = format!(
            "📊 <b>DART 공시 알림</b>\n🕐 {} KST\n{RULE}\n\n",
            now.format("%Y-%m-%d %H:%M")
        );

        for (idx, entry) in batch.entries().iter().enumerate() {
            let filing = &entry.filing;
            let corp_name = escape_html(or_placeholder(&filing.corp_name, "미상"));
            let report_nm = escape_html(or_placeholder(&filing.report_nm, "제목 없음"));
            let rcept_dt = escape_html(&filing.rcept_dt);
            let rcept_no = escape_html(&filing.rcept_no);

            message.push_str(&format!(
                "<b>{}. {corp_name}</b>\n📄 {report_nm}\n⏰ {rcept_dt}\n💡 {}\n🔗 <a href='{DETAIL_URL_BASE}{rcept_no}'>공시 상세보기</a>\n\n",
                idx + 1,
                escape_html(&entry.summary),
            ));
        }

        message.push_str(&format!("{RULE}\n총 {}개의 새로운 공시", batch.len()));

        Some(message)
    }

    /// Connection self-test message listing which secrets are configured.
    pub fn render_connection_test(
        now: DateTime<FixedOffset>,
        business_hours: bool,
        secrets: &[(&str, bool)],
    ) -> String {
        let now = now.with_timezone(&kst());
        let mut message = format!(
            "🔔 <b>DART 공시 알림 봇 연결 테스트</b>\n\n✅ 봇이 정상적으로 연결되었습니다!\n🕐 한국시간: {}\n📊 영업시간: {}\n\n<b>환경변수 상태:</b>\n",
            now.format("%Y-%m-%d %H:%M:%S"),
            if business_hours { "예" } else { "아니오" },
        );

        for (name, configured) in secrets {
            message.push_str(&format!(
                "• {name}: {}\n",
                if *configured { "✅ 설정됨" } else { "❌ 미설정" }
            ));
        }

        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        kst().with_ymd_and_hms(2024, 1, 18, 16, 40, 0).unwrap()
    }

    fn sample_batch() -> NotificationBatch {
        NotificationBatch::from_filings(vec![
            FilingRecord::new("삼성전자", "현금ㆍ현물배당결정", "20240118000123", "20240118 16:32"),
            FilingRecord::new("카카오", "단일판매ㆍ공급계약체결", "20240118000456", "20240118 16:35"),
        ])
    }

    #[test]
    fn test_empty_batch_renders_nothing() {
        assert_eq!(AlertTemplate::render_batch(&NotificationBatch::default(), now()), None);
    }

    #[test]
    fn test_batch_layout() {
        let text = AlertTemplate::render_batch(&sample_batch(), now()).unwrap();

        assert!(text.starts_with("📊 <b>DART 공시 알림</b>\n🕐 2024-01-18 16:40 KST\n"));
        assert!(text.contains("<b>1. 삼성전자</b>\n📄 현금ㆍ현물배당결정\n⏰ 20240118 16:32\n"));
        assert!(text.contains("💡 배당 관련 공시. 주주 배당에 대한 중요 정보입니다.\n"));
        assert!(text.contains(
            "🔗 <a href='https://dart.fss.or.kr/dsaf001/main.do?rcpNo=20240118000456'>공시 상세보기</a>"
        ));
        assert!(text.contains("<b>2. 카카오</b>"));
        assert!(text.ends_with("총 2개의 새로운 공시"));
    }

    #[test]
    fn test_footer_count_matches_batch_len() {
        let filings: Vec<FilingRecord> = (0..7)
            .map(|i| FilingRecord::new("회사", "기타", format!("id{i}"), "20240118 16:30"))
            .collect();
        let batch = NotificationBatch::from_filings(filings);
        let text = AlertTemplate::render_batch(&batch, now()).unwrap();
        assert!(text.ends_with(&format!("총 {}개의 새로운 공시", batch.len())));
        assert!(text.contains("<b>7. 회사</b>"));
    }

    #[test]
    fn test_missing_names_use_placeholders() {
        let batch = NotificationBatch::from_filings(vec![FilingRecord::new("", "", "1", "")]);
        let text = AlertTemplate::render_batch(&batch, now()).unwrap();
        assert!(text.contains("<b>1. 미상</b>"));
        assert!(text.contains("📄 제목 없음"));
    }

    #[test]
    fn test_markup_in_titles_is_escaped() {
        let batch = NotificationBatch::from_filings(vec![FilingRecord::new(
            "A&B <홀딩스>",
            "기타",
            "1",
            "20240118 16:30",
        )]);
        let text = AlertTemplate::render_batch(&batch, now()).unwrap();
        assert!(text.contains("<b>1. A&amp;B &lt;홀딩스&gt;</b>"));
    }

    #[test]
    fn test_receipt_fields_cannot_break_markup() {
        let batch = NotificationBatch::from_filings(vec![FilingRecord::new(
            "회사",
            "기타",
            "1'><b>x</b>",
            "16:30 <i>",
        )]);
        let text = AlertTemplate::render_batch(&batch, now()).unwrap();
        assert!(text.contains("⏰ 16:30 &lt;i&gt;\n"));
        assert!(text.contains("rcpNo=1&#39;&gt;&lt;b&gt;x&lt;/b&gt;'>공시 상세보기</a>"));
        assert!(!text.contains("<i>"));
        assert_eq!(escape_html("O'Neil & Co"), "O&#39;Neil &amp; Co");
    }

    #[test]
    fn test_header_time_is_kst() {
        let utc = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 18, 7, 40, 0)
            .unwrap();
        let text = AlertTemplate::render_batch(&sample_batch(), utc).unwrap();
        assert!(text.contains("🕐 2024-01-18 16:40 KST"));
    }

    #[test]
    fn test_connection_test_lists_secrets() {
        let text = AlertTemplate::render_connection_test(
            now(),
            true,
            &[("DART_API_KEY", true), ("BOT_TOKEN", true), ("CHAT_ID", false)],
        );
        assert!(text.contains("🕐 한국시간: 2024-01-18 16:40:00"));
        assert!(text.contains("📊 영업시간: 예"));
        assert!(text.contains("• DART_API_KEY: ✅ 설정됨\n"));
        assert!(text.contains("• CHAT_ID: ❌ 미설정\n"));
    }
}
