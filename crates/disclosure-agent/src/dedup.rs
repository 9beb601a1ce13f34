use dashmap::DashSet;
use disclosure_core::FilingRecord;

/// Receipt numbers already delivered during this process lifetime.
///
/// Entries are never evicted and nothing is persisted; a restart starts
/// empty. Filings without a receipt number cannot be tracked and always
/// pass through.
#[derive(Debug, Default)]
pub struct DedupStore {
    seen: DashSet<String>,
}

impl DedupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_seen(&self, id: &str) -> bool {
        !id.is_empty() && self.seen.contains(id)
    }

    pub fn mark_seen(&self, id: &str) {
        if !id.is_empty() {
            self.seen.insert(id.to_string());
        }
    }

    /// Returns `true` and records `id` if it was unseen. The membership test
    /// and insert happen under the same shard write lock, so two concurrent
    /// callers can never both claim one id.
    pub fn check_and_mark(&self, id: &str) -> bool {
        if id.is_empty() {
            return true;
        }
        self.seen.insert(id.to_string())
    }

    /// Keep only filings not delivered before, marking them as seen.
    pub fn retain_unseen(&self, filings: Vec<FilingRecord>) -> Vec<FilingRecord> {
        filings
            .into_iter()
            .filter(|f| {
                if f.rcept_no.is_empty() {
                    tracing::warn!(
                        "Filing without receipt number passes dedup: {} / {}",
                        f.corp_name,
                        f.report_nm
                    );
                }
                self.check_and_mark(&f.rcept_no)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
