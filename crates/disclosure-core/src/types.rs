use serde::{Deserialize, Serialize};

/// A single filing as listed by the DART `list.json` endpoint.
///
/// Every field defaults to an empty string so a sparse upstream entry still
/// deserializes; the pipeline decides what an empty value means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRecord {
    #[serde(default)]
    pub corp_code: String,
    #[serde(default)]
    pub corp_name: String,
    #[serde(default)]
    pub stock_code: String,
    #[serde(default)]
    pub corp_cls: String,
    /// Report title.
    #[serde(default)]
    pub report_nm: String,
    /// Receipt number, globally unique per filing.
    #[serde(default)]
    pub rcept_no: String,
    #[serde(default)]
    pub flr_nm: String,
    /// Receipt timestamp, `YYYYMMDD HH:MM` in KST with no offset attached.
    #[serde(default)]
    pub rcept_dt: String,
    #[serde(default)]
    pub rm: String,
}

impl FilingRecord {
    pub fn new(
        corp_name: impl Into<String>,
        report_nm: impl Into<String>,
        rcept_no: impl Into<String>,
        rcept_dt: impl Into<String>,
    ) -> Self {
        Self {
            corp_name: corp_name.into(),
            report_nm: report_nm.into(),
            rcept_no: rcept_no.into(),
            rcept_dt: rcept_dt.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleStatus {
    Skip,
    Success,
    Error,
}

/// Terminal state reached by a check cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleStage {
    SkippedOutOfHours,
    NoNewItems,
    AllDuplicates,
    Delivered,
    Failed,
}

/// Structured result handed back to whoever triggered the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleOutcome {
    pub status: CycleStatus,
    pub message: String,
    pub stage: CycleStage,
}

impl CycleOutcome {
    pub fn skip(message: impl Into<String>) -> Self {
        Self {
            status: CycleStatus::Skip,
            message: message.into(),
            stage: CycleStage::SkippedOutOfHours,
        }
    }

    pub fn success(stage: CycleStage, message: impl Into<String>) -> Self {
        Self {
            status: CycleStatus::Success,
            message: message.into(),
            stage,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CycleStatus::Error,
            message: message.into(),
            stage: CycleStage::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CycleStatus::Success
    }
}
