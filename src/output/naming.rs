//! Output naming: where the base name of a saved profile comes from.
//!
//! Profiles are named after the log file of the same run, so the two can be
//! matched up: `Log_24-03-09_14-02-33_qm12.wpilog` gets
//! `Log_24-03-09_14-02-33_qm12-profile.json`.

use crate::utils::config::{LOG_DATE_FORMAT, LOG_FILE_PREFIX, PROFILE_SUFFIX};
use chrono::{DateTime, Local, NaiveDateTime};

/// Source of the base name for saved profiles; `None` means nowhere to save
pub trait OutputNaming {
    fn base_name(&self) -> Option<String>;
}

impl OutputNaming for Option<String> {
    fn base_name(&self) -> Option<String> {
        self.clone()
    }
}

/// A fixed base name
#[derive(Debug, Clone)]
pub struct FixedName(pub String);

impl OutputNaming for FixedName {
    fn base_name(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Base name derived from the log file naming scheme:
/// `Log_<yy-MM-dd_HH-mm-ss | random id>[_<match text>]`.
///
/// The timestamp is used once known; until then the random identifier
/// stands in for it.
#[derive(Debug, Clone)]
pub struct LogFileNaming {
    log_date: Option<NaiveDateTime>,
    random_identifier: String,
    match_text: Option<String>,
}

impl LogFileNaming {
    pub fn new(random_identifier: impl Into<String>) -> Self {
        Self {
            log_date: None,
            random_identifier: random_identifier.into(),
            match_text: None,
        }
    }

    pub fn with_log_date(mut self, log_date: NaiveDateTime) -> Self {
        self.log_date = Some(log_date);
        self
    }

    /// Naming for a run started at `started`.
    ///
    /// The identifier comes from the sub-second part of the start time, so
    /// runs do not depend on process ids to stay apart.
    pub fn started_at(started: DateTime<Local>) -> Self {
        Self::new(format!("{:08x}", started.timestamp_subsec_nanos()))
            .with_log_date(started.naive_local())
    }

    pub fn with_match_text(mut self, match_text: impl Into<String>) -> Self {
        self.match_text = Some(match_text.into());
        self
    }
}

impl OutputNaming for LogFileNaming {
    fn base_name(&self) -> Option<String> {
        let mut name = String::from(LOG_FILE_PREFIX);
        match self.log_date {
            Some(date) => name.push_str(&date.format(LOG_DATE_FORMAT).to_string()),
            None => name.push_str(&self.random_identifier),
        }
        if let Some(match_text) = &self.match_text {
            name.push('_');
            name.push_str(match_text);
        }
        Some(name)
    }
}

/// Full file name of the profile for `naming`, `None` if it has no base name
pub fn profile_file_name(naming: &dyn OutputNaming) -> Option<String> {
    naming
        .base_name()
        .map(|base| format!("{}{}", base, PROFILE_SUFFIX))
}
