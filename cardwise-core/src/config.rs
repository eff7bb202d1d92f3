// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration for duplicate detection

use thiserror::Error;

/// Default score at or above which two contacts are considered duplicates.
pub const DEFAULT_THRESHOLD: u8 = 60;

/// Highest possible match score.
pub const MAX_SCORE: u8 = 100;

/// Public mail providers. Sharing one of these says nothing about two people.
pub const FREE_MAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "outlook.com",
    "hotmail.com",
    "live.com",
    "msn.com",
    "yahoo.com",
    "icloud.com",
    "me.com",
    "mac.com",
    "aol.com",
    "proton.me",
    "protonmail.com",
    "gmx.com",
    "gmx.de",
    "web.de",
    "mail.com",
    "yandex.com",
    "zoho.com",
    "qq.com",
    "163.com",
];

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("threshold {0} is out of range (0-100)")]
    ThresholdOutOfRange(u8),
}

/// Configuration for the deduplication engine
#[derive(Debug, Clone)]
pub struct DedupeConfig {
    /// Minimum score for two contacts to be linked into a group
    pub threshold: u8,

    /// Email domains that never count as a shared-domain signal
    pub ignored_email_domains: Vec<String>,
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            ignored_email_domains: FREE_MAIL_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl DedupeConfig {
    /// Set the grouping threshold
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the ignored email domains
    pub fn with_ignored_email_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_email_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// Checks that all values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold > MAX_SCORE {
            return Err(ConfigError::ThresholdOutOfRange(self.threshold));
        }
        Ok(())
    }
}
