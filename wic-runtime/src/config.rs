// WIC - wic-runtime
// Module: Intrinsics configuration
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Configuration of the context-bound intrinsics.

use wic_error::{Error, Result};
use wic_logging::LogLevel;

use crate::memory::MAX_PAGES;

/// Environment variable overriding [`IntrinsicsConfig::page_ceiling`].
pub const ENV_PAGE_CEILING: &str = "WIC_PAGE_CEILING";
/// Environment variable overriding [`IntrinsicsConfig::trace_calls`].
pub const ENV_TRACE_CALLS: &str = "WIC_TRACE_CALLS";
/// Environment variable overriding [`IntrinsicsConfig::log_signature_mismatch`].
pub const ENV_LOG_SIGNATURE_MISMATCH: &str = "WIC_LOG_SIGNATURE_MISMATCH";
/// Environment variable overriding [`IntrinsicsConfig::trace_level`].
pub const ENV_TRACE_LEVEL: &str = "WIC_TRACE_LEVEL";

/// Intrinsics configuration builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntrinsicsConfig {
    /// Largest page count `growMemory` may reach. At most [`MAX_PAGES`].
    pub page_ceiling: u32,
    /// Whether a signature mismatch emits a diagnostic event
    pub log_signature_mismatch: bool,
    /// Whether the debug enter/exit/break intrinsics produce output
    pub trace_calls: bool,
    /// Level of the lines the debug intrinsics emit
    pub trace_level: LogLevel,
}

impl Default for IntrinsicsConfig {
    fn default() -> Self {
        Self {
            page_ceiling: MAX_PAGES,
            log_signature_mismatch: true,
            trace_calls: false,
            trace_level: LogLevel::Debug,
        }
    }
}

impl IntrinsicsConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page ceiling
    #[must_use]
    pub fn with_page_ceiling(mut self, pages: u32) -> Self {
        self.page_ceiling = pages;
        self
    }

    /// Enable or disable signature-mismatch diagnostics
    #[must_use]
    pub fn with_signature_mismatch_logging(mut self, enabled: bool) -> Self {
        self.log_signature_mismatch = enabled;
        self
    }

    /// Enable or disable call tracing
    #[must_use]
    pub fn with_call_tracing(mut self, enabled: bool) -> Self {
        self.trace_calls = enabled;
        self
    }

    /// Set the level of call tracing output
    #[must_use]
    pub fn with_trace_level(mut self, level: LogLevel) -> Self {
        self.trace_level = level;
        self
    }

    /// Checks the settings against engine limits.
    pub fn validate(&self) -> Result<()> {
        if self.page_ceiling > MAX_PAGES {
            return Err(Error::configuration_error(
                "Page ceiling exceeds the 65536-page engine maximum",
            ));
        }
        Ok(())
    }

    /// Applies overrides from a key lookup, then validates.
    ///
    /// Missing keys keep their defaults.
    pub fn from_lookup<F, S>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_PAGE_CEILING) {
            config.page_ceiling = value
                .as_ref()
                .trim()
                .parse()
                .map_err(|_| Error::configuration_parse_error("WIC_PAGE_CEILING is not a page count"))?;
        }
        if let Some(value) = lookup(ENV_TRACE_CALLS) {
            config.trace_calls = parse_flag(value.as_ref())
                .ok_or(Error::configuration_parse_error("WIC_TRACE_CALLS is not a boolean"))?;
        }
        if let Some(value) = lookup(ENV_LOG_SIGNATURE_MISMATCH) {
            config.log_signature_mismatch = parse_flag(value.as_ref()).ok_or(
                Error::configuration_parse_error("WIC_LOG_SIGNATURE_MISMATCH is not a boolean"),
            )?;
        }
        if let Some(value) = lookup(ENV_TRACE_LEVEL) {
            config.trace_level = value
                .as_ref()
                .trim()
                .parse()
                .map_err(|_| Error::configuration_parse_error("WIC_TRACE_LEVEL is not a log level"))?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reads overrides from the process environment.
    #[cfg(feature = "std")]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if ["1", "true", "yes", "on"].iter().any(|s| value.eq_ignore_ascii_case(s)) {
        Some(true)
    } else if ["0", "false", "no", "off"].iter().any(|s| value.eq_ignore_ascii_case(s)) {
        Some(false)
    } else {
        None
    }
}
