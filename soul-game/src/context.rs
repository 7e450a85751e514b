//! Explicit context handed to every progression operation.
//!
//! Carries the loaded configuration and a logger so no component reaches for
//! a process-wide handle.

use std::fmt;

use crate::config::SoulConfig;
use crate::constants::{LOG_TARGET, LOG_TARGET_DEBUG, LOG_TARGET_NET_SYNC};

/// Thin wrapper over the `log` facade. Debug and net-sync messages are only
/// forwarded when debug mode is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoulLogger {
    debug: bool,
}

impl SoulLogger {
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self { debug }
    }

    #[must_use]
    pub const fn debug_enabled(self) -> bool {
        self.debug
    }

    pub fn info(self, args: fmt::Arguments<'_>) {
        log::info!(target: LOG_TARGET, "{args}");
    }

    pub fn warn(self, args: fmt::Arguments<'_>) {
        log::warn!(target: LOG_TARGET, "{args}");
    }

    pub fn error(self, args: fmt::Arguments<'_>) {
        log::error!(target: LOG_TARGET, "{args}");
    }

    pub fn debug(self, args: fmt::Arguments<'_>) {
        if self.debug {
            log::info!(target: LOG_TARGET_DEBUG, "{args}");
        }
    }

    pub fn net_sync(self, args: fmt::Arguments<'_>) {
        if self.debug {
            log::info!(target: LOG_TARGET_NET_SYNC, "{args}");
        }
    }
}

/// Configuration plus logger, built once per session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoulContext {
    config: SoulConfig,
    logger: SoulLogger,
}

impl SoulContext {
    #[must_use]
    pub fn new(config: SoulConfig) -> Self {
        let logger = SoulLogger::new(config.debug_mode);
        Self { config, logger }
    }

    #[must_use]
    pub const fn config(&self) -> &SoulConfig {
        &self.config
    }

    #[must_use]
    pub const fn logger(&self) -> SoulLogger {
        self.logger
    }

    #[must_use]
    pub const fn debug_mode(&self) -> bool {
        self.config.debug_mode
    }
}

impl From<SoulConfig> for SoulContext {
    fn from(config: SoulConfig) -> Self {
        Self::new(config)
    }
}
