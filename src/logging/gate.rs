//! Level gate
//!
//! Per-handle bit masks deciding which (handle, severity, level) combinations
//! are emitted. The 31 usable bits of a mask are split into three contiguous
//! bands: error levels first, then warning, then info.

use super::Severity;
use crate::constants::{DEFAULT_ERROR_LEVELS, DEFAULT_WARNING_LEVELS, MASK_BITS};
use crate::error::{ModLogError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Band layout of the level mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bands {
    error_levels: i32,
    warning_levels: i32,
}

impl Default for Bands {
    fn default() -> Self {
        Self {
            error_levels: DEFAULT_ERROR_LEVELS,
            warning_levels: DEFAULT_WARNING_LEVELS,
        }
    }
}

impl Bands {
    /// Create a layout, leaving at least one bit for info levels
    pub fn new(error_levels: i32, warning_levels: i32) -> Result<Self> {
        if error_levels < 1 {
            return Err(ModLogError::ConfigValidation {
                field: "error_levels",
                reason: format!("must be at least 1, got {}", error_levels),
            });
        }
        if warning_levels < 1 {
            return Err(ModLogError::ConfigValidation {
                field: "warning_levels",
                reason: format!("must be at least 1, got {}", warning_levels),
            });
        }
        let total = error_levels.checked_add(warning_levels);
        if !matches!(total, Some(sum) if sum < MASK_BITS) {
            return Err(ModLogError::ConfigValidation {
                field: "levels",
                reason: format!(
                    "error_levels + warning_levels must be below {}, got {} + {}",
                    MASK_BITS, error_levels, warning_levels
                ),
            });
        }
        Ok(Self {
            error_levels,
            warning_levels,
        })
    }

    /// First absolute bit of a band
    pub fn offset(self, severity: Severity) -> i32 {
        match severity {
            Severity::Error => 0,
            Severity::Warning => self.error_levels,
            Severity::Info => self.error_levels + self.warning_levels,
        }
    }

    /// Number of levels nominally owned by a band
    pub fn width(self, severity: Severity) -> i32 {
        match severity {
            Severity::Error => self.error_levels,
            Severity::Warning => self.warning_levels,
            Severity::Info => MASK_BITS - self.error_levels - self.warning_levels,
        }
    }

    /// Highest band-relative level that still lands inside the mask
    pub fn max_level(self, severity: Severity) -> i32 {
        MASK_BITS - 1 - self.offset(severity)
    }

    /// Absolute bit for a band-relative level, if it fits in the mask
    pub fn absolute(self, severity: Severity, level: i32) -> Option<u32> {
        let bit = self.offset(severity).checked_add(level)?;
        (0..MASK_BITS).contains(&bit).then_some(bit as u32)
    }

    /// Like `absolute`, but reports the out-of-range level as an error
    pub fn checked_absolute(self, severity: Severity, level: i32) -> Result<u32> {
        self.absolute(severity, level)
            .ok_or(ModLogError::LevelOutOfRange {
                severity,
                level,
                max: self.max_level(severity),
            })
    }
}

/// Registry of handle masks
///
/// Handles are case-insensitive and stored lowercase. A handle that was never
/// configured has every level inactive.
pub struct LevelGate {
    bands: Bands,
    masks: RwLock<HashMap<String, u32>>,
}

impl LevelGate {
    pub fn new(bands: Bands) -> Self {
        Self {
            bands,
            masks: RwLock::new(HashMap::new()),
        }
    }

    pub fn bands(&self) -> Bands {
        self.bands
    }

    /// Check an absolute bit for a handle
    pub fn is_active(&self, handle: &str, absolute_level: i32) -> bool {
        if !(0..MASK_BITS).contains(&absolute_level) {
            return false;
        }
        let key = handle.to_lowercase();
        self.masks
            .read()
            .get(&key)
            .is_some_and(|mask| mask & (1 << absolute_level) != 0)
    }

    /// Check a band-relative level for a handle
    pub fn is_level_active(&self, handle: &str, severity: Severity, level: i32) -> bool {
        match self.bands.absolute(severity, level) {
            Some(bit) => self.is_active(handle, bit as i32),
            None => false,
        }
    }

    /// Set or clear one level. Out-of-range levels mutate nothing.
    pub fn set_level(
        &self,
        handle: &str,
        severity: Severity,
        level: i32,
        enable: bool,
    ) -> Result<()> {
        let bit = self.bands.checked_absolute(severity, level)?;
        let key = handle.to_lowercase();

        let mut masks = self.masks.write();
        let mask = masks.entry(key).or_insert(0);
        if enable {
            *mask |= 1 << bit;
        } else {
            *mask &= !(1 << bit);
        }
        debug!(
            handle,
            %severity,
            level,
            enable,
            mask = *mask,
            "level updated"
        );
        Ok(())
    }

    /// Apply `set_level` to every entry in order.
    ///
    /// Not transactional: valid entries before and after an invalid one are
    /// still applied. Returns the first error encountered.
    pub fn set_levels(
        &self,
        handle: &str,
        severity: Severity,
        levels: &[i32],
        enable: bool,
    ) -> Result<()> {
        let mut first_err = None;
        for &level in levels {
            if let Err(e) = self.set_level(handle, severity, level, enable) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Raw mask for a handle (None = never configured)
    pub fn mask(&self, handle: &str) -> Option<u32> {
        self.masks.read().get(&handle.to_lowercase()).copied()
    }

    /// Band-relative levels currently set for a handle, ascending
    pub fn active_levels(&self, handle: &str, severity: Severity) -> Vec<i32> {
        let Some(mask) = self.mask(handle) else {
            return Vec::new();
        };
        let offset = self.bands.offset(severity);
        (0..self.bands.width(severity))
            .filter(|level| mask & (1 << (offset + level)) != 0)
            .collect()
    }

    /// All configured handles (lowercase), sorted
    pub fn handles(&self) -> Vec<String> {
        let mut handles: Vec<String> = self.masks.read().keys().cloned().collect();
        handles.sort();
        handles
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        Self::new(Bands::default())
    }
}
