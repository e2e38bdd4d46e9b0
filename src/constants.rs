//! Crate-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Level mask
// =============================================================================

/// Usable bits in a level mask (bit 31 is never set)
pub const MASK_BITS: i32 = 31;

/// Default number of error levels (bits 0..5)
pub const DEFAULT_ERROR_LEVELS: i32 = 5;

/// Default number of warning levels (bits 5..10)
pub const DEFAULT_WARNING_LEVELS: i32 = 5;

// =============================================================================
// Service
// =============================================================================

/// Command prefix matched after the leading `/`
pub const DEFAULT_COMMAND_PREFIX: &str = "modlog";

/// Built-in handle used for the service's own messages
pub const DEFAULT_HANDLE: &str = "ModLog";

/// Levels enabled on the built-in handle at startup, in every band
pub const DEFAULT_HANDLE_LEVELS: [i32; 3] = [0, 1, 2];

/// Info level of the diagnostic logged for rejected commands
pub const DIAGNOSTIC_LEVEL: i32 = 0;

// =============================================================================
// Host harness
// =============================================================================

/// Frame duration for the host loop (milliseconds, ~60 FPS)
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Interval between messages of a demo producer thread (milliseconds)
pub const DEFAULT_DEMO_INTERVAL_MS: u64 = 250;

/// Channel capacity for command lines read from stdin
pub const CHANNEL_CAPACITY: usize = 256;
