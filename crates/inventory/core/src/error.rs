//! Common error infrastructure for inventory-core.
//!
//! Tool requests never surface errors to the caller: a rejected request simply
//! produces no response. Rejections are still typed (see
//! [`crate::tool::ToolRejection`]) so they can be classified and logged.
//! Broken invariants are a different matter and abort via [`fatal`].

use crate::item::ItemId;
use crate::state::ItemHandle;

/// Severity level of an error, used for categorization and logging.
///
/// - **Recoverable**: the request raced against another mutation (stale id)
/// - **Validation**: the request itself is malformed for the current state
/// - **Data**: the external schema is missing or inconsistent
/// - **Fatal**: an internal invariant no longer holds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request referenced state that no longer exists.
    ///
    /// Examples: item removed moments before a tool was applied to it
    Recoverable,

    /// Invalid input for the current state; retrying unchanged is pointless.
    ///
    /// Examples: sticker aimed at an occupied slot, name tag without a name
    Validation,

    /// The static schema cannot answer a lookup the request depends on.
    ///
    /// Examples: container definition without a loot table
    Data,

    /// Simulator state is corrupted and must not be used further.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Data => "data",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all inventory-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by cause, not by impact
/// - Error codes are stable, upper snake case, and safe to use as log fields
pub trait SimulatorError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Broken simulator invariants.
///
/// These never occur while callers honor the handle and identity contracts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// A mutating entry point received a handle whose item was already removed.
    #[error("handle {0:?} does not reference a live item")]
    StaleHandle(ItemHandle),

    /// The two directions of the identity index disagree.
    #[error("identity index out of sync for item {0:?}")]
    IdentityDesync(ItemId),

    /// The identity index maps to a handle the collection no longer holds.
    #[error("identity {0:?} maps to a removed item")]
    DanglingIdentity(ItemId),
}

impl SimulatorError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::StaleHandle(_) => "INVARIANT_STALE_HANDLE",
            Self::IdentityDesync(_) => "INVARIANT_IDENTITY_DESYNC",
            Self::DanglingIdentity(_) => "INVARIANT_DANGLING_IDENTITY",
        }
    }
}

/// Logs and aborts on a broken invariant.
#[cold]
#[track_caller]
pub fn fatal(violation: InvariantViolation) -> ! {
    tracing::error!(code = violation.error_code(), "{violation}");
    panic!("inventory invariant violated: {violation}");
}
