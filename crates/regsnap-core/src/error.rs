//! # Error Types
//!
//! Errors raised by the register layer.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages. Nothing in this crate retries or recovers: every
//! variant is surfaced to the caller, which decides whether to abort the
//! inspection, skip the thread, or report a partial result.

use thiserror::Error;

use crate::types::Address;

/// Main error type for register-context operations
///
/// ## Error Categories
///
/// 1. **Bounds errors**: IndexOutOfRange (catalog and context disagree with the caller)
/// 2. **Translation errors**: UnrepresentableAddress
/// 3. **Dump errors**: DumpSizeMismatch, LayoutMismatch, ArchitectureMismatch
/// 4. **Lookup errors**: UnknownArchitecture, UnknownLayout
/// 5. **Backend errors**: MemoryReadFailed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError
{
    /// A register index outside `[0, count)` was used
    ///
    /// This is a programming error in the caller (usually a context built
    /// from one catalog and indexed with another architecture's constants).
    /// It is never clamped or wrapped, since stack walking relies on a 1:1
    /// correspondence between index and architectural register.
    #[error("Register index {index} out of range (register count is {count})")]
    IndexOutOfRange
    {
        /// Offending index
        index: usize,
        /// Number of registers in the catalog
        count: usize,
    },

    /// The address cannot be encoded in the register's native width
    #[error("Address {address} cannot be represented in a {bits}-bit register")]
    UnrepresentableAddress
    {
        /// Address that was rejected
        address: Address,
        /// Width of the target register in bits
        bits: u32,
    },

    /// A raw register dump does not have the size its layout requires
    #[error("Register dump for layout '{layout}' must be {expected} bytes, got {actual}")]
    DumpSizeMismatch
    {
        /// Name of the native layout
        layout: &'static str,
        /// Required size in bytes
        expected: usize,
        /// Size of the supplied buffer
        actual: usize,
    },

    /// A native layout was applied to a context of another architecture
    #[error("Layout '{layout}' targets {expected} registers, context holds {actual} registers")]
    LayoutMismatch
    {
        /// Name of the native layout
        layout: &'static str,
        /// Architecture the layout decodes to
        expected: &'static str,
        /// Architecture of the context being populated
        actual: &'static str,
    },

    /// A backend was handed a context of another architecture
    #[error("Backend expects {expected} registers, context holds {actual} registers")]
    ArchitectureMismatch
    {
        /// Architecture the backend was built for
        expected: &'static str,
        /// Architecture of the context
        actual: &'static str,
    },

    /// No register catalog exists for the named architecture
    #[error("Unknown architecture: {0}")]
    UnknownArchitecture(String),

    /// No native layout exists with the given name
    #[error("Unknown register layout: {0}")]
    UnknownLayout(String),

    /// The backend failed to read target memory
    #[error("Failed to read memory at {address}: {details}")]
    MemoryReadFailed
    {
        /// Address of the failed read
        address: Address,
        /// Backend-specific details
        details: String,
    },
}

/// Convenience type alias for `Result<T, ContextError>`
///
/// ```rust
/// use regsnap_core::error::ContextResult;
///
/// fn foo() -> ContextResult<()>
/// {
///     Ok(())
/// }
/// # foo().unwrap();
/// ```
pub type ContextResult<T> = std::result::Result<T, ContextError>;
