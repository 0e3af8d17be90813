//! Top-of-stack frame handle.

use super::Address;

/// The innermost frame of a captured thread
///
/// This is what [`AddressTranslator::top_frame`](crate::translator::AddressTranslator::top_frame)
/// hands to a stack walker as its starting point. Only the registers needed
/// to begin an unwind are carried; anything deeper (CFI, symbols) belongs to
/// the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFrame
{
    /// Program counter of the frame.
    pub pc: Address,
    /// Stack pointer snapshot.
    pub sp: Address,
    /// Frame/base pointer snapshot (may be null when frame pointers are omitted).
    pub fp: Address,
    /// Return address saved by the frame's prologue, if it could be read.
    pub return_address: Option<Address>,
}

impl StackFrame
{
    /// Whether the frame pointer chain can be followed from this frame.
    pub const fn has_frame_pointer(&self) -> bool
    {
        !self.fp.is_null()
    }
}
