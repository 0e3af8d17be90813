//! # Thread Context
//!
//! One thread's captured register state, as a flat index-addressed array of
//! raw machine words.
//!
//! A debugging backend creates a [`ThreadContext`] when it captures a thread
//! (at a breakpoint, while reading a core file, on receipt of a protocol
//! message), fills it with [`ThreadContext::set_register`] or in bulk with
//! [`ThreadContext::populate`], and hands it to stack walkers and
//! pretty-printers that read it back.
//!
//! ## Example
//!
//! ```rust
//! use regsnap_core::catalog::{amd64, Architecture};
//! use regsnap_core::ThreadContext;
//!
//! let mut ctx = ThreadContext::for_architecture(Architecture::Amd64);
//! ctx.set_register(amd64::RIP, 0x7F00_0000_1000)?;
//!
//! assert_eq!(ctx.register(amd64::RIP)?, 0x7F00_0000_1000);
//! assert_eq!(ctx.register_name(amd64::RIP)?, "rip");
//! assert_eq!(ctx.register(amd64::R15)?, 0);
//! assert!(ctx.register(amd64::REGISTER_COUNT).is_err());
//! # Ok::<(), regsnap_core::error::ContextError>(())
//! ```

use std::fmt;

use tracing::{debug, trace};

use crate::catalog::{Architecture, RegisterCatalog};
use crate::error::{ContextError, ContextResult};
use crate::layout::NativeLayout;
use crate::translator::MemoryAccess;
use crate::types::StackFrame;

/// Captured register values of one thread
///
/// The context is a pure value holder: it owns its words, has no
/// finalization side effects, and is mutated only through `&mut self`, so
/// the single-writer rule is enforced by the borrow checker. Cloning yields
/// an independent snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadContext
{
    catalog: &'static RegisterCatalog,
    values: Vec<u64>,
}

impl ThreadContext
{
    /// Allocate a zeroed context sized to `catalog`
    pub fn new(catalog: &'static RegisterCatalog) -> Self
    {
        Self {
            catalog,
            values: vec![0; catalog.register_count()],
        }
    }

    /// Allocate a zeroed context for `architecture`'s catalog
    pub fn for_architecture(architecture: Architecture) -> Self
    {
        Self::new(architecture.catalog())
    }

    /// Catalog this context is indexed by
    pub fn catalog(&self) -> &'static RegisterCatalog
    {
        self.catalog
    }

    /// Architecture of the captured thread
    pub fn architecture(&self) -> Architecture
    {
        self.catalog.architecture()
    }

    /// Number of register slots (the catalog's fixed count)
    pub fn num_registers(&self) -> usize
    {
        self.catalog.register_count()
    }

    /// Canonical name of the register at `index`
    ///
    /// ## Errors
    ///
    /// `ContextError::IndexOutOfRange` for an invalid index.
    pub fn register_name(&self, index: usize) -> ContextResult<&'static str>
    {
        self.catalog.register_name(index)
    }

    /// Overwrite the register at `index` with a raw machine word
    ///
    /// The value is opaque: an integer, a flags mask or an address, as the
    /// register dictates. A failed call leaves the context unchanged.
    ///
    /// ## Errors
    ///
    /// `ContextError::IndexOutOfRange` for an invalid index.
    pub fn set_register(&mut self, index: usize, value: u64) -> ContextResult<()>
    {
        let count = self.values.len();
        let Some(slot) = self.values.get_mut(index) else {
            debug!(index, count, arch = %self.catalog.architecture(), "rejected register write");
            return Err(ContextError::IndexOutOfRange { index, count });
        };
        *slot = value;
        trace!(index, value, "register written");
        Ok(())
    }

    /// Read the register at `index`; zero if it was never written
    ///
    /// ## Errors
    ///
    /// `ContextError::IndexOutOfRange` for an invalid index.
    pub fn register(&self, index: usize) -> ContextResult<u64>
    {
        self.values.get(index).copied().ok_or_else(|| {
            debug!(index, count = self.values.len(), arch = %self.catalog.architecture(), "rejected register read");
            ContextError::IndexOutOfRange {
                index,
                count: self.values.len(),
            }
        })
    }

    /// Raw value of the program counter
    pub fn pc(&self) -> u64
    {
        self.values[self.catalog.pc_index()]
    }

    /// Raw value of the stack pointer
    pub fn sp(&self) -> u64
    {
        self.values[self.catalog.sp_index()]
    }

    /// Raw value of the frame pointer
    pub fn fp(&self) -> u64
    {
        self.values[self.catalog.fp_index()]
    }

    /// All values in index order
    pub fn values(&self) -> &[u64]
    {
        &self.values
    }

    /// `(name, value)` pairs in index order, for generic dumpers
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_
    {
        self.catalog.names().iter().copied().zip(self.values.iter().copied())
    }

    /// Top stack frame of the captured thread
    ///
    /// Always `None` at this layer: producing a frame needs the calling
    /// convention and a memory reader, which belong to a backend. Backends
    /// provide it through
    /// [`AddressTranslator::top_frame`](crate::translator::AddressTranslator::top_frame).
    pub fn top_frame<M: MemoryAccess + ?Sized>(&self, _memory: &M) -> Option<StackFrame>
    {
        None
    }

    /// Bulk-populate from a raw native register dump
    ///
    /// Every word is decoded before anything is written, so an error leaves
    /// the context untouched. Catalog slots the layout does not cover keep
    /// their previous value.
    ///
    /// ## Errors
    ///
    /// - `ContextError::LayoutMismatch` if the layout is for another architecture
    /// - `ContextError::DumpSizeMismatch` if `bytes` is not `layout.byte_len()` long
    pub fn populate(&mut self, layout: &NativeLayout, bytes: &[u8]) -> ContextResult<()>
    {
        if layout.catalog() != self.catalog {
            return Err(ContextError::LayoutMismatch {
                layout: layout.name(),
                expected: layout.catalog().architecture().name(),
                actual: self.catalog.architecture().name(),
            });
        }

        let decoded = layout.decode(bytes)?;
        for (index, value) in &decoded {
            self.set_register(*index, *value)?;
        }
        debug!(layout = layout.name(), written = decoded.len(), "populated thread context");
        Ok(())
    }
}

impl fmt::Display for ThreadContext
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let digits = self.catalog.word_size() * 2;
        for (index, (name, value)) in self.iter().enumerate() {
            writeln!(f, "{index:>3}  {name:<8} 0x{value:0digits$x}")?;
        }
        Ok(())
    }
}
