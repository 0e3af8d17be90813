//! # Register Catalogs
//!
//! Static, per-architecture register metadata.
//!
//! A catalog fixes the number of register slots for one architecture, the
//! canonical name of every slot, and which slots hold the program counter,
//! stack pointer and frame pointer. The slot order is not arbitrary: it
//! mirrors the native register-dump layout debugger backends read
//! (index == offset within the struct / word size), so bulk population from
//! a raw buffer needs no per-register table.
//!
//! Names exist for display and debugging only. The index is the primary key.
//!
//! ## Example
//!
//! ```rust
//! use regsnap_core::catalog::{amd64, Architecture};
//!
//! let catalog = Architecture::Amd64.catalog();
//! assert_eq!(catalog.register_count(), 28);
//! assert_eq!(catalog.register_name(amd64::RIP)?, "rip");
//! assert_eq!(catalog.pc_index(), amd64::RIP);
//! # Ok::<(), regsnap_core::error::ContextError>(())
//! ```

pub mod aarch64;
pub mod amd64;
pub mod x86;

use std::fmt;
use std::str::FromStr;

use crate::error::{ContextError, ContextResult};

/// CPU architecture with a register catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture
{
    /// 64-bit x86 (Intel/AMD)
    Amd64,
    /// 32-bit x86
    X86,
    /// 64-bit ARM
    Aarch64,
}

impl Architecture
{
    /// Every architecture with a catalog, in display order.
    pub const ALL: [Architecture; 3] = [Architecture::Amd64, Architecture::X86, Architecture::Aarch64];

    /// Canonical lowercase name (`"amd64"`, `"x86"`, `"aarch64"`)
    pub const fn name(self) -> &'static str
    {
        match self {
            Architecture::Amd64 => "amd64",
            Architecture::X86 => "x86",
            Architecture::Aarch64 => "aarch64",
        }
    }

    /// The process-wide register catalog for this architecture
    pub fn catalog(self) -> &'static RegisterCatalog
    {
        match self {
            Architecture::Amd64 => &amd64::CATALOG,
            Architecture::X86 => &x86::CATALOG,
            Architecture::Aarch64 => &aarch64::CATALOG,
        }
    }
}

impl fmt::Display for Architecture
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.pad(self.name())
    }
}

impl FromStr for Architecture
{
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "amd64" | "x86_64" | "x86-64" | "x64" => Ok(Architecture::Amd64),
            "x86" | "i386" | "i486" | "i586" | "i686" => Ok(Architecture::X86),
            "aarch64" | "arm64" => Ok(Architecture::Aarch64),
            _ => Err(ContextError::UnknownArchitecture(s.to_string())),
        }
    }
}

/// Immutable register metadata for one architecture
///
/// Catalogs are `static` data built once per architecture (see
/// [`amd64::CATALOG`], [`x86::CATALOG`], [`aarch64::CATALOG`]) and shared
/// by every [`ThreadContext`](crate::context::ThreadContext) of that
/// architecture without synchronization.
#[derive(Debug, PartialEq, Eq)]
pub struct RegisterCatalog
{
    architecture: Architecture,
    names: &'static [&'static str],
    word_size: usize,
    pc: usize,
    sp: usize,
    fp: usize,
}

impl RegisterCatalog
{
    pub(crate) const fn new(
        architecture: Architecture,
        names: &'static [&'static str],
        word_size: usize,
        pc: usize,
        sp: usize,
        fp: usize,
    ) -> Self
    {
        Self {
            architecture,
            names,
            word_size,
            pc,
            sp,
            fp,
        }
    }

    /// Architecture this catalog describes
    pub const fn architecture(&self) -> Architecture
    {
        self.architecture
    }

    /// Fixed number of register slots
    pub const fn register_count(&self) -> usize
    {
        self.names.len()
    }

    /// Canonical lowercase name of the register at `index`
    ///
    /// ## Errors
    ///
    /// `ContextError::IndexOutOfRange` if `index >= register_count()`.
    pub fn register_name(&self, index: usize) -> ContextResult<&'static str>
    {
        self.check_index(index)?;
        Ok(self.names[index])
    }

    /// All names in index order
    pub const fn names(&self) -> &'static [&'static str]
    {
        self.names
    }

    /// Width of one register word in bytes
    pub const fn word_size(&self) -> usize
    {
        self.word_size
    }

    /// Index of the program counter (instruction pointer)
    pub const fn pc_index(&self) -> usize
    {
        self.pc
    }

    /// Index of the stack pointer
    pub const fn sp_index(&self) -> usize
    {
        self.sp
    }

    /// Index of the frame pointer
    pub const fn fp_index(&self) -> usize
    {
        self.fp
    }

    /// Reverse lookup by name, for user-facing tools.
    ///
    /// Matching is case-insensitive. Library code should use the index
    /// constants instead.
    pub fn index_of(&self, name: &str) -> Option<usize>
    {
        self.names.iter().position(|candidate| candidate.eq_ignore_ascii_case(name))
    }

    pub(crate) fn check_index(&self, index: usize) -> ContextResult<()>
    {
        if index < self.register_count() {
            Ok(())
        } else {
            Err(ContextError::IndexOutOfRange {
                index,
                count: self.register_count(),
            })
        }
    }
}
