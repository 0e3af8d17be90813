//! # Native Register-Dump Layouts
//!
//! Kernels hand out register sets as packed structs of machine words: a
//! `ptrace(PTRACE_GETREGS)` buffer, an `NT_PRSTATUS` note in a core file, a
//! `prgregset_t`. The word order is defined by the OS, so two systems on the
//! same CPU can disagree. A [`NativeLayout`] records one such order as a
//! mapping from native word slot to catalog index.
//!
//! Layouts without a mapping are identity layouts: word `i` of the dump is
//! catalog register `i`.
//!
//! ## Example
//!
//! ```rust
//! use regsnap_core::catalog::amd64;
//! use regsnap_core::layout::LINUX_AMD64;
//! use regsnap_core::ThreadContext;
//!
//! // user_regs_struct: rip is the 17th word (index 16)
//! let mut dump = vec![0u8; LINUX_AMD64.byte_len()];
//! dump[16 * 8..17 * 8].copy_from_slice(&0x40_1000u64.to_le_bytes());
//!
//! let mut ctx = ThreadContext::new(&amd64::CATALOG);
//! ctx.populate(&LINUX_AMD64, &dump)?;
//! assert_eq!(ctx.register(amd64::RIP)?, 0x40_1000);
//! # Ok::<(), regsnap_core::error::ContextError>(())
//! ```

use crate::catalog::{aarch64, amd64, x86, RegisterCatalog};
use crate::error::{ContextError, ContextResult};

/// Byte order of words in a native dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder
{
    Little,
    Big,
}

impl ByteOrder
{
    fn read(self, word: &[u8]) -> u64
    {
        let mut buf = [0u8; 8];
        match self {
            ByteOrder::Little => {
                buf[..word.len()].copy_from_slice(word);
                u64::from_le_bytes(buf)
            }
            ByteOrder::Big => {
                buf[8 - word.len()..].copy_from_slice(word);
                u64::from_be_bytes(buf)
            }
        }
    }
}

/// Word order of one OS register-dump struct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeLayout
{
    name: &'static str,
    catalog: &'static RegisterCatalog,
    byte_order: ByteOrder,
    /// Native slot -> catalog index; `None` for native-only words. `None`
    /// overall means identity.
    slots: Option<&'static [Option<usize>]>,
}

impl NativeLayout
{
    /// Layout whose word order is the catalog's own index order
    pub const fn identity(name: &'static str, catalog: &'static RegisterCatalog, byte_order: ByteOrder) -> Self
    {
        Self {
            name,
            catalog,
            byte_order,
            slots: None,
        }
    }

    /// Layout with an explicit slot mapping
    pub const fn mapped(
        name: &'static str,
        catalog: &'static RegisterCatalog,
        byte_order: ByteOrder,
        slots: &'static [Option<usize>],
    ) -> Self
    {
        Self {
            name,
            catalog,
            byte_order,
            slots: Some(slots),
        }
    }

    /// Look up one of the shipped layouts by name
    ///
    /// ## Errors
    ///
    /// `ContextError::UnknownLayout` if no layout has that name.
    pub fn by_name(name: &str) -> ContextResult<&'static NativeLayout>
    {
        ALL.iter()
            .copied()
            .find(|layout| layout.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ContextError::UnknownLayout(name.to_string()))
    }

    pub const fn name(&self) -> &'static str
    {
        self.name
    }

    pub const fn catalog(&self) -> &'static RegisterCatalog
    {
        self.catalog
    }

    pub const fn byte_order(&self) -> ByteOrder
    {
        self.byte_order
    }

    /// Number of words in the native struct
    pub fn slot_count(&self) -> usize
    {
        match self.slots {
            Some(slots) => slots.len(),
            None => self.catalog.register_count(),
        }
    }

    /// Size in bytes of a dump in this layout
    pub fn byte_len(&self) -> usize
    {
        self.slot_count() * self.catalog.word_size()
    }

    /// Catalog index that native word `slot` lands in, if any
    pub fn target(&self, slot: usize) -> Option<usize>
    {
        match self.slots {
            Some(slots) => slots.get(slot).copied().flatten(),
            None => (slot < self.catalog.register_count()).then_some(slot),
        }
    }

    /// Decode a dump into `(catalog index, value)` pairs
    ///
    /// Words without a catalog counterpart are skipped. Every target index
    /// is bounds-checked against the catalog before anything is returned,
    /// so callers can write the result without partial failure.
    ///
    /// ## Errors
    ///
    /// - `ContextError::DumpSizeMismatch` if `bytes.len() != self.byte_len()`
    /// - `ContextError::IndexOutOfRange` if the mapping names a slot the catalog lacks
    pub fn decode(&self, bytes: &[u8]) -> ContextResult<Vec<(usize, u64)>>
    {
        if bytes.len() != self.byte_len() {
            return Err(ContextError::DumpSizeMismatch {
                layout: self.name,
                expected: self.byte_len(),
                actual: bytes.len(),
            });
        }

        let mut decoded = Vec::with_capacity(self.catalog.register_count());
        for (slot, word) in bytes.chunks_exact(self.catalog.word_size()).enumerate() {
            let Some(index) = self.target(slot) else {
                continue;
            };
            self.catalog.check_index(index)?;
            decoded.push((index, self.byte_order.read(word)));
        }
        Ok(decoded)
    }
}

/// amd64 dump in catalog (`prgregset_t`) order
pub static AMD64: NativeLayout = NativeLayout::identity("amd64", &amd64::CATALOG, ByteOrder::Little);

/// x86 dump in catalog order
pub static X86: NativeLayout = NativeLayout::identity("x86", &x86::CATALOG, ByteOrder::Little);

/// AArch64 dump in catalog order
pub static AARCH64: NativeLayout = NativeLayout::identity("aarch64", &aarch64::CATALOG, ByteOrder::Little);

/// Linux amd64 `struct user_regs_struct` (27 words)
pub static LINUX_AMD64: NativeLayout = NativeLayout::mapped(
    "linux-amd64",
    &amd64::CATALOG,
    ByteOrder::Little,
    &[
        Some(amd64::R15),
        Some(amd64::R14),
        Some(amd64::R13),
        Some(amd64::R12),
        Some(amd64::RBP),
        Some(amd64::RBX),
        Some(amd64::R11),
        Some(amd64::R10),
        Some(amd64::R9),
        Some(amd64::R8),
        Some(amd64::RAX),
        Some(amd64::RCX),
        Some(amd64::RDX),
        Some(amd64::RSI),
        Some(amd64::RDI),
        None, // orig_rax
        Some(amd64::RIP),
        Some(amd64::CS),
        Some(amd64::RFL),
        Some(amd64::RSP),
        Some(amd64::SS),
        Some(amd64::FSBASE),
        Some(amd64::GSBASE),
        Some(amd64::DS),
        Some(amd64::ES),
        Some(amd64::FS),
        Some(amd64::GS),
    ],
);

/// Linux i386 `struct user_regs_struct` (17 words of 4 bytes)
pub static LINUX_X86: NativeLayout = NativeLayout::mapped(
    "linux-x86",
    &x86::CATALOG,
    ByteOrder::Little,
    &[
        Some(x86::EBX),
        Some(x86::ECX),
        Some(x86::EDX),
        Some(x86::ESI),
        Some(x86::EDI),
        Some(x86::EBP),
        Some(x86::EAX),
        Some(x86::DS),
        Some(x86::ES),
        Some(x86::FS),
        Some(x86::GS),
        None, // orig_eax
        Some(x86::EIP),
        Some(x86::CS),
        Some(x86::EFL),
        Some(x86::UESP),
        Some(x86::SS),
    ],
);

const fn linux_aarch64_slots() -> [Option<usize>; 34]
{
    let mut slots = [None; 34];
    let mut i = 0;
    while i < aarch64::REGISTER_COUNT {
        slots[i] = Some(i);
        i += 1;
    }
    // slot 33 is pstate, which the catalog does not carry
    slots
}

const LINUX_AARCH64_SLOTS: [Option<usize>; 34] = linux_aarch64_slots();

/// Linux AArch64 `struct user_pt_regs` (`regs[31]`, `sp`, `pc`, `pstate`)
pub static LINUX_AARCH64: NativeLayout =
    NativeLayout::mapped("linux-aarch64", &aarch64::CATALOG, ByteOrder::Little, &LINUX_AARCH64_SLOTS);

/// Every shipped layout
pub static ALL: [&NativeLayout; 6] = [&AMD64, &X86, &AARCH64, &LINUX_AMD64, &LINUX_X86, &LINUX_AARCH64];
