//! # Address Translation
//!
//! Bridges raw register words and typed [`Address`]es.
//!
//! Only a debugging backend knows the target's pointer width and address
//! space rules, so conversion lives behind the [`AddressTranslator`] trait
//! rather than on [`ThreadContext`]. Translators are composed with a context
//! per call and never own one; several translators may read the same
//! context.
//!
//! Two implementations ship with the crate:
//!
//! - [`NativeTranslator`]: pointer-width and canonical-form rules only; its
//!   `top_frame` is "not available".
//! - [`FramePointerBackend`]: a `NativeTranslator` plus a [`MemoryAccess`]
//!   reader, producing the top frame from pc/sp/fp and the frame record.

use tracing::{debug, trace};

use crate::catalog::{Architecture, RegisterCatalog};
use crate::context::ThreadContext;
use crate::error::{ContextError, ContextResult};
use crate::types::{Address, StackFrame};

/// Minimal memory reader a backend supplies for unwinding.
pub trait MemoryAccess
{
    /// Read a `size`-byte word (4 or 8) at `address` in target byte order.
    fn read_word(&self, address: Address, size: usize) -> ContextResult<u64>;
}

impl<T: MemoryAccess + ?Sized> MemoryAccess for &T
{
    fn read_word(&self, address: Address, size: usize) -> ContextResult<u64>
    {
        (**self).read_word(address, size)
    }
}

/// Backend capability: reinterpret register slots as addresses
pub trait AddressTranslator
{
    /// Read register `index` of `ctx` as an address in the target's space
    ///
    /// ## Errors
    ///
    /// - `ContextError::UnrepresentableAddress` if the stored word is not a valid address
    /// - `ContextError::IndexOutOfRange` for an invalid index
    fn register_as_address(&self, ctx: &ThreadContext, index: usize) -> ContextResult<Address>;

    /// Store the bit pattern of `address` into register `index` of `ctx`
    ///
    /// ## Errors
    ///
    /// - `ContextError::UnrepresentableAddress` if the address does not fit the register
    /// - `ContextError::IndexOutOfRange` for an invalid index
    fn set_register_as_address(&self, ctx: &mut ThreadContext, index: usize, address: Address) -> ContextResult<()>;

    /// Innermost frame of the thread captured in `ctx`
    ///
    /// `Ok(None)` means the capability is not available for this backend,
    /// which is distinct from an unwind failure (`Err`). A backend that has
    /// the capability reports a frame even when its pc is null, so a thread
    /// that jumped through a null pointer is still visible to the walker.
    fn top_frame(&self, _ctx: &ThreadContext) -> ContextResult<Option<StackFrame>>
    {
        Ok(None)
    }
}

/// Width of a target pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerWidth
{
    Bits32,
    Bits64,
}

impl PointerWidth
{
    pub const fn bits(self) -> u32
    {
        match self {
            PointerWidth::Bits32 => 32,
            PointerWidth::Bits64 => 64,
        }
    }

    pub const fn bytes(self) -> usize
    {
        match self {
            PointerWidth::Bits32 => 4,
            PointerWidth::Bits64 => 8,
        }
    }
}

/// Address translation by pointer width and canonical-form rules
///
/// - 32-bit: reads keep the low 32 bits; writes reject anything above `u32::MAX`.
/// - 64-bit with canonical bits `n`: bits `n..64` must all equal bit `n - 1`,
///   on reads and on writes alike.
/// - 64-bit without canonical bits: the word is the address.
///
/// ## Example
///
/// ```rust
/// use regsnap_core::catalog::{amd64, Architecture};
/// use regsnap_core::translator::{AddressTranslator, NativeTranslator};
/// use regsnap_core::types::Address;
/// use regsnap_core::ThreadContext;
///
/// let translator = NativeTranslator::for_architecture(Architecture::Amd64);
/// let mut ctx = ThreadContext::for_architecture(Architecture::Amd64);
///
/// translator.set_register_as_address(&mut ctx, amd64::RSP, Address::new(0x7ffd_0000_1000))?;
/// assert_eq!(ctx.register(amd64::RSP)?, 0x7ffd_0000_1000);
///
/// // Not canonical on a 48-bit address space
/// assert!(translator
///     .set_register_as_address(&mut ctx, amd64::RSP, Address::new(0x0001_0000_0000_0000))
///     .is_err());
/// # Ok::<(), regsnap_core::error::ContextError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeTranslator
{
    width: PointerWidth,
    canonical_bits: Option<u32>,
}

impl NativeTranslator
{
    /// Translator with no canonical-form rule
    pub const fn new(width: PointerWidth) -> Self
    {
        Self {
            width,
            canonical_bits: None,
        }
    }

    /// Require addresses to be sign-extended from bit `bits - 1`
    ///
    /// Only meaningful for 64-bit pointers; `bits` is clamped to `1..=64`.
    #[must_use]
    pub const fn with_canonical_bits(mut self, bits: u32) -> Self
    {
        let bits = if bits == 0 {
            1
        } else if bits > 64 {
            64
        } else {
            bits
        };
        self.canonical_bits = Some(bits);
        self
    }

    /// Defaults for an architecture: amd64 uses 48-bit canonical addresses,
    /// AArch64 keeps the full word (top-byte tags are the target's business),
    /// x86 is 32-bit.
    pub const fn for_architecture(architecture: Architecture) -> Self
    {
        match architecture {
            Architecture::Amd64 => Self::new(PointerWidth::Bits64).with_canonical_bits(48),
            Architecture::X86 => Self::new(PointerWidth::Bits32),
            Architecture::Aarch64 => Self::new(PointerWidth::Bits64),
        }
    }

    pub fn for_catalog(catalog: &RegisterCatalog) -> Self
    {
        Self::for_architecture(catalog.architecture())
    }

    pub const fn width(&self) -> PointerWidth
    {
        self.width
    }

    /// Reinterpret a raw word as an address
    ///
    /// ## Errors
    ///
    /// `ContextError::UnrepresentableAddress` if the word is not canonical.
    /// A corrupt snapshot is reported, never repaired into a plausible address.
    pub fn decode(&self, raw: u64) -> ContextResult<Address>
    {
        match (self.width, self.canonical_bits) {
            (PointerWidth::Bits32, _) => Ok(Address::new(raw & u64::from(u32::MAX))),
            (PointerWidth::Bits64, Some(bits)) if sign_extend(raw, bits) != raw => {
                Err(ContextError::UnrepresentableAddress {
                    address: Address::new(raw),
                    bits,
                })
            }
            (PointerWidth::Bits64, _) => Ok(Address::new(raw)),
        }
    }

    /// Encode an address as a raw word
    ///
    /// ## Errors
    ///
    /// `ContextError::UnrepresentableAddress` if the address does not fit.
    pub fn encode(&self, address: Address) -> ContextResult<u64>
    {
        let value = address.value();
        match (self.width, self.canonical_bits) {
            (PointerWidth::Bits32, _) if value > u64::from(u32::MAX) => {
                Err(ContextError::UnrepresentableAddress { address, bits: 32 })
            }
            (PointerWidth::Bits64, Some(bits)) if sign_extend(value, bits) != value => {
                Err(ContextError::UnrepresentableAddress { address, bits })
            }
            _ => Ok(value),
        }
    }
}

fn sign_extend(value: u64, bits: u32) -> u64
{
    let shift = 64 - bits;
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    let extended = (((value << shift) as i64) >> shift) as u64;
    extended
}

impl AddressTranslator for NativeTranslator
{
    fn register_as_address(&self, ctx: &ThreadContext, index: usize) -> ContextResult<Address>
    {
        let address = self
            .decode(ctx.register(index)?)
            .inspect_err(|err| debug!(index, %err, "register does not hold an address"))?;
        trace!(index, %address, "register read as address");
        Ok(address)
    }

    fn set_register_as_address(&self, ctx: &mut ThreadContext, index: usize, address: Address) -> ContextResult<()>
    {
        let raw = self.encode(address).inspect_err(|err| debug!(index, %err, "address not representable"))?;
        ctx.set_register(index, raw)
    }
}

/// Backend that finds the top frame through the frame-pointer convention
///
/// On all supported architectures a frame record is two words at the frame
/// pointer: the caller's frame pointer, then the return address. The top
/// frame carries pc/sp/fp from the context; its return address is read from
/// `fp + word` when the frame pointer is set. A null pc still yields a
/// frame. Contexts of another architecture are rejected with
/// `ContextError::ArchitectureMismatch`. A failed read leaves
/// `return_address` empty rather than failing the frame, because the top
/// frame may be in a prologue or in code built without frame pointers.
///
/// ## Example
///
/// ```rust
/// use std::collections::HashMap;
///
/// use regsnap_core::catalog::{amd64, Architecture};
/// use regsnap_core::error::{ContextError, ContextResult};
/// use regsnap_core::translator::{AddressTranslator, FramePointerBackend, MemoryAccess};
/// use regsnap_core::types::Address;
/// use regsnap_core::ThreadContext;
///
/// struct Words(HashMap<u64, u64>);
///
/// impl MemoryAccess for Words
/// {
///     fn read_word(&self, address: Address, _size: usize) -> ContextResult<u64>
///     {
///         self.0.get(&address.value()).copied().ok_or(ContextError::MemoryReadFailed {
///             address,
///             details: "unmapped".into(),
///         })
///     }
/// }
///
/// let backend = FramePointerBackend::new(Architecture::Amd64, Words(HashMap::from([(0x7000_0008, 0x40_2000)])));
/// let mut ctx = ThreadContext::for_architecture(Architecture::Amd64);
/// ctx.set_register(amd64::RIP, 0x40_1000)?;
/// ctx.set_register(amd64::RSP, 0x6fff_fff0)?;
/// ctx.set_register(amd64::RBP, 0x7000_0000)?;
///
/// let frame = backend.top_frame(&ctx)?.expect("pc is set");
/// assert_eq!(frame.pc, Address::new(0x40_1000));
/// assert_eq!(frame.return_address, Some(Address::new(0x40_2000)));
/// # Ok::<(), ContextError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FramePointerBackend<M>
{
    architecture: Architecture,
    translator: NativeTranslator,
    memory: M,
}

impl<M: MemoryAccess> FramePointerBackend<M>
{
    pub fn new(architecture: Architecture, memory: M) -> Self
    {
        Self::with_translator(architecture, NativeTranslator::for_architecture(architecture), memory)
    }

    pub fn with_translator(architecture: Architecture, translator: NativeTranslator, memory: M) -> Self
    {
        Self {
            architecture,
            translator,
            memory,
        }
    }

    pub const fn architecture(&self) -> Architecture
    {
        self.architecture
    }

    pub fn memory(&self) -> &M
    {
        &self.memory
    }

    fn check_context(&self, ctx: &ThreadContext) -> ContextResult<()>
    {
        let actual = ctx.architecture();
        if actual == self.architecture {
            Ok(())
        } else {
            debug!(expected = %self.architecture, %actual, "context of another architecture");
            Err(ContextError::ArchitectureMismatch {
                expected: self.architecture.name(),
                actual: actual.name(),
            })
        }
    }

    fn read_return_address(&self, fp: Address) -> Option<Address>
    {
        let word = self.translator.width().bytes();
        let slot = fp.checked_add(word as u64)?;
        match self.memory.read_word(slot, word).and_then(|raw| self.translator.decode(raw)) {
            Ok(address) => Some(address),
            Err(err) => {
                debug!(%slot, %err, "frame record unreadable");
                None
            }
        }
    }
}

impl<M: MemoryAccess> AddressTranslator for FramePointerBackend<M>
{
    fn register_as_address(&self, ctx: &ThreadContext, index: usize) -> ContextResult<Address>
    {
        self.check_context(ctx)?;
        self.translator.register_as_address(ctx, index)
    }

    fn set_register_as_address(&self, ctx: &mut ThreadContext, index: usize, address: Address) -> ContextResult<()>
    {
        self.check_context(ctx)?;
        self.translator.set_register_as_address(ctx, index, address)
    }

    fn top_frame(&self, ctx: &ThreadContext) -> ContextResult<Option<StackFrame>>
    {
        let catalog = ctx.catalog();
        let pc = self.register_as_address(ctx, catalog.pc_index())?;
        let sp = self.register_as_address(ctx, catalog.sp_index())?;
        let fp = self.register_as_address(ctx, catalog.fp_index())?;

        let return_address = if fp.is_null() { None } else { self.read_return_address(fp) };
        debug!(%pc, %sp, %fp, arch = %catalog.architecture(), "top frame");

        Ok(Some(StackFrame {
            pc,
            sp,
            fp,
            return_address,
        }))
    }
}
