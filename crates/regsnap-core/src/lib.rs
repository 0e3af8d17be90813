//! # regsnap-core
//!
//! Register snapshots for debugger and serviceability backends.
//!
//! This crate models the captured CPU state of a target thread:
//! - **Catalogs**: per-architecture register names, count and pc/sp/fp slots
//! - **Thread contexts**: zero-initialised, bounds-checked register storage
//! - **Native layouts**: OS register-dump word orders for bulk population
//! - **Address translation**: backend-specific register <-> address conversion
//!   and the top-frame hook stack walkers start from
//!
//! Nothing here performs I/O. Reading a core file, calling `ptrace`, or
//! decoding a wire message is the backend's job; the backend then fills a
//! [`ThreadContext`] synchronously.
//!
//! ## Supported Architectures
//!
//! - **amd64**: 28 registers, `prgregset_t` order
//! - **x86**: 25 registers (general set plus debug registers), 32-bit words
//! - **aarch64**: 33 registers (`r0`-`r28`, `fp`, `lr`, `sp`, `pc`)

pub mod catalog;
pub mod context;
pub mod error;
pub mod layout;
pub mod translator;
pub mod types;

pub use catalog::{Architecture, RegisterCatalog};
pub use context::ThreadContext;
pub use error::{ContextError, ContextResult};
pub use layout::NativeLayout;
pub use translator::{AddressTranslator, FramePointerBackend, MemoryAccess, NativeTranslator};
