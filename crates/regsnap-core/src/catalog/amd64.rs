//! # amd64 Register Catalog
//!
//! 28 slots in the order of the `prgregset_t` general register set: the
//! callee-saved and scratch integer registers from `r15` down to `rax`, the
//! trap number and error code, the interrupt frame (`rip`, `cs`, `rfl`,
//! `rsp`, `ss`), the segment selectors, and finally the `fs`/`gs` base
//! registers.
//!
//! Linux `user_regs_struct` uses a different order; see
//! [`layout::LINUX_AMD64`](crate::layout::LINUX_AMD64) for the mapping.

use super::{Architecture, RegisterCatalog};

pub const R15: usize = 0;
pub const R14: usize = 1;
pub const R13: usize = 2;
pub const R12: usize = 3;
pub const R11: usize = 4;
pub const R10: usize = 5;
pub const R9: usize = 6;
pub const R8: usize = 7;
pub const RDI: usize = 8;
pub const RSI: usize = 9;
pub const RBP: usize = 10;
pub const RBX: usize = 11;
pub const RDX: usize = 12;
pub const RCX: usize = 13;
pub const RAX: usize = 14;
pub const TRAPNO: usize = 15;
pub const ERR: usize = 16;
pub const RIP: usize = 17;
pub const CS: usize = 18;
pub const RFL: usize = 19;
pub const RSP: usize = 20;
pub const SS: usize = 21;
pub const FS: usize = 22;
pub const GS: usize = 23;
pub const ES: usize = 24;
pub const DS: usize = 25;
pub const FSBASE: usize = 26;
pub const GSBASE: usize = 27;

/// Number of slots in the amd64 register set
pub const REGISTER_COUNT: usize = 28;

/// Stack pointer alias used by stack walkers
pub const SP: usize = RSP;
/// Program counter alias used by stack walkers
pub const PC: usize = RIP;
/// Frame pointer alias used by stack walkers
pub const FP: usize = RBP;

/// Canonical names, indexed by the constants above
pub const NAMES: [&str; REGISTER_COUNT] = [
    "r15", "r14", "r13", "r12", "r11", "r10", "r9", "r8", "rdi", "rsi", "rbp", "rbx", "rdx", "rcx", "rax", "trapno",
    "err", "rip", "cs", "rfl", "rsp", "ss", "fs", "gs", "es", "ds", "fsbase", "gsbase",
];

/// The amd64 catalog
pub static CATALOG: RegisterCatalog = RegisterCatalog::new(Architecture::Amd64, &NAMES, 8, PC, SP, FP);
