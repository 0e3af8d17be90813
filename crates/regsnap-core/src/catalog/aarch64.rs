//! # AArch64 Register Catalog
//!
//! 33 slots: `r0`-`r28`, then the frame pointer (`x29`), link register
//! (`x30`), stack pointer and program counter. This matches the layout of
//! the first 33 words of Linux `user_pt_regs`.

use super::{Architecture, RegisterCatalog};

/// First general-purpose register; `r{n}` lives at `R0 + n` for `n <= 28`.
pub const R0: usize = 0;
pub const R28: usize = 28;
pub const FP: usize = 29;
pub const LR: usize = 30;
pub const SP: usize = 31;
pub const PC: usize = 32;

pub const REGISTER_COUNT: usize = 33;

pub const NAMES: [&str; REGISTER_COUNT] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "r13", "r14", "r15", "r16", "r17",
    "r18", "r19", "r20", "r21", "r22", "r23", "r24", "r25", "r26", "r27", "r28", "fp", "lr", "sp", "pc",
];

pub static CATALOG: RegisterCatalog = RegisterCatalog::new(Architecture::Aarch64, &NAMES, 8, PC, SP, FP);
