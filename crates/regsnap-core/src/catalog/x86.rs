//! # x86 (32-bit) Register Catalog
//!
//! 25 slots: the 19 entries of the i386 `prgregset_t` followed by the debug
//! registers a Windows backend captures (`dr4`/`dr5` are aliases and are
//! not stored). Words are 4 bytes wide.
//!
//! The stack pointer used for unwinding is `uesp` (the user-mode stack
//! pointer pushed by the trap frame), not `esp`.

use super::{Architecture, RegisterCatalog};

pub const GS: usize = 0;
pub const FS: usize = 1;
pub const ES: usize = 2;
pub const DS: usize = 3;
pub const EDI: usize = 4;
pub const ESI: usize = 5;
pub const EBP: usize = 6;
pub const ESP: usize = 7;
pub const EBX: usize = 8;
pub const EDX: usize = 9;
pub const ECX: usize = 10;
pub const EAX: usize = 11;
pub const TRAPNO: usize = 12;
pub const ERR: usize = 13;
pub const EIP: usize = 14;
pub const CS: usize = 15;
pub const EFL: usize = 16;
pub const UESP: usize = 17;
pub const SS: usize = 18;
pub const DR0: usize = 19;
pub const DR1: usize = 20;
pub const DR2: usize = 21;
pub const DR3: usize = 22;
pub const DR6: usize = 23;
pub const DR7: usize = 24;

pub const REGISTER_COUNT: usize = 25;

pub const SP: usize = UESP;
pub const PC: usize = EIP;
pub const FP: usize = EBP;

pub const NAMES: [&str; REGISTER_COUNT] = [
    "gs", "fs", "es", "ds", "edi", "esi", "ebp", "esp", "ebx", "edx", "ecx", "eax", "trapno", "err", "eip", "cs", "efl",
    "uesp", "ss", "dr0", "dr1", "dr2", "dr3", "dr6", "dr7",
];

pub static CATALOG: RegisterCatalog = RegisterCatalog::new(Architecture::X86, &NAMES, 4, PC, SP, FP);
