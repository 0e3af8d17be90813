//! Tests for thread contexts

use regsnap_core::catalog::{aarch64, amd64, x86, Architecture};
use regsnap_core::error::{ContextError, ContextResult};
use regsnap_core::translator::MemoryAccess;
use regsnap_core::types::Address;
use regsnap_core::ThreadContext;

struct NoMemory;

impl MemoryAccess for NoMemory
{
    fn read_word(&self, address: Address, _size: usize) -> ContextResult<u64>
    {
        panic!("base context must not read memory (asked for {address})");
    }
}

#[test]
fn test_new_context_is_zeroed()
{
    for arch in Architecture::ALL {
        let ctx = ThreadContext::for_architecture(arch);
        assert_eq!(ctx.num_registers(), arch.catalog().register_count());
        for index in 0..ctx.num_registers() {
            assert_eq!(ctx.register(index).unwrap(), 0);
        }
    }
}

#[test]
fn test_rip_scenario()
{
    let mut ctx = ThreadContext::new(&amd64::CATALOG);
    ctx.set_register(17, 0x7F00_0000_1000).unwrap();

    assert_eq!(ctx.register(17).unwrap(), 0x7F00_0000_1000);
    assert_eq!(ctx.register_name(17).unwrap(), "rip");
    assert_eq!(ctx.register(0).unwrap(), 0);
    assert_eq!(ctx.pc(), 0x7F00_0000_1000);
}

#[test]
fn test_bounds()
{
    let ctx = ThreadContext::new(&amd64::CATALOG);
    assert_eq!(ctx.register(27).unwrap(), 0);
    assert_eq!(ctx.register(28), Err(ContextError::IndexOutOfRange { index: 28, count: 28 }));
    assert!(ctx.register_name(28).is_err());
}

#[test]
fn test_failed_write_leaves_context_untouched()
{
    let mut ctx = ThreadContext::new(&x86::CATALOG);
    ctx.set_register(x86::EIP, 0x0804_8000).unwrap();
    let before = ctx.clone();

    assert_eq!(
        ctx.set_register(x86::REGISTER_COUNT, 1),
        Err(ContextError::IndexOutOfRange { index: 25, count: 25 })
    );
    assert!(ctx.set_register(usize::MAX, 1).is_err());
    assert_eq!(ctx, before);
}

#[test]
fn test_write_read_identity_for_edge_values()
{
    let mut ctx = ThreadContext::new(&aarch64::CATALOG);
    for value in [0, 1, u64::MAX, 1 << 63, 0xdead_beef_cafe_f00d] {
        for index in 0..ctx.num_registers() {
            ctx.set_register(index, value).unwrap();
            assert_eq!(ctx.register(index).unwrap(), value);
        }
    }
}

#[test]
fn test_writes_are_isolated()
{
    let mut ctx = ThreadContext::new(&amd64::CATALOG);
    ctx.set_register(amd64::RAX, 0x1111).unwrap();
    ctx.set_register(amd64::RSP, 0x2222).unwrap();

    for index in 0..ctx.num_registers() {
        let expected = match index {
            amd64::RAX => 0x1111,
            amd64::RSP => 0x2222,
            _ => 0,
        };
        assert_eq!(ctx.register(index).unwrap(), expected, "register {index}");
    }

    ctx.set_register(amd64::RAX, 0x3333).unwrap();
    assert_eq!(ctx.register(amd64::RSP).unwrap(), 0x2222);
}

#[test]
fn test_num_registers_constant_after_writes()
{
    let mut ctx = ThreadContext::new(&amd64::CATALOG);
    for index in 0..10 {
        ctx.set_register(index, index as u64).unwrap();
        assert_eq!(ctx.num_registers(), 28);
    }
}

#[test]
fn test_top_frame_unavailable()
{
    let mut ctx = ThreadContext::new(&amd64::CATALOG);
    assert_eq!(ctx.top_frame(&NoMemory), None);

    ctx.set_register(amd64::RIP, 0x40_1000).unwrap();
    ctx.set_register(amd64::RBP, 0x7fff_0000).unwrap();
    assert_eq!(ctx.top_frame(&NoMemory), None);
}

#[test]
fn test_clone_is_independent_snapshot()
{
    let mut ctx = ThreadContext::new(&amd64::CATALOG);
    ctx.set_register(amd64::RBX, 7).unwrap();
    let snapshot = ctx.clone();
    ctx.set_register(amd64::RBX, 8).unwrap();

    assert_eq!(snapshot.register(amd64::RBX).unwrap(), 7);
    assert_eq!(ctx.register(amd64::RBX).unwrap(), 8);
}

#[test]
fn test_iter_pairs_names_with_values()
{
    let mut ctx = ThreadContext::new(&aarch64::CATALOG);
    ctx.set_register(aarch64::LR, 0x40_0abc).unwrap();

    let pairs: Vec<_> = ctx.iter().collect();
    assert_eq!(pairs.len(), 33);
    assert_eq!(pairs[0], ("r0", 0));
    assert_eq!(pairs[aarch64::LR], ("lr", 0x40_0abc));
}

#[test]
fn test_display_dump()
{
    let mut ctx = ThreadContext::new(&x86::CATALOG);
    ctx.set_register(x86::EIP, 0x0804_8000).unwrap();
    let dump = ctx.to_string();

    assert_eq!(dump.lines().count(), 25);
    assert_eq!(dump.lines().nth(x86::EIP).unwrap(), " 14  eip      0x08048000");
    assert_eq!(dump.lines().next().unwrap(), "  0  gs       0x00000000");
}
