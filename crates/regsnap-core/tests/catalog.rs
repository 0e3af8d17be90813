//! Tests for register catalogs

use std::collections::HashSet;

use regsnap_core::catalog::{aarch64, amd64, x86, Architecture};
use regsnap_core::error::ContextError;

#[test]
fn test_names_unique_and_non_empty()
{
    for arch in Architecture::ALL {
        let catalog = arch.catalog();
        let mut seen = HashSet::new();
        for index in 0..catalog.register_count() {
            let name = catalog.register_name(index).unwrap();
            assert!(!name.is_empty(), "{arch} register {index} has no name");
            assert_eq!(name, name.to_lowercase(), "{arch} register {index} is not lowercase");
            assert!(seen.insert(name), "{arch} register name {name} repeated");
        }
        assert_eq!(seen.len(), catalog.register_count());
    }
}

#[test]
fn test_names_stable_across_calls()
{
    let catalog = Architecture::Amd64.catalog();
    for index in 0..catalog.register_count() {
        assert_eq!(catalog.register_name(index), catalog.register_name(index));
    }
}

#[test]
fn test_amd64_documented_indices()
{
    let catalog = &amd64::CATALOG;
    assert_eq!(catalog.register_count(), 28);

    let expected = [
        (0, "r15"),
        (amd64::RAX, "rax"),
        (amd64::RBP, "rbp"),
        (amd64::RIP, "rip"),
        (amd64::CS, "cs"),
        (amd64::RSP, "rsp"),
        (amd64::FSBASE, "fsbase"),
        (amd64::GSBASE, "gsbase"),
    ];
    for (index, name) in expected {
        assert_eq!(catalog.register_name(index).unwrap(), name);
    }

    assert_eq!(amd64::RIP, 17);
    assert_eq!(amd64::RSP, 20);
    assert_eq!(amd64::GSBASE, 27);
}

#[test]
fn test_amd64_full_table()
{
    let names: Vec<_> = (0..28).map(|i| amd64::CATALOG.register_name(i).unwrap()).collect();
    assert_eq!(
        names,
        [
            "r15", "r14", "r13", "r12", "r11", "r10", "r9", "r8", "rdi", "rsi", "rbp", "rbx", "rdx", "rcx", "rax",
            "trapno", "err", "rip", "cs", "rfl", "rsp", "ss", "fs", "gs", "es", "ds", "fsbase", "gsbase",
        ]
    );
}

#[test]
fn test_register_name_out_of_range()
{
    for arch in Architecture::ALL {
        let catalog = arch.catalog();
        let count = catalog.register_count();
        assert_eq!(
            catalog.register_name(count),
            Err(ContextError::IndexOutOfRange { index: count, count })
        );
        assert!(catalog.register_name(usize::MAX).is_err());
    }
}

#[test]
fn test_special_indices()
{
    assert_eq!(amd64::CATALOG.pc_index(), amd64::RIP);
    assert_eq!(amd64::CATALOG.sp_index(), amd64::RSP);
    assert_eq!(amd64::CATALOG.fp_index(), amd64::RBP);

    assert_eq!(x86::CATALOG.register_name(x86::CATALOG.pc_index()).unwrap(), "eip");
    assert_eq!(x86::CATALOG.register_name(x86::CATALOG.sp_index()).unwrap(), "uesp");
    assert_eq!(x86::CATALOG.register_name(x86::CATALOG.fp_index()).unwrap(), "ebp");

    assert_eq!(aarch64::CATALOG.register_name(aarch64::PC).unwrap(), "pc");
    assert_eq!(aarch64::CATALOG.register_name(aarch64::SP).unwrap(), "sp");
    assert_eq!(aarch64::CATALOG.register_name(aarch64::FP).unwrap(), "fp");
    assert_eq!(aarch64::CATALOG.register_name(aarch64::LR).unwrap(), "lr");
    assert_eq!(aarch64::CATALOG.register_name(aarch64::R28).unwrap(), "r28");
}

#[test]
fn test_counts_and_word_sizes()
{
    assert_eq!((amd64::CATALOG.register_count(), amd64::CATALOG.word_size()), (28, 8));
    assert_eq!((x86::CATALOG.register_count(), x86::CATALOG.word_size()), (25, 4));
    assert_eq!((aarch64::CATALOG.register_count(), aarch64::CATALOG.word_size()), (33, 8));
}

#[test]
fn test_index_of()
{
    assert_eq!(amd64::CATALOG.index_of("rip"), Some(amd64::RIP));
    assert_eq!(amd64::CATALOG.index_of("RSP"), Some(amd64::RSP));
    assert_eq!(amd64::CATALOG.index_of("eip"), None);
}

#[test]
fn test_architecture_from_str()
{
    assert_eq!("amd64".parse::<Architecture>().unwrap(), Architecture::Amd64);
    assert_eq!("x86_64".parse::<Architecture>().unwrap(), Architecture::Amd64);
    assert_eq!("i686".parse::<Architecture>().unwrap(), Architecture::X86);
    assert_eq!("ARM64".parse::<Architecture>().unwrap(), Architecture::Aarch64);
    assert_eq!(
        "sparcv9".parse::<Architecture>(),
        Err(ContextError::UnknownArchitecture("sparcv9".to_string()))
    );
}

#[test]
fn test_architecture_display_round_trips_through_catalog()
{
    for arch in Architecture::ALL {
        assert_eq!(arch.to_string().parse::<Architecture>().unwrap(), arch);
        assert_eq!(arch.catalog().architecture(), arch);
    }
    assert_eq!(format!("{:<7}|", Architecture::X86), "x86    |");
}
