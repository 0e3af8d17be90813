//! Build script for regsnap-core
//!
//! Checks the compiler is new enough for the language features the crate
//! relies on (`let`-`else`, `Result::inspect_err`).

fn main()
{
    const MIN_RUST: &str = "1.76.0";

    match rustc_version::version() {
        Ok(found) => {
            let Ok(min) = rustc_version::Version::parse(MIN_RUST) else {
                println!("cargo:warning=could not parse minimum Rust version {MIN_RUST}");
                return;
            };
            assert!(found >= min, "regsnap-core requires Rust {min} or newer, found {found}");
        }
        // Some build environments hide rustc; don't fail the build over it
        Err(_) => println!("cargo:warning=could not verify Rust version"),
    }
}
