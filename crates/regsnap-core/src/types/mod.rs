//! # Types
//!
//! Value types shared by the catalog, context and translator layers.

pub mod address;
pub mod frame;

pub use address::Address;
pub use frame::StackFrame;
