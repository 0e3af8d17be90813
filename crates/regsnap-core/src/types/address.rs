//! Memory address type.

use std::fmt;

/// Strongly typed address in the target's address space
///
/// Register slots hold opaque machine words. Once a translator has decided a
/// word is a pointer, it hands out an `Address` so that sizes, flags and
/// addresses cannot be mixed up by the stack walker.
///
/// ## Example
///
/// ```rust
/// use regsnap_core::types::Address;
///
/// let addr = Address::from(0x1000);
/// assert_eq!(addr.checked_add(0x100), Some(Address::new(0x1100)));
/// assert_eq!(addr.to_string(), "0x0000000000001000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(u64);

impl Address
{
    /// The null address (0x0)
    pub const ZERO: Self = Address(0);

    /// Create an address from a raw `u64`; usable in const contexts.
    pub const fn new(value: u64) -> Self
    {
        Address(value)
    }

    /// Raw bit pattern of this address
    pub const fn value(self) -> u64
    {
        self.0
    }

    /// Whether this is the null address
    pub const fn is_null(self) -> bool
    {
        self.0 == 0
    }

    /// Add an offset, returning `None` on overflow
    ///
    /// ```rust
    /// use regsnap_core::types::Address;
    ///
    /// assert_eq!(Address::new(u64::MAX).checked_add(1), None);
    /// ```
    pub fn checked_add(self, offset: u64) -> Option<Self>
    {
        self.0.checked_add(offset).map(Address)
    }

    /// Subtract an offset, returning `None` on underflow
    pub fn checked_sub(self, offset: u64) -> Option<Self>
    {
        self.0.checked_sub(offset).map(Address)
    }
}

impl From<u64> for Address
{
    fn from(value: u64) -> Self
    {
        Address(value)
    }
}

impl From<Address> for u64
{
    fn from(address: Address) -> Self
    {
        address.0
    }
}

impl fmt::Display for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:016x}", self.0)
    }
}

impl fmt::LowerHex for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
