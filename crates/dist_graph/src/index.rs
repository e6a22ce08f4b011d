//! The element-type bound for [`crate::darray::DistributedArray`]'s
//! prefix-sum operation.
//!
//! This workspace fixes vertex ids to plain `usize`/`i64` rather than
//! threading a generic node-id type parameter through every graph and
//! input type, so the bound `DistributedArray::scan` needs reduces to
//! the one capability it actually uses: a zero value plus addition.

/// A type that can be accumulated with a running total, i.e. can back a
/// distributed array's inclusive prefix sum.
pub trait Idx: Copy + std::ops::Add<Output = Self> {
    fn zero() -> Self;
}

macro_rules! impl_idx {
    ($TYPE:ty) => {
        impl Idx for $TYPE {
            #[inline]
            fn zero() -> Self {
                0
            }
        }
    };
}

impl_idx!(u8);
impl_idx!(u16);
impl_idx!(u32);
impl_idx!(u64);
impl_idx!(usize);

impl_idx!(i8);
impl_idx!(i16);
impl_idx!(i32);
impl_idx!(i64);
impl_idx!(isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_additive_identity() {
        assert_eq!(3u64 + u64::zero(), 3u64);
        assert_eq!(-7i64 + i64::zero(), -7i64);
    }
}
