//! Overflow-checked size arithmetic.
//!
//! Every byte count derived from header-declared width, height or channel
//! values goes through these helpers. Nothing here wraps.

use crate::error::ConvertError;

/// `a * b`, or `None` on overflow.
#[inline]
pub fn checked_multiply(a: usize, b: usize) -> Option<usize> {
    a.checked_mul(b)
}

/// `a + b`, or `None` on overflow.
#[inline]
pub fn checked_add(a: usize, b: usize) -> Option<usize> {
    a.checked_add(b)
}

/// `a * b`, mapping overflow to [`ConvertError::Overflow`] tagged with `what`.
#[inline]
pub(crate) fn mul_or_overflow(a: usize, b: usize, what: &'static str) -> Result<usize, ConvertError> {
    checked_multiply(a, b).ok_or(ConvertError::Overflow(what))
}

/// `a + b`, mapping overflow to [`ConvertError::Overflow`] tagged with `what`.
#[inline]
pub(crate) fn add_or_overflow(a: usize, b: usize, what: &'static str) -> Result<usize, ConvertError> {
    checked_add(a, b).ok_or(ConvertError::Overflow(what))
}

/// Round a byte count up to the next multiple of 4 (BMP scanline alignment).
#[inline]
pub(crate) fn align4(n: usize, what: &'static str) -> Result<usize, ConvertError> {
    Ok(add_or_overflow(n, 3, what)? & !3)
}
