//! Fixed-width base-91 integers over the APRS alphabet `!`..`{`.

use std::io::Write;

use crate::EncodeError;

const DIGIT_OFFSET: u8 = b'!';
const MAX_DIGIT: u8 = b'{';
const BASE: u32 = 91;

pub(crate) fn decode(b: &[u8]) -> Option<u32> {
    let mut val: u32 = 0;

    for &c in b {
        if !(DIGIT_OFFSET..=MAX_DIGIT).contains(&c) {
            return None;
        }

        val = val * BASE + u32::from(c - DIGIT_OFFSET);
    }

    Some(val)
}

pub(crate) fn encode<W: Write>(n: u32, width: usize, buf: &mut W) -> Result<(), EncodeError> {
    debug_assert!(width <= 8);

    let mut digits = [DIGIT_OFFSET; 8];
    let mut rest = n;

    for digit in digits.iter_mut().take(width).rev() {
        *digit = (rest % BASE) as u8 + DIGIT_OFFSET;
        rest /= BASE;
    }

    if rest > 0 {
        return Err(EncodeError::Base91Overflow(n, width));
    }

    buf.write_all(&digits[..width])?;

    Ok(())
}
