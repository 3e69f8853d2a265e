//! Digit packing for PIN fields
//!
//! Every ISO 9564-1 PIN field starts with the control field and PIN length
//! nibbles in byte 0, followed by one digit per nibble from byte 1 onwards
//! (ISO 9564-1:2017 9.3.2.2). Digit index `i` lives in byte `i / 2 + 1`, in the
//! high nibble for even `i` and the low nibble for odd `i`.

use crate::types::PinBlockFormat;

/// Number of digit nibbles available in an 8-byte PIN field
pub(crate) const DIGIT_NIBBLES: usize = 14;

/// Write a 4-bit value at absolute nibble position `position` of `field`
#[inline]
pub(crate) fn set_nibble(field: &mut [u8], position: usize, value: u8) {
    let byte = &mut field[position >> 1];
    if position & 0x1 == 0 {
        *byte = (*byte & 0x0F) | (value << 4);
    } else {
        *byte = (*byte & 0xF0) | (value & 0x0F);
    }
}

/// Read the 4-bit value at absolute nibble position `position` of `field`
#[inline]
pub(crate) fn nibble_at(field: &[u8], position: usize) -> u8 {
    let byte = field[position >> 1];
    if position & 0x1 == 0 {
        byte >> 4
    } else {
        byte & 0x0F
    }
}

/// Write a 4-bit value at digit index `index`
#[inline]
pub(crate) fn set_digit(field: &mut [u8], index: usize, digit: u8) {
    set_nibble(field, index + 2, digit);
}

/// Read the 4-bit value at digit index `index`
#[inline]
pub(crate) fn digit_at(field: &[u8], index: usize) -> u8 {
    nibble_at(field, index + 2)
}

/// Pack the control field, PIN length and PIN digits into `field`
///
/// All nibbles after the last PIN digit are set to `fill`. The PIN length is
/// masked to 4 bits; range checks belong to the caller.
pub(crate) fn pack_pin(field: &mut [u8], format: PinBlockFormat, pin: &[u8], fill: u8) {
    let fill = fill & 0x0F;
    field.fill((fill << 4) | fill);

    let pin_len = pin.len() & 0x0F;
    field[0] = (format.nibble() << 4) | pin_len as u8;
    for (i, &digit) in pin.iter().take(pin_len).enumerate() {
        set_digit(field, i, digit);
    }
}

/// Pack the nibbles of `padding` (high nibble first) from digit index `start`
///
/// Nibbles that would fall beyond the first `DIGIT_NIBBLES` digit positions
/// are dropped.
pub(crate) fn pack_padding(field: &mut [u8], start: usize, padding: &[u8]) {
    let nibbles = padding.iter().flat_map(|&b| [b >> 4, b & 0x0F]);
    for (index, nibble) in (start..DIGIT_NIBBLES).zip(nibbles) {
        set_digit(field, index, nibble);
    }
}

/// Unpack `out.len()` digits starting at the second byte of `field`
pub(crate) fn unpack_pin(field: &[u8], out: &mut [u8]) {
    for (i, digit) in out.iter_mut().enumerate() {
        *digit = digit_at(field, i);
    }
}

/// Control field nibble of a block
#[inline]
pub(crate) fn format_nibble(block: &[u8]) -> u8 {
    block[0] >> 4
}

/// PIN length nibble of a PIN field
#[inline]
pub(crate) fn length_nibble(block: &[u8]) -> usize {
    (block[0] & 0x0F) as usize
}

/// XOR `mask` into `target` byte by byte
#[inline]
pub(crate) fn xor_in_place(target: &mut [u8], mask: &[u8]) {
    for (t, m) in target.iter_mut().zip(mask) {
        *t ^= m;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_even_length() {
        let mut field = [0u8; 8];
        pack_pin(&mut field, PinBlockFormat::Format0, &[1, 2, 3, 4], 0xF);
        assert_eq!(field, [0x04, 0x12, 0x34, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_pack_odd_length() {
        let mut field = [0u8; 8];
        pack_pin(&mut field, PinBlockFormat::Format2, &[3, 4, 5, 6, 7], 0xF);
        assert_eq!(field, [0x25, 0x34, 0x56, 0x7F, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_pack_max_length() {
        let mut field = [0u8; 8];
        let pin = [9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 9, 8];
        pack_pin(&mut field, PinBlockFormat::Format1, &pin, 0xA);
        assert_eq!(field, [0x1C, 0x98, 0x76, 0x54, 0x32, 0x10, 0x98, 0xAA]);
    }

    #[test]
    fn test_unpack() {
        let field = [0x25, 0x34, 0x56, 0x7F, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut out = [0u8; 5];
        unpack_pin(&field, &mut out);
        assert_eq!(out, [3, 4, 5, 6, 7]);
        assert_eq!(format_nibble(&field), 2);
        assert_eq!(length_nibble(&field), 5);
    }

    #[test]
    fn test_pack_padding_continues_digit_index() {
        let mut field = [0u8; 8];
        pack_pin(&mut field, PinBlockFormat::Format1, &[1, 2, 3, 4, 5], 0x0);
        pack_padding(&mut field, 5, &[0xED, 0xCB, 0xA9, 0x87, 0x6F]);
        assert_eq!(field, [0x15, 0x12, 0x34, 0x5E, 0xDC, 0xBA, 0x98, 0x76]);
    }

    #[test]
    fn test_pack_padding_stops_at_field_end() {
        let mut field = [0u8; 16];
        pack_padding(&mut field, 12, &[0x12, 0x34]);
        assert_eq!(field[7], 0x12);
        assert_eq!(field[8], 0x00);
    }

    #[test]
    fn test_xor_in_place() {
        let mut target = [0x04, 0x12, 0x34, 0xFF];
        xor_in_place(&mut target, &[0x00, 0x00, 0x40, 0x12]);
        assert_eq!(target, [0x04, 0x12, 0x74, 0xED]);
    }
}
