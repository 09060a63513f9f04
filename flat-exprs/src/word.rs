//! Packed word layout of a single expression node.
//!
//! Every node starts with a header word. The low [`TYPE_BITS`] bits hold the
//! [`ExprType`] tag; the remaining high bits hold either an inline payload
//! (small integers, small symbols, small strings) or the total size of the
//! node in words (everything else).
//!
//! ```text
//! small int      [ value << 4 | 0 ]
//! small symbol   [ b6 .. b1 b0 | 00 | 1 ]        name bytes from byte 1 up
//! builtin        [ id << 16 | 00 | 1 ]           byte 1 is zero
//! big int        [ size << 4 | 3/4 ][ limb0 ][ limb1 ] ...
//! big symbol/str [ size << 4 | 5/6 ][ nbytes ][ packed bytes ] ...
//! call0..call4   [ size << 4 | 7..11 ][ func ][ arg0 ] ...
//! calln          [ size << 4 | 12 ][ nargs ][ func ][ arg0 ] ...
//! ```
//!
//! Limbs and packed bytes are little-endian so the layout does not depend on
//! the byte order of the host.

use core::fmt;

/// A machine word; the unit of storage for expressions.
pub type Word = usize;

/// Number of bits in a [`Word`].
pub const WORD_BITS: u32 = Word::BITS;

/// Number of bytes in a [`Word`].
pub const WORD_BYTES: usize = (Word::BITS / 8) as usize;

/// Number of low header bits holding the type tag.
pub const TYPE_BITS: u32 = 4;

/// Mask selecting the type tag of a header word.
pub const TYPE_MASK: Word = (1 << TYPE_BITS) - 1;

/// Largest integer stored inline as a small integer.
pub const COEFF_MAX: isize = (1 << (WORD_BITS - TYPE_BITS - 1)) - 1;

/// Smallest integer stored inline as a small integer.
pub const COEFF_MIN: isize = -COEFF_MAX;

/// Size of a header in words.
pub const HEADER_SIZE: usize = 1;

/// Longest symbol or string name stored inline in the header word.
pub const SMALL_SYMBOL_LEN: usize = WORD_BYTES - 1;

/// Shift of the builtin id inside a builtin symbol header.
pub(crate) const BUILTIN_SHIFT: u32 = 16;

/// Type tag of an encoded node.
///
/// The discriminants are part of the binary layout and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(usize)]
pub enum ExprType {
    SmallInt = 0,
    SmallSymbol = 1,
    SmallString = 2,
    BigIntPos = 3,
    BigIntNeg = 4,
    BigSymbol = 5,
    BigString = 6,
    Call0 = 7,
    Call1 = 8,
    Call2 = 9,
    Call3 = 10,
    Call4 = 11,
    CallN = 12,
}

impl ExprType {
    /// The total number of type tags.
    pub const COUNT: usize = 13;

    /// Names of each tag, in discriminant order.
    pub const STRS: &[&str] = &[
        "small_int",
        "small_symbol",
        "small_string",
        "big_int_pos",
        "big_int_neg",
        "big_symbol",
        "big_string",
        "call0",
        "call1",
        "call2",
        "call3",
        "call4",
        "calln",
    ];

    const ALL: [ExprType; Self::COUNT] = [
        ExprType::SmallInt,
        ExprType::SmallSymbol,
        ExprType::SmallString,
        ExprType::BigIntPos,
        ExprType::BigIntNeg,
        ExprType::BigSymbol,
        ExprType::BigString,
        ExprType::Call0,
        ExprType::Call1,
        ExprType::Call2,
        ExprType::Call3,
        ExprType::Call4,
        ExprType::CallN,
    ];

    /// Decodes the tag of a header word.
    ///
    /// # Panics
    ///
    /// Panics on a tag outside the 13 defined values: such a header can only
    /// come from a corrupted buffer.
    #[inline]
    pub fn from_header(head: Word) -> Self {
        match Self::ALL.get(head & TYPE_MASK) {
            Some(t) => *t,
            None => panic!("corrupt expression header {head:#x}"),
        }
    }

    /// Returns the call tag for `nargs` arguments.
    #[inline]
    pub fn call(nargs: usize) -> Self {
        match nargs {
            0 => ExprType::Call0,
            1 => ExprType::Call1,
            2 => ExprType::Call2,
            3 => ExprType::Call3,
            4 => ExprType::Call4,
            _ => ExprType::CallN,
        }
    }

    /// Returns `true` for the inline one-word atoms.
    #[inline]
    pub const fn is_small(self) -> bool {
        (self as usize) <= ExprType::SmallString as usize
    }

    /// Returns `true` for every atom variant.
    #[inline]
    pub const fn is_atom(self) -> bool {
        (self as usize) <= ExprType::BigString as usize
    }

    /// Returns `true` for every call variant.
    #[inline]
    pub const fn is_call(self) -> bool {
        !self.is_atom()
    }

    /// Number of words preceding the function of a call.
    #[inline]
    pub const fn call_prefix(self) -> usize {
        match self {
            ExprType::CallN => HEADER_SIZE + 1,
            _ => HEADER_SIZE,
        }
    }

    /// Returns a string describing the kind of node carrying this tag.
    #[inline]
    pub const fn kind_name(self) -> &'static str {
        match self {
            ExprType::SmallInt | ExprType::BigIntPos | ExprType::BigIntNeg => "integer",
            ExprType::SmallSymbol | ExprType::BigSymbol => "symbol",
            ExprType::SmallString | ExprType::BigString => "string",
            _ => "call",
        }
    }
}

impl fmt::Display for ExprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::STRS[*self as usize])
    }
}

/// Builds a header word for a sized node.
#[inline]
pub(crate) fn header(tag: ExprType, size: usize) -> Word {
    debug_assert!(!tag.is_small());
    debug_assert!(size < (1 << (WORD_BITS - TYPE_BITS)));
    (tag as Word) | (size << TYPE_BITS)
}

/// Size in words of the node whose header is `head`.
#[inline]
pub(crate) fn size_of_header(head: Word) -> usize {
    if ExprType::from_header(head).is_small() {
        1
    } else {
        head >> TYPE_BITS
    }
}

/// Header of a small integer. The caller guarantees the range.
#[inline]
pub(crate) fn small_int_header(value: isize) -> Word {
    debug_assert!((COEFF_MIN..=COEFF_MAX).contains(&value));
    ((value as Word) << TYPE_BITS) | ExprType::SmallInt as Word
}

/// Inline value of a small integer header.
#[inline]
pub(crate) fn small_int_value(head: Word) -> isize {
    (head as isize) >> TYPE_BITS
}

/// Packs up to [`SMALL_SYMBOL_LEN`] bytes into a small symbol or string
/// header. Byte `i` of the name lands in byte `i + 1` of the word.
#[inline]
pub(crate) fn pack_small(tag: ExprType, bytes: &[u8]) -> Word {
    debug_assert!(bytes.len() <= SMALL_SYMBOL_LEN);
    bytes
        .iter()
        .enumerate()
        .fold(tag as Word, |head, (i, b)| head | ((*b as Word) << ((i + 1) * 8)))
}

/// Unpacks the inline name bytes of a small symbol or string header.
#[inline]
pub(crate) fn unpack_small(head: Word) -> ([u8; SMALL_SYMBOL_LEN], usize) {
    let mut buf = [0u8; SMALL_SYMBOL_LEN];
    let mut len = 0;
    while len < SMALL_SYMBOL_LEN {
        let b = ((head >> ((len + 1) * 8)) & 0xff) as u8;
        if b == 0 {
            break;
        }
        buf[len] = b;
        len += 1;
    }
    (buf, len)
}

/// Number of words needed for `nbytes` packed bytes.
#[inline]
pub(crate) fn words_for_bytes(nbytes: usize) -> usize {
    nbytes.div_ceil(WORD_BYTES)
}

/// Appends `bytes` to `out`, packed little-endian and zero padded.
pub(crate) fn push_bytes(out: &mut Vec<Word>, bytes: &[u8]) {
    for chunk in bytes.chunks(WORD_BYTES) {
        let mut buf = [0u8; WORD_BYTES];
        buf[..chunk.len()].copy_from_slice(chunk);
        out.push(Word::from_le_bytes(buf));
    }
}

/// Unpacks `nbytes` bytes previously written by [`push_bytes`].
pub(crate) fn read_bytes(words: &[Word], nbytes: usize) -> Vec<u8> {
    let mut out: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    out.truncate(nbytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_dense_and_ordered() {
        for (i, t) in ExprType::ALL.iter().enumerate() {
            assert_eq!(*t as usize, i);
            assert_eq!(ExprType::from_header(i), *t);
        }
        assert_eq!(ExprType::STRS.len(), ExprType::COUNT);
    }

    #[test]
    #[should_panic]
    fn corrupt_tag_panics() {
        ExprType::from_header(13);
    }

    #[test]
    fn small_int_range_is_symmetric() {
        assert_eq!(COEFF_MIN, -COEFF_MAX);
        assert_eq!(small_int_value(small_int_header(COEFF_MAX)), COEFF_MAX);
        assert_eq!(small_int_value(small_int_header(COEFF_MIN)), COEFF_MIN);
        assert_eq!(small_int_value(small_int_header(-1)), -1);
        assert_eq!(small_int_header(0), 0);
    }

    #[test]
    fn small_names_pack_into_one_word() {
        let head = pack_small(ExprType::SmallSymbol, b"abc");
        assert_eq!(ExprType::from_header(head), ExprType::SmallSymbol);
        let (buf, len) = unpack_small(head);
        assert_eq!(&buf[..len], b"abc");
        assert_eq!(size_of_header(head), 1);
    }

    #[test]
    fn bytes_round_trip_through_words() {
        let bytes: Vec<u8> = (1..=19).collect();
        let mut words = Vec::new();
        push_bytes(&mut words, &bytes);
        assert_eq!(words.len(), words_for_bytes(bytes.len()));
        assert_eq!(read_bytes(&words, bytes.len()), bytes);
    }

    #[test]
    fn sized_header_reports_size() {
        let head = header(ExprType::Call2, 5);
        assert_eq!(ExprType::from_header(head), ExprType::Call2);
        assert_eq!(size_of_header(head), 5);
        assert_eq!(ExprType::CallN.call_prefix(), 2);
        assert_eq!(ExprType::call(7), ExprType::CallN);
    }
}
