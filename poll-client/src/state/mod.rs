use log::warn;

use crate::error::{PollClientError, Result};

pub mod poll;
pub mod poll_count;
pub mod poll_voter;

pub use poll::{Poll, PollOption};
pub use poll_count::PollCount;
pub use poll_voter::PollVoter;

/// A record stored at a fixed byte layout inside a program-owned account.
pub trait AccountLayout: Sized {
    /// Name used in errors and logs.
    const NAME: &'static str;
    /// Schema length in bytes. Longer buffers are accepted, trailing bytes ignored.
    const LEN: usize;

    /// Reads the record from `src`, failing with `MalformedAccount` when `src` is shorter
    /// than [`Self::LEN`].
    fn unpack(src: &[u8]) -> Result<Self>;

    /// Writes the record in its exact on-chain layout.
    fn pack(&self) -> Vec<u8>;

    /// Decodes raw account data; `None` is an account that has not been created yet.
    fn decode(raw: Option<&[u8]>) -> Result<Option<Self>> {
        raw.map(Self::unpack).transpose()
    }
}

/// What a caller holds for an account between ledger round trips.
///
/// Every notification replaces the whole snapshot; fields are never patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountSnapshot<T> {
    /// No response from the ledger yet.
    Pending,
    /// The ledger answered and the account does not exist.
    NotCreated,
    Ready(T),
}

impl<T> Default for AccountSnapshot<T> {
    fn default() -> Self {
        Self::Pending
    }
}

impl<T> AccountSnapshot<T> {
    pub fn from_decoded(decoded: Option<T>) -> Self {
        decoded.map_or(Self::NotCreated, Self::Ready)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AccountSnapshot<U> {
        match self {
            Self::Pending => AccountSnapshot::Pending,
            Self::NotCreated => AccountSnapshot::NotCreated,
            Self::Ready(record) => AccountSnapshot::Ready(f(record)),
        }
    }
}

/// Borrows the first `N` bytes of `src` as a fixed array.
pub(crate) fn fixed<'a, const N: usize>(
    account: &'static str,
    src: &'a [u8],
) -> Result<&'a [u8; N]> {
    let malformed = PollClientError::MalformedAccount {
        account,
        expected: N,
        actual: src.len(),
    };
    src.get(..N)
        .and_then(|head| <&[u8; N]>::try_from(head).ok())
        .ok_or(malformed)
}

pub(crate) fn read_bool(src: &[u8], offset: usize) -> bool {
    src[offset] != 0
}

pub(crate) fn read_u64(src: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&src[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}

/// Logical value of a fixed-width text field: the first `length` bytes, padding ignored.
pub(crate) fn read_text(field: &[u8], length: u8, name: &str) -> String {
    let length = if length as usize > field.len() {
        warn!(
            "{} length {} exceeds field width {}, clamping",
            name,
            length,
            field.len()
        );
        field.len()
    } else {
        length as usize
    };
    String::from_utf8_lossy(&field[..length]).into_owned()
}

/// Space-pads `text` into a fixed-width field, the way the poll program stores it.
pub(crate) fn write_text(field: &mut [u8], text: &str) {
    let bytes = text.as_bytes();
    let written = bytes.len().min(field.len());
    field[..written].copy_from_slice(&bytes[..written]);
    field[written..].fill(b' ');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_text_ignores_padding() {
        let mut zero_padded = [0u8; 10];
        zero_padded[..3].copy_from_slice(b"abc");
        let mut garbage_padded = [0xffu8; 10];
        garbage_padded[..3].copy_from_slice(b"abc");
        assert_eq!(read_text(&zero_padded, 3, "title"), "abc");
        assert_eq!(
            read_text(&zero_padded, 3, "title"),
            read_text(&garbage_padded, 3, "title")
        );
    }

    #[test]
    fn test_read_text_clamps_length() {
        let field = *b"abcd";
        assert_eq!(read_text(&field, 200, "title"), "abcd");
    }

    #[test]
    fn test_fixed_rejects_short_buffer() {
        assert_eq!(
            fixed::<4>("PollVoter", &[1, 2, 3]),
            Err(PollClientError::MalformedAccount {
                account: "PollVoter",
                expected: 4,
                actual: 3,
            })
        );
        assert_eq!(fixed::<2>("PollCount", &[1, 2, 3]).unwrap(), &[1, 2]);
    }

    #[test]
    fn test_snapshot_defaults_to_pending() {
        let snapshot: AccountSnapshot<PollCount> = AccountSnapshot::default();
        assert!(snapshot.is_pending());
        assert_eq!(
            AccountSnapshot::<u8>::from_decoded(None),
            AccountSnapshot::NotCreated
        );
        assert_eq!(AccountSnapshot::from_decoded(Some(3)).map(|v| v + 1).ready(), Some(&4));
    }
}
