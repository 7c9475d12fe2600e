#![forbid(unsafe_code)]

use crate::TokenKind;

/// A set of token kinds, usable in `const` items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TokenSet(u128);

const _: () = assert!(TokenKind::COUNT <= 128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    pub const fn new(kinds: &[TokenKind]) -> TokenSet {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1u128 << (kinds[i] as u8);
            i += 1;
        }
        TokenSet(bits)
    }

    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }

    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & (1u128 << (kind as u8)) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}
