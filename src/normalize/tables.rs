use super::{canonical_spelling, TypeNormalizer, UnknownTypeError};
use crate::core::{Dialect, WireType};

/// Static spelling table for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct TypeTable {
    dialect: Dialect,
    entries: &'static [(&'static str, WireType)],
}

/// C++ host spellings, as written in the wrapper prototypes.
pub static NATIVE_HOST_TYPES: TypeTable = TypeTable {
    dialect: Dialect::NativeHost,
    entries: &[
        ("int32_t", WireType::Int32),
        ("uint32_t", WireType::UInt32),
        ("int64_t", WireType::Int64),
        ("uint8_t const*", WireType::ImmutableBytePointer),
        ("const uint8_t*", WireType::ImmutableBytePointer),
        ("uint8_t*", WireType::MutableBytePointer),
    ],
};

/// Rust guest spellings. `usize` is 32 bits on wasm32, hence `Int32`.
pub static GUEST_TYPES: TypeTable = TypeTable {
    dialect: Dialect::Guest,
    entries: &[
        ("i32", WireType::Int32),
        ("u32", WireType::UInt32),
        ("usize", WireType::Int32),
        ("i64", WireType::Int64),
        ("*const u8", WireType::ImmutableBytePointer),
        ("*mut u8", WireType::MutableBytePointer),
    ],
};

impl TypeTable {
    pub fn for_dialect(dialect: Dialect) -> &'static TypeTable {
        match dialect {
            Dialect::NativeHost => &NATIVE_HOST_TYPES,
            Dialect::Guest => &GUEST_TYPES,
        }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &'static [(&'static str, WireType)] {
        self.entries
    }
}

impl TypeNormalizer for TypeTable {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn normalize(&self, token: &str) -> Result<WireType, UnknownTypeError> {
        let spelling = canonical_spelling(token);
        self.entries
            .iter()
            .find(|(known, _)| *known == spelling)
            .map(|(_, wire)| *wire)
            .ok_or_else(|| UnknownTypeError {
                token: token.trim().to_string(),
                dialect: self.dialect,
            })
    }
}
