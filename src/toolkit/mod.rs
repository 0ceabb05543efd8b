//! Compact identification-key and character-set toolkit
//!
//! This is the backend the demo forms drive: character-set string creators,
//! GS1 check digits, prefixes, identification-key creators and validators,
//! and the GTIN-specific conversions.

pub mod character_set;
pub mod check;
pub mod error;
pub mod gtin;
pub mod key;
pub mod prefix;

pub use character_set::{
    AI39_CREATOR, AI82_CREATOR, ALPHABETIC_CREATOR, ALPHANUMERIC_CREATOR, CharacterSetCreator,
    Exclusion, HEXADECIMAL_CREATOR, MAXIMUM_SEQUENCE_COUNT, MAXIMUM_STRING_LENGTH,
    NUMERIC_CREATOR, StringValidation,
};
pub use error::ToolkitError;
pub use gtin::GtinLevel;
pub use key::{IdentificationKeyCreator, IdentificationKeyType, KeyCategory, SerialComponent};
pub use prefix::{PrefixManager, PrefixType};
