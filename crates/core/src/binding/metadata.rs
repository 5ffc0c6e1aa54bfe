// Model metadata for binding targets
//
// Declares, per target type, whether the delimited binder can produce it.
// Decision: Resolved at compile time through trait impls instead of inspecting types at runtime

use std::collections::VecDeque;
use std::fmt::Display;
use std::str::FromStr;

use super::delimited::{parse_delimited, ConversionError};

/// Conversion from an optional raw value into a delimited collection model.
pub type DelimitedParser<M> = fn(Option<&str>) -> Result<M, ConversionError>;

/// Static description of a binding target.
///
/// Finite ordered collections of a single scalar element type return a
/// parser from [`ModelMetadata::delimited_parser`]; every other type keeps
/// the default `None`, which makes the delimited binder decline.
pub trait ModelMetadata: Sized {
    /// Parser for the delimited form of this type, if it is a collection.
    fn delimited_parser() -> Option<DelimitedParser<Self>> {
        None
    }

    /// Whether this type is an enumerable collection target.
    fn is_enumerable() -> bool {
        Self::delimited_parser().is_some()
    }
}

impl<T> ModelMetadata for Vec<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn delimited_parser() -> Option<DelimitedParser<Self>> {
        let parser: DelimitedParser<Self> = parse_delimited::<T, Self>;
        Some(parser)
    }
}

impl<T> ModelMetadata for VecDeque<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn delimited_parser() -> Option<DelimitedParser<Self>> {
        let parser: DelimitedParser<Self> = parse_delimited::<T, Self>;
        Some(parser)
    }
}

impl<T> ModelMetadata for Box<[T]>
where
    T: FromStr,
    T::Err: Display,
{
    fn delimited_parser() -> Option<DelimitedParser<Self>> {
        let parser: DelimitedParser<Self> = parse_delimited::<T, Self>;
        Some(parser)
    }
}

macro_rules! scalar_metadata {
    ($($ty:ty),* $(,)?) => {
        $(impl ModelMetadata for $ty {})*
    };
}

scalar_metadata!(
    String,
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    uuid::Uuid,
    chrono::NaiveDate,
);
