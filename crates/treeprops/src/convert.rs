//! Typed views of stored string values.

use std::path::PathBuf;

/// A type a stored property string can be read as.
///
/// Conversion is strict: surrounding whitespace is not trimmed and partial
/// parses are rejected.
pub trait FromPropertyValue: Sized {
    /// Name used in conversion errors.
    const TYPE_NAME: &'static str;

    fn from_property_value(value: &str) -> Option<Self>;
}

/// `true` and `false`, in any letter case.
impl FromPropertyValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_property_value(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("true") {
            Some(true)
        } else if value.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl FromPropertyValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_property_value(value: &str) -> Option<Self> {
        Some(value.to_string())
    }
}

impl FromPropertyValue for PathBuf {
    const TYPE_NAME: &'static str = "path";

    fn from_property_value(value: &str) -> Option<Self> {
        Some(PathBuf::from(value))
    }
}

macro_rules! from_str_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromPropertyValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_property_value(value: &str) -> Option<Self> {
                    value.parse().ok()
                }
            }
        )*
    };
}

from_str_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char,
);
