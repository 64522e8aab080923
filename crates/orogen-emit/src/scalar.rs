//! Leaf values and their exact textual forms.

use std::fmt;

/// A leaf value in an emitted document.
///
/// The downstream engine parses values positionally, so each variant renders
/// one canonical spelling: integers without padding, floats via Rust's
/// shortest round-trip formatting, colors as six-digit hex.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Raw text, emitted without quoting.
    Text(String),
    /// RGB color, emitted as `0xrrggbb`.
    Color(u32),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Text(v) => write!(f, "{v}"),
            Scalar::Color(v) => write!(f, "0x{v:06x}"),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<u64> for Scalar {
    fn from(v: u64) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_renders_plain() {
        assert_eq!(Scalar::Int(42).to_string(), "42");
        assert_eq!(Scalar::Int(-7).to_string(), "-7");
    }

    #[test]
    fn test_float_renders_shortest() {
        assert_eq!(Scalar::Float(0.5).to_string(), "0.5");
        assert_eq!(Scalar::Float(1.0).to_string(), "1");
    }

    #[test]
    fn test_color_renders_six_digit_hex() {
        assert_eq!(Scalar::Color(0x11AA44).to_string(), "0x11aa44");
        assert_eq!(Scalar::Color(0x00000F).to_string(), "0x00000f");
    }

    #[test]
    fn test_text_unquoted() {
        assert_eq!(Scalar::from("minecraft:stone").to_string(), "minecraft:stone");
    }
}
