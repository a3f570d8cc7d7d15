//! Closed keyword sets.
//!
//! Every enumerated MJCF attribute is declared once through
//! [`keywords!`]: the variant list carries the exact attribute spelling,
//! and the macro derives the serde renames, the parser and the renderer
//! from that single declaration.

/// A value drawn from a closed set of attribute tokens.
pub trait Keyword: Copy + Sized {
    /// Every accepted spelling, in declaration order.
    const CHOICES: &'static [&'static str];

    /// The exact attribute spelling of this token.
    fn as_str(self) -> &'static str;

    /// Parse a raw token, failing with `InvalidChoice` for anything
    /// outside the set.
    fn parse(field: &'static str, raw: &str) -> Result<Self, crate::error::ValueError>;
}

macro_rules! keywords {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $kw:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $kw)]
                $variant,
            )+
        }

        impl $crate::choice::Keyword for $name {
            const CHOICES: &'static [&'static str] = &[$($kw),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $kw,)+
                }
            }

            fn parse(
                field: &'static str,
                raw: &str,
            ) -> Result<Self, $crate::error::ValueError> {
                match raw {
                    $($kw => Ok(Self::$variant),)+
                    _ => Err($crate::error::ValueError::InvalidChoice {
                        field,
                        value: raw.to_string(),
                        expected: Self::CHOICES,
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::choice::Keyword::as_str(*self))
            }
        }
    };
}

pub(crate) use keywords;
