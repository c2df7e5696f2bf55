//! Opaque string identifiers for cellar entities.

/// Define an opaque, non-empty string identifier newtype.
///
/// Generated types reject empty input and input with surrounding whitespace,
/// serialise as plain strings, and offer a UUID v4 generator.
macro_rules! define_identifier {
    ($(#[$outer:meta])* $name:ident, $label:literal) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct an identifier from borrowed input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, $crate::domain::DomainError> {
                Self::from_owned(id.as_ref().to_owned())
            }

            /// Generate a random UUID-backed identifier.
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4().to_string())
            }

            fn from_owned(id: String) -> Result<Self, $crate::domain::DomainError> {
                if id.is_empty() {
                    return Err($crate::domain::DomainError::invalid_data(concat!(
                        $label,
                        " must not be empty"
                    )));
                }
                if id.trim() != id {
                    return Err($crate::domain::DomainError::invalid_data(concat!(
                        $label,
                        " must not contain surrounding whitespace"
                    )));
                }
                Ok(Self(id))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }
    };
}

pub(crate) use define_identifier;
