/// Declares a categorical enumeration with a stable string code.
///
/// Every categorical field of a sector record (status, type, priority, ...)
/// is drawn from one of these; the code is what filters and fixtures use.
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => ($code:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Stable code used in fixtures and filter selections
            pub fn code(&self) -> &'static str {
                match self {
                    $( $name::$variant => $code, )+
                }
            }

            /// Human-readable label
            pub fn display_name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }

            /// All values in declaration order
            pub fn all() -> &'static [$name] {
                &[ $( $name::$variant, )+ ]
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $( $code => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

pub mod enums;
pub mod sectors;
pub mod shared;
