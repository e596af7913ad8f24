//! Macros for reducing boilerplate when defining record types
//!
//! These macros generate the repetitive trait implementations needed
//! for each record's field enum.

/// Macro to declare the field enum of a record type
///
/// Generates the enum itself, a [`FieldKey`](crate::core::field::FieldKey)
/// implementation (canonical name, aliases, default sort field) and `Display`.
///
/// # Example
/// ```rust,ignore
/// record_fields! {
///     pub enum CourseField (default = Title) {
///         Title => "title",
///         CourseCode => "course_code" | "courseCode",
///     }
/// }
///
/// assert_eq!(CourseField::parse("courseCode"), Some(CourseField::CourseCode));
/// ```
#[macro_export]
macro_rules! record_fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident (default = $default:ident) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $key:literal $(| $alias:literal)*
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::core::field::FieldKey for $name {
            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $key, )+
                }
            }

            fn aliases(self) -> &'static [&'static str] {
                match self {
                    $( Self::$variant => &[$($alias),*], )+
                }
            }

            fn all() -> &'static [Self] {
                &[$( Self::$variant, )+]
            }

            fn default_sort() -> Self {
                Self::$default
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::field::FieldKey::name(*self))
            }
        }
    };
}
