//! Declarative helpers shared across the crate

/// Declare a fieldless enum together with its wire tag table.
///
/// The variant list and the tag list are the same list, so a variant can't
/// exist without a tag and the generated matches stay exhaustive.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $wire:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $tag:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::decode::WireEnum for $name {
            const NAME: &'static str = $wire;

            fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $( $tag => Some($name::$variant), )+
                    _ => None,
                }
            }

            fn tag(self) -> &'static str {
                match self {
                    $( $name::$variant => $tag, )+
                }
            }
        }
    };
}
