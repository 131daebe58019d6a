/// Builds a [`Callable`](crate::Callable) from an arrow-style declaration.
///
/// The parameter list's source text is handed to the signature extractor,
/// so the declared names are what `construct`/`invoke` auto-wire. Inside
/// the body every parameter is a [`Shared`](crate::utils::sharing::Shared)
/// handle; a `= default` expression is evaluated when the slot is unset.
/// The body yields `Result<T, InstantiateErrorKind>`.
///
/// ```text
/// callable!((host: String, port: u16 = 80) => Ok(format!("{host}:{port}")))
/// ```
#[macro_export]
macro_rules! callable {
    (() => $body:expr) => {{
        let signature = $crate::Signature::parse("() => {}");
        $crate::Callable::new(signature, move |_args: $crate::Args| {
            let result: Result<_, $crate::InstantiateErrorKind> = $body;
            result.map(|provided| $crate::utils::sharing::Shared::new(provided) as $crate::Value)
        })
    }};
    (( $($param:ident : $ty:ty $(= $default:expr)?),+ $(,)? ) => $body:expr) => {{
        let signature = $crate::Signature::parse(concat!(
            stringify!(( $($param : $ty $(= $default)?),+ )),
            " => {}",
        ));
        $crate::Callable::new(signature, move |mut args: $crate::Args| {
            $(
                let $param = $crate::callable_internal!(@arg args, $param : $ty $(= $default)?)?;
            )+
            let result: Result<_, $crate::InstantiateErrorKind> = $body;
            result.map(|provided| $crate::utils::sharing::Shared::new(provided) as $crate::Value)
        })
    }};
}

#[macro_export]
#[doc(hidden)]
macro_rules! callable_internal {
    // === Required argument ===
    // Example: callable_internal! { @arg args, engine : Engine }
    (@arg $args:ident, $param:ident : $ty:ty) => {
        $args.take().downcast::<$ty>(stringify!($param))
    };
    // === Defaulted argument ===
    // Example: callable_internal! { @arg args, cylinders : u8 = 4 }
    (@arg $args:ident, $param:ident : $ty:ty = $default:expr) => {
        $args.take().downcast_or::<$ty, _>(stringify!($param), || $default)
    };
}

/// Implements [`Constructible`](crate::Constructible) for a type.
///
/// Three forms:
/// - `constructible!(Name, (params) => body)` declares the type's own
///   constructor;
/// - `constructible!(Child: Parent)` declares none, so constructor lookup
///   continues at `Parent` and construction goes through
///   `Parent::build` plus `From<Parent>`;
/// - `constructible!(Child: Parent, (params) => body)` overrides an
///   inherited constructor with the child's own.
///
/// The generated declaration text is a class-style constructor, which is
/// what the signature extractor consumes at `construct` time.
#[macro_export]
macro_rules! constructible {
    ($name:ident, () => $body:expr) => {
        impl $crate::Constructible for $name {
            fn declaration() -> Option<&'static str> {
                Some(concat!("class ", stringify!($name), " { constructor() { } }"))
            }

            fn build(_args: $crate::Args) -> Result<Self, $crate::InstantiateErrorKind> {
                $body
            }
        }
    };
    ($name:ident, ( $($param:ident : $ty:ty $(= $default:expr)?),+ $(,)? ) => $body:expr) => {
        impl $crate::Constructible for $name {
            fn declaration() -> Option<&'static str> {
                Some(concat!(
                    "class ", stringify!($name),
                    " { constructor", stringify!(( $($param : $ty $(= $default)?),+ )), " { } }",
                ))
            }

            fn build(mut args: $crate::Args) -> Result<Self, $crate::InstantiateErrorKind> {
                $(
                    let $param = $crate::callable_internal!(@arg args, $param : $ty $(= $default)?)?;
                )+
                $body
            }
        }
    };
    ($name:ident : $parent:ident, () => $body:expr) => {
        impl $crate::Constructible for $name {
            fn declaration() -> Option<&'static str> {
                Some(concat!("class ", stringify!($name), " { constructor() { } }"))
            }

            fn inherited_declaration() -> Option<&'static str> {
                Self::declaration().or_else(<$parent as $crate::Constructible>::inherited_declaration)
            }

            fn build(_args: $crate::Args) -> Result<Self, $crate::InstantiateErrorKind> {
                $body
            }
        }
    };
    ($name:ident : $parent:ident, ( $($param:ident : $ty:ty $(= $default:expr)?),+ $(,)? ) => $body:expr) => {
        impl $crate::Constructible for $name {
            fn declaration() -> Option<&'static str> {
                Some(concat!(
                    "class ", stringify!($name),
                    " { constructor", stringify!(( $($param : $ty $(= $default)?),+ )), " { } }",
                ))
            }

            fn inherited_declaration() -> Option<&'static str> {
                Self::declaration().or_else(<$parent as $crate::Constructible>::inherited_declaration)
            }

            fn build(mut args: $crate::Args) -> Result<Self, $crate::InstantiateErrorKind> {
                $(
                    let $param = $crate::callable_internal!(@arg args, $param : $ty $(= $default)?)?;
                )+
                $body
            }
        }
    };
    ($name:ident : $parent:ident) => {
        impl $crate::Constructible for $name {
            fn inherited_declaration() -> Option<&'static str> {
                <$parent as $crate::Constructible>::inherited_declaration()
            }

            fn build(args: $crate::Args) -> Result<Self, $crate::InstantiateErrorKind> {
                <$parent as $crate::Constructible>::build(args).map(Self::from)
            }
        }
    };
}

/// Builds a [`Params`](crate::Params) map. The absence marker is spelled
/// `unset`: the key is present, so it still wins over a container binding.
///
/// ```text
/// params! { "color" => String::from("green"), "engine" => unset }
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::Params::new() };
    ( $($rest:tt)+ ) => {{
        let mut params = $crate::Params::new();
        $crate::params_internal!(params; $($rest)+);
        params
    }};
}

#[macro_export]
#[doc(hidden)]
macro_rules! params_internal {
    // === Base case ===
    ($params:ident;) => {};
    // === Explicitly unset entry ===
    // Example: params_internal! { params; "engine" => unset }
    ($params:ident; $key:expr => unset $(, $($rest:tt)*)?) => {
        $params.insert_unset($key);
        $crate::params_internal!($params; $($($rest)*)?);
    };
    // === Value entry ===
    // Example: params_internal! { params; "color" => value }
    ($params:ident; $key:expr => $value:expr $(, $($rest:tt)*)?) => {
        $params.insert($key, $value);
        $crate::params_internal!($params; $($($rest)*)?);
    };
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::format;
    use alloc::string::{String, ToString};
    use tracing_test::traced_test;

    use crate::{Constructible, Container, InstantiateErrorKind, InstantiatorErrorKind, Params, Signature};

    struct Base {
        id: u32,
    }

    constructible!(Base, (id: u32 = 7) => Ok(Base { id: *id }));

    struct Middle {
        id: u32,
    }

    impl From<Base> for Middle {
        fn from(base: Base) -> Self {
            Self { id: base.id }
        }
    }

    constructible!(Middle: Base);

    struct Leaf {
        id: u32,
    }

    impl From<Middle> for Leaf {
        fn from(middle: Middle) -> Self {
            Self { id: middle.id }
        }
    }

    constructible!(Leaf: Middle);

    struct Tagged {
        tag: String,
    }

    constructible!(Tagged: Middle, (tag: String) => Ok(Tagged { tag: (*tag).clone() }));

    #[test]
    fn test_constructor_declaration_text() {
        let declaration = Base::declaration().unwrap();
        let signature = Signature::parse(declaration);
        assert_eq!(signature.iter().collect::<alloc::vec::Vec<_>>(), ["id"]);
    }

    #[test]
    fn test_inherited_declaration_walks_to_first_explicit() {
        assert!(Middle::declaration().is_none());
        assert_eq!(Middle::inherited_declaration(), Base::declaration());
        assert_eq!(Leaf::inherited_declaration(), Base::declaration());
    }

    #[test]
    fn test_own_declaration_stops_the_walk() {
        assert_eq!(Tagged::inherited_declaration(), Tagged::declaration());
    }

    #[test]
    #[traced_test]
    fn test_construct_through_ancestry() {
        let container = Container::new();

        let leaf = container.construct::<Leaf>(params! { "id" => 42u32 }).unwrap();
        assert_eq!(leaf.id, 42);

        let defaulted = container.construct::<Leaf>(Params::new()).unwrap();
        assert_eq!(defaulted.id, 7);
    }

    #[test]
    #[traced_test]
    fn test_callable_defaults_and_required() {
        let container = Container::new();

        let greet = callable!((name: String, punctuation: String = String::from("!")) => {
            Ok(alloc::format!("{name}{punctuation}"))
        });

        assert!(matches!(
            container.invoke_raw(&greet, Params::new()),
            Err(InstantiatorErrorKind::Factory(InstantiateErrorKind::MissingArgument { name })) if &*name == "name",
        ));
        assert_eq!(
            *container
                .invoke::<String>(&greet, params! { "name" => String::from("hi") })
                .unwrap(),
            "hi!",
        );
    }

    #[test]
    #[traced_test]
    fn test_callable_without_parameters() {
        let container = Container::new();

        let answer = callable!(() => Ok(42u8));
        assert_eq!(*container.invoke::<u8>(&answer, Params::new()).unwrap(), 42);
    }

    #[test]
    fn test_params_literal() {
        let params = params! {
            "color" => String::from("green"),
            "engine" => unset,
        };

        assert_eq!(params.len(), 2);
        assert!(params.contains("color"));
        assert!(params.contains("engine"));

        let empty = params! {};
        assert!(empty.is_empty());
    }

    #[test]
    #[traced_test]
    fn test_params_unset_pins_the_slot() {
        let container = Container::new();
        container.bind_instance("id", 42u32);

        let defaulted = container.construct::<Base>(params! { "id" => unset }).unwrap();
        assert_eq!(defaulted.id, 7);

        let bound = container.construct::<Base>(Params::new()).unwrap();
        assert_eq!(bound.id, 42);
    }
}
