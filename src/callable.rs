use alloc::boxed::Box;

use crate::{
    any::Value,
    container::Container,
    errors::{InstantiateErrorKind, InstantiatorErrorKind, InvokeErrorKind},
    params::{Args, Params},
    resolver::resolve_args,
    service::{service_fn, BoxCloneService, Service as _},
    signature::Signature,
    utils::sharing::{SendBound, Shared, SyncBound},
};

pub(crate) type BoxedCloneCallable = BoxCloneService<Args, Value, InstantiateErrorKind>;
pub(crate) type BoxedCloneFactory = BoxCloneService<Container, Value, InvokeErrorKind>;

/// An invokable unit: a declared parameter-name list plus an erased body
/// taking the matching ordered argument list.
///
/// Usually built by the [`callable!`](crate::callable!) macro, which derives
/// the signature from the parameter list's source text; [`Callable::new`]
/// and [`Callable::with_names`] cover callables whose source text is not
/// available or not meaningful.
#[derive(Clone)]
pub struct Callable {
    signature: Signature,
    service: BoxedCloneCallable,
}

impl Callable {
    #[must_use]
    pub fn new<F>(signature: Signature, f: F) -> Self
    where
        F: FnMut(Args) -> Result<Value, InstantiateErrorKind> + Clone + SendBound + SyncBound + 'static,
    {
        Self {
            signature,
            service: BoxCloneService(Box::new(service_fn(f))),
        }
    }

    #[must_use]
    pub fn with_names<I, F>(names: I, f: F) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Box<str>>,
        F: FnMut(Args) -> Result<Value, InstantiateErrorKind> + Clone + SendBound + SyncBound + 'static,
    {
        Self::new(Signature::from_names(names), f)
    }

    #[inline]
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn call(&self, args: Args) -> Result<Value, InstantiateErrorKind> {
        self.service.clone().call(args)
    }
}

/// A type the container can instantiate through [`Container::construct`].
///
/// `inherited_declaration` encodes the constructor search along the type's
/// ancestry: a type without a declaration of its own delegates to its parent
/// (the [`constructible!`](crate::constructible!) `Child: Parent` form), so
/// the first explicitly declared constructor found toward the root supplies
/// the parameter list. A chain with no declaration at all yields `None` and
/// the parameter list is treated as empty.
pub trait Constructible: Sized + 'static {
    /// This type's own constructor declaration source, if it has one.
    #[must_use]
    fn declaration() -> Option<&'static str> {
        None
    }

    /// First constructor declaration found from this type toward the root.
    #[must_use]
    fn inherited_declaration() -> Option<&'static str> {
        Self::declaration()
    }

    /// Builds a value from the ordered argument list produced by
    /// auto-wiring the declared parameter names.
    ///
    /// # Errors
    /// Returns [`InstantiateErrorKind`] if a required argument is unset or
    /// of the wrong type, or if construction itself fails.
    fn build(args: Args) -> Result<Self, InstantiateErrorKind>;
}

#[must_use]
pub(crate) fn boxed_callable_factory(callable: Callable) -> BoxedCloneFactory {
    BoxCloneService(Box::new(service_fn(move |container: Container| {
        let args = resolve_args(&container, callable.signature(), &Params::new()).map_err(InstantiatorErrorKind::Deps)?;
        callable.call(args).map_err(InstantiatorErrorKind::Factory)
    })))
}

#[must_use]
pub(crate) fn boxed_constructor_factory<T>() -> BoxedCloneFactory
where
    T: Constructible + SendBound + SyncBound,
{
    BoxCloneService(Box::new(service_fn(move |container: Container| {
        container.construct::<T>(Params::new()).map(|value| Shared::new(value) as Value)
    })))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::format;
    use alloc::string::{String, ToString};
    use tracing_test::traced_test;

    use super::{Callable, Constructible};
    use crate::{
        container::Container,
        errors::InstantiateErrorKind,
        params::{Args, Params},
        utils::sharing::Shared,
        Value,
    };

    #[test]
    #[traced_test]
    fn test_with_names_auto_wires() {
        let container = Container::new();
        container.bind_instance("host", String::from("localhost"));

        let join = Callable::with_names(["host", "port"], |mut args: Args| {
            let host = args.take().downcast::<String>("host")?;
            let port = args.take().downcast_or::<u16, _>("port", || 80)?;
            Ok(Shared::new(alloc::format!("{host}:{port}")) as Value)
        });

        let url = container.invoke::<String>(&join, Params::new()).unwrap();
        assert_eq!(*url, "localhost:80");
    }

    #[test]
    #[traced_test]
    fn test_declaration_defaults() {
        struct Bare(#[allow(dead_code)] u8);

        impl Constructible for Bare {
            fn build(_args: Args) -> Result<Self, InstantiateErrorKind> {
                Ok(Self(0))
            }
        }

        assert!(Bare::declaration().is_none());
        assert!(Bare::inherited_declaration().is_none());

        let container = Container::new();
        assert!(container.construct::<Bare>(Params::new()).is_ok());
    }
}
