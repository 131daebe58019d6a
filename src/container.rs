use alloc::boxed::Box;
use core::any::{type_name, Any as _};
use parking_lot::Mutex;
use tracing::{debug, error, info_span};

use crate::{
    any::{TypeInfo, Value},
    callable::{boxed_callable_factory, boxed_constructor_factory, Callable, Constructible},
    config::Config,
    errors::{InstantiatorErrorKind, InvokeErrorKind, ResolveErrorKind},
    params::Params,
    registry::{BindingData, Entry, Registry},
    resolver::resolve_args,
    service::Service as _,
    signature::Signature,
    utils::sharing::{SendBound, Shared, SyncBound},
};

/// The identifier registry and both resolution entry points.
///
/// A `Container` is a cheap clone handle over shared state: factories
/// receive their own handle during resolution and may re-enter the
/// container for their auto-wired parameters.
#[derive(Clone, Default)]
pub struct Container {
    inner: Shared<ContainerInner>,
}

#[derive(Default)]
pub(crate) struct ContainerInner {
    registry: Mutex<Registry>,
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the identifier is registered as an instance, a binding or an
    /// alias. No alias-chain walk: a registered alias counts, whatever it
    /// points at.
    #[must_use]
    pub fn has(&self, identifier: &str) -> bool {
        self.inner.registry.lock().contains(identifier)
    }

    /// Gets the value registered under the identifier, downcast to `T`.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::UnknownIdentifier`] if the identifier
    ///   is not registered
    /// - Returns [`ResolveErrorKind::IncorrectType`] if the value has
    ///   another type
    /// - Returns [`ResolveErrorKind::Instantiator`] if the backing factory
    ///   fails
    pub fn get<T: SendBound + SyncBound + 'static>(&self, identifier: &str) -> Result<Shared<T>, ResolveErrorKind> {
        match self.get_raw(identifier)?.downcast::<T>() {
            Ok(value) => Ok(value),
            Err(value) => {
                let err = ResolveErrorKind::IncorrectType {
                    expected: TypeInfo::of::<T>(),
                    actual: value.as_ref().type_id(),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }

    /// Gets the value registered under the identifier as a type-erased
    /// handle.
    ///
    /// The alias chain is collapsed first. An existing instance is returned
    /// as-is; otherwise the binding's factory runs with its own declared
    /// parameters auto-wired, and a singleton binding is promoted: the value
    /// is stored as an instance and the binding entry removed, irreversibly.
    ///
    /// # Errors
    /// See [`Container::get`].
    pub fn get_raw(&self, identifier: &str) -> Result<Value, ResolveErrorKind> {
        let span = info_span!("get", identifier);
        let _guard = span.enter();

        let (target, entry) = {
            let registry = self.inner.registry.lock();
            if !registry.contains(identifier) {
                let err = ResolveErrorKind::UnknownIdentifier(identifier.into());
                error!("{}", err);
                return Err(err);
            }
            let target: Box<str> = registry.resolve_alias(identifier).into();
            let entry = registry.entry(&target);
            (target, entry)
        };

        let BindingData { mut factory, singleton } = match entry {
            Entry::Instance(value) => {
                debug!("Found instance");
                return Ok(value);
            }
            Entry::Binding(binding) => binding,
            Entry::Unbound => {
                let err = ResolveErrorKind::UnknownIdentifier(target);
                error!("{}", err);
                return Err(err);
            }
        };

        // the lock is released here: the factory may re-enter the container
        let value = match factory.call(self.clone()) {
            Ok(value) => value,
            Err(InstantiatorErrorKind::Deps(err)) => {
                error!("{}", err);
                return Err(ResolveErrorKind::Instantiator(InstantiatorErrorKind::Deps(Box::new(err))));
            }
            Err(InstantiatorErrorKind::Factory(err)) => {
                error!("{}", err);
                return Err(ResolveErrorKind::Instantiator(InstantiatorErrorKind::Factory(err)));
            }
        };

        if singleton {
            let mut registry = self.inner.registry.lock();
            if let Some(existing) = registry.instance(&target) {
                debug!("Already promoted by a concurrent resolution");
                return Ok(existing);
            }
            registry.promote(&target, value.clone());
            debug!("Promoted binding to instance");
        }

        Ok(value)
    }

    /// Creates a new `T`, auto-wiring the parameter list of the first
    /// explicit constructor declaration along its ancestry (empty if none).
    ///
    /// # Errors
    /// - Returns [`InstantiatorErrorKind::Deps`] if resolving a parameter
    ///   through the container fails
    /// - Returns [`InstantiatorErrorKind::Factory`] if the constructor body
    ///   fails
    pub fn construct<T: Constructible>(&self, params: Params) -> Result<T, InvokeErrorKind> {
        let span = info_span!("construct", dependency = type_name::<T>());
        let _guard = span.enter();

        let signature = T::inherited_declaration().map(Signature::parse).unwrap_or_default();
        let args = match resolve_args(self, &signature, &params) {
            Ok(args) => args,
            Err(err) => {
                error!("{}", err);
                return Err(InstantiatorErrorKind::Deps(err));
            }
        };
        match T::build(args) {
            Ok(value) => Ok(value),
            Err(err) => {
                error!("{}", err);
                Err(InstantiatorErrorKind::Factory(err))
            }
        }
    }

    /// Invokes the callable with its declared parameters auto-wired,
    /// downcasting the result to `T`.
    ///
    /// # Errors
    /// See [`Container::get`].
    pub fn invoke<T: SendBound + SyncBound + 'static>(&self, callable: &Callable, params: Params) -> Result<Shared<T>, ResolveErrorKind> {
        let value = self.invoke_signed(callable, params, None)?;
        self.downcast_invoked(value)
    }

    /// Same as [`Container::invoke`], with the parameter names taken from
    /// `signature` instead of the callable's own. Useful when the callable
    /// wraps another one and its own signature no longer reflects the
    /// parameters the body consumes.
    ///
    /// # Errors
    /// See [`Container::get`].
    pub fn invoke_with<T: SendBound + SyncBound + 'static>(
        &self,
        callable: &Callable,
        params: Params,
        signature: &Signature,
    ) -> Result<Shared<T>, ResolveErrorKind> {
        let value = self.invoke_signed(callable, params, Some(signature))?;
        self.downcast_invoked(value)
    }

    /// Invokes the callable and passes its result through untyped.
    ///
    /// # Errors
    /// - Returns [`InstantiatorErrorKind::Deps`] if resolving a parameter
    ///   through the container fails
    /// - Returns [`InstantiatorErrorKind::Factory`] if the callable body
    ///   fails
    pub fn invoke_raw(&self, callable: &Callable, params: Params) -> Result<Value, InvokeErrorKind> {
        self.invoke_signed(callable, params, None)
    }

    /// Untyped [`Container::invoke_with`].
    ///
    /// # Errors
    /// See [`Container::invoke_raw`].
    pub fn invoke_raw_with(&self, callable: &Callable, params: Params, signature: &Signature) -> Result<Value, InvokeErrorKind> {
        self.invoke_signed(callable, params, Some(signature))
    }

    /// Registers a value under the identifier. Unconditional upsert.
    pub fn bind_instance<T: SendBound + SyncBound + 'static>(&self, identifier: &str, value: T) {
        self.bind_instance_shared(identifier, Shared::new(value));
    }

    /// Registers an already shared value under the identifier, keeping its
    /// handle identity. Unconditional upsert.
    pub fn bind_instance_shared<T: SendBound + SyncBound + 'static>(&self, identifier: &str, value: Shared<T>) {
        debug!(identifier, "Bind instance");
        self.inner.registry.lock().insert_instance(identifier.into(), value as Value);
    }

    /// Registers a transient constructor binding: every `get` constructs a
    /// fresh `T`.
    pub fn bind_constructor<T>(&self, identifier: &str)
    where
        T: Constructible + SendBound + SyncBound,
    {
        self.bind_constructor_with_config::<T>(identifier, Config::default());
    }

    pub fn bind_constructor_with_config<T>(&self, identifier: &str, config: Config)
    where
        T: Constructible + SendBound + SyncBound,
    {
        debug!(identifier, dependency = type_name::<T>(), "Bind constructor");
        self.inner.registry.lock().insert_binding(
            identifier.into(),
            BindingData {
                factory: boxed_constructor_factory::<T>(),
                singleton: config.singleton,
            },
        );
    }

    /// Registers a factory binding. The factory's own declared parameters
    /// are auto-wired on each `get`, with no explicit parameters in play.
    pub fn bind_factory(&self, identifier: &str, factory: Callable) {
        self.bind_factory_with_config(identifier, factory, Config::default());
    }

    pub fn bind_factory_with_config(&self, identifier: &str, factory: Callable, config: Config) {
        debug!(identifier, "Bind factory");
        self.inner.registry.lock().insert_binding(
            identifier.into(),
            BindingData {
                factory: boxed_callable_factory(factory),
                singleton: config.singleton,
            },
        );
    }

    /// Marks an existing binding as singleton; the next `get` promotes it.
    /// A no-op when the identifier is already backed by an instance.
    ///
    /// # Errors
    /// Returns [`ResolveErrorKind::UnknownIdentifier`] if the identifier is
    /// not registered, or if its alias chain ends at an unregistered root.
    pub fn make_singleton(&self, identifier: &str) -> Result<(), ResolveErrorKind> {
        let span = info_span!("make_singleton", identifier);
        let _guard = span.enter();

        let mut registry = self.inner.registry.lock();
        if !registry.contains(identifier) {
            let err = ResolveErrorKind::UnknownIdentifier(identifier.into());
            error!("{}", err);
            return Err(err);
        }
        let target: Box<str> = registry.resolve_alias(identifier).into();
        if registry.instance(&target).is_some() {
            debug!("Already backed by an instance");
            return Ok(());
        }
        match registry.binding_mut(&target) {
            Some(binding) => {
                binding.singleton = true;
                debug!("Marked singleton");
                Ok(())
            }
            None => {
                let err = ResolveErrorKind::UnknownIdentifier(target);
                error!("{}", err);
                Err(err)
            }
        }
    }

    /// Registers `alias_name` as a redirect to `identifier`'s chain root.
    /// Chains are collapsed at write time, never at lookup.
    pub fn alias(&self, identifier: &str, alias_name: &str) {
        debug!(identifier, alias = alias_name, "Alias");
        self.inner.registry.lock().insert_alias(identifier, alias_name);
    }
}

impl Container {
    fn invoke_signed(&self, callable: &Callable, params: Params, signature: Option<&Signature>) -> Result<Value, InvokeErrorKind> {
        let span = info_span!("invoke");
        let _guard = span.enter();

        let signature = signature.unwrap_or_else(|| callable.signature());
        let args = match resolve_args(self, signature, &params) {
            Ok(args) => args,
            Err(err) => {
                error!("{}", err);
                return Err(InstantiatorErrorKind::Deps(err));
            }
        };
        match callable.call(args) {
            Ok(value) => Ok(value),
            Err(err) => {
                error!("{}", err);
                Err(InstantiatorErrorKind::Factory(err))
            }
        }
    }

    fn downcast_invoked<T: SendBound + SyncBound + 'static>(&self, value: Value) -> Result<Shared<T>, ResolveErrorKind> {
        match value.downcast::<T>() {
            Ok(value) => Ok(value),
            Err(value) => {
                let err = ResolveErrorKind::IncorrectType {
                    expected: TypeInfo::of::<T>(),
                    actual: value.as_ref().type_id(),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }
}
