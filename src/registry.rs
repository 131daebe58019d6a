use alloc::{boxed::Box, collections::BTreeMap};

use crate::{any::Value, callable::BoxedCloneFactory};

#[derive(Clone)]
pub(crate) struct BindingData {
    pub(crate) factory: BoxedCloneFactory,
    pub(crate) singleton: bool,
}

/// Resolution state of one identifier after the alias walk.
pub(crate) enum Entry {
    Unbound,
    Binding(BindingData),
    Instance(Value),
}

/// The three identifier maps. Aliases are kept flattened: every stored
/// target is the chain's root at the time of registration.
#[derive(Default)]
pub(crate) struct Registry {
    bindings: BTreeMap<Box<str>, BindingData>,
    instances: BTreeMap<Box<str>, Value>,
    aliases: BTreeMap<Box<str>, Box<str>>,
}

impl Registry {
    #[must_use]
    pub(crate) fn contains(&self, identifier: &str) -> bool {
        self.instances.contains_key(identifier) || self.bindings.contains_key(identifier) || self.aliases.contains_key(identifier)
    }

    /// Collapses the alias chain rooted at `identifier`.
    ///
    /// A directly bound name wins over an alias of the same name, so the
    /// walk only follows names with no binding or instance of their own.
    /// The hop budget makes a degenerate self-referential alias terminate.
    #[must_use]
    pub(crate) fn resolve_alias<'a>(&'a self, identifier: &'a str) -> &'a str {
        let mut current = identifier;
        let mut hops = self.aliases.len();
        while hops > 0 && !self.is_bound(current) {
            match self.aliases.get(current) {
                Some(target) => current = &**target,
                None => break,
            }
            hops -= 1;
        }
        current
    }

    #[must_use]
    pub(crate) fn entry(&self, identifier: &str) -> Entry {
        if let Some(value) = self.instances.get(identifier) {
            Entry::Instance(value.clone())
        } else if let Some(binding) = self.bindings.get(identifier) {
            Entry::Binding(binding.clone())
        } else {
            Entry::Unbound
        }
    }

    #[must_use]
    pub(crate) fn instance(&self, identifier: &str) -> Option<Value> {
        self.instances.get(identifier).cloned()
    }

    pub(crate) fn insert_instance(&mut self, identifier: Box<str>, value: Value) -> Option<Value> {
        self.instances.insert(identifier, value)
    }

    pub(crate) fn insert_binding(&mut self, identifier: Box<str>, binding: BindingData) {
        self.bindings.insert(identifier, binding);
    }

    pub(crate) fn insert_alias(&mut self, identifier: &str, alias_name: &str) {
        let target: Box<str> = self.resolve_alias(identifier).into();
        self.aliases.insert(alias_name.into(), target);
    }

    /// One-way Binding -> Instance transition.
    pub(crate) fn promote(&mut self, identifier: &str, value: Value) {
        self.instances.insert(identifier.into(), value);
        self.bindings.remove(identifier);
    }

    pub(crate) fn binding_mut(&mut self, identifier: &str) -> Option<&mut BindingData> {
        self.bindings.get_mut(identifier)
    }

    fn is_bound(&self, identifier: &str) -> bool {
        self.instances.contains_key(identifier) || self.bindings.contains_key(identifier)
    }
}
