use alloc::{boxed::Box, collections::BTreeMap, collections::VecDeque};
use core::any::Any as _;

use crate::{
    any::{TypeInfo, Value},
    errors::InstantiateErrorKind,
    utils::sharing::{SendBound, Shared, SyncBound},
};

/// A single resolved argument slot.
///
/// `Unset` is a distinct absence marker, not a null value: it keeps the
/// positional slot occupied so the callable's own default (if any) applies.
#[derive(Clone)]
pub enum Arg {
    Set(Value),
    Unset,
}

impl Arg {
    #[inline]
    #[must_use]
    pub fn set<T: SendBound + SyncBound + 'static>(value: T) -> Self {
        Self::Set(Shared::new(value) as Value)
    }

    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Extracts a required argument.
    ///
    /// # Errors
    /// - [`InstantiateErrorKind::MissingArgument`] if the slot is unset
    /// - [`InstantiateErrorKind::ArgumentType`] if the value has another type
    pub fn downcast<T: SendBound + SyncBound + 'static>(self, name: &str) -> Result<Shared<T>, InstantiateErrorKind> {
        match self {
            Self::Unset => Err(InstantiateErrorKind::MissingArgument { name: name.into() }),
            Self::Set(value) => value.downcast::<T>().map_err(|value| InstantiateErrorKind::ArgumentType {
                name: name.into(),
                expected: TypeInfo::of::<T>(),
                actual: value.as_ref().type_id(),
            }),
        }
    }

    /// Extracts a defaulted argument, evaluating `default` for an unset slot.
    ///
    /// # Errors
    /// - [`InstantiateErrorKind::ArgumentType`] if a set value has another type
    pub fn downcast_or<T, F>(self, name: &str, default: F) -> Result<Shared<T>, InstantiateErrorKind>
    where
        T: SendBound + SyncBound + 'static,
        F: FnOnce() -> T,
    {
        match self {
            Self::Unset => Ok(Shared::new(default())),
            set => set.downcast(name),
        }
    }
}

/// Ordered argument list handed to a callable or constructor.
///
/// Positions past the end read as unset, mirroring how a short call site
/// leaves trailing parameters to their declared defaults.
#[derive(Clone, Default)]
pub struct Args {
    args: VecDeque<Arg>,
}

impl Args {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn take(&mut self) -> Arg {
        self.args.pop_front().unwrap_or(Arg::Unset)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl FromIterator<Arg> for Args {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Self {
            args: iter.into_iter().collect(),
        }
    }
}

/// Explicit parameters for a single `construct`/`invoke` call, keyed by
/// parameter name.
///
/// Presence of a key always wins over container bindings, including a key
/// inserted with [`Params::insert_unset`]: that pins the slot to the absence
/// marker even when the container could resolve the name.
#[derive(Clone, Default)]
pub struct Params {
    map: BTreeMap<Box<str>, Arg>,
}

impl Params {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: SendBound + SyncBound + 'static>(&mut self, name: impl Into<Box<str>>, value: T) -> Option<Arg> {
        self.map.insert(name.into(), Arg::set(value))
    }

    pub fn insert_shared<T: SendBound + SyncBound + 'static>(&mut self, name: impl Into<Box<str>>, value: Shared<T>) -> Option<Arg> {
        self.map.insert(name.into(), Arg::Set(value as Value))
    }

    pub fn insert_unset(&mut self, name: impl Into<Box<str>>) -> Option<Arg> {
        self.map.insert(name.into(), Arg::Unset)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Arg> {
        self.map.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::{Arg, Args, Params};
    use crate::errors::InstantiateErrorKind;

    #[test]
    fn test_explicit_unset_is_present() {
        let mut params = Params::new();
        params.insert("name", String::from("value"));
        params.insert_unset("name");

        assert!(params.contains("name"));
        assert!(!params.get("name").unwrap().is_set());
    }

    #[test]
    fn test_args_take_in_order_then_unset() {
        let mut args: Args = [Arg::set(1u8), Arg::set(2u8)].into_iter().collect();

        assert_eq!(*args.take().downcast::<u8>("first").unwrap(), 1);
        assert_eq!(*args.take().downcast::<u8>("second").unwrap(), 2);
        assert!(!args.take().is_set());
        assert!(!args.take().is_set());
    }

    #[test]
    fn test_downcast_missing() {
        assert!(matches!(
            Arg::Unset.downcast::<u8>("count"),
            Err(InstantiateErrorKind::MissingArgument { name }) if &*name == "count",
        ));
    }

    #[test]
    fn test_downcast_incorrect_type() {
        assert!(matches!(
            Arg::set(1u8).downcast::<String>("count"),
            Err(InstantiateErrorKind::ArgumentType { name, .. }) if &*name == "count",
        ));
    }

    #[test]
    fn test_downcast_or_applies_default() {
        assert_eq!(*Arg::Unset.downcast_or::<u8, _>("count", || 4).unwrap(), 4);
        assert_eq!(*Arg::set(8u8).downcast_or::<u8, _>("count", || 4).unwrap(), 8);
    }
}
