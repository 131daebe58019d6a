use core::any::{type_name, TypeId};

use crate::utils::sharing::SharedAny;

/// Type-erased shared handle to a container-held value.
///
/// Every value the container stores or produces travels as a [`Value`];
/// cloning one clones the handle, not the underlying object.
pub type Value = SharedAny;

#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl TypeInfo {
    #[inline]
    #[must_use]
    pub(crate) fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }
}
