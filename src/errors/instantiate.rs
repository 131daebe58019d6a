use alloc::boxed::Box;
use core::any::TypeId;

use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error("Argument `{name}` is required but has no value")]
    MissingArgument { name: Box<str> },
    #[error(
        "Incorrect argument type for `{}`. Actual: {:?}, expected: {} ({:?})",
        name, actual, expected.name, expected.id,
    )]
    ArgumentType {
        name: Box<str>,
        expected: TypeInfo,
        actual: TypeId,
    },
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
