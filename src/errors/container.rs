use alloc::boxed::Box;
use core::any::TypeId;

use super::{instantiate::InstantiateErrorKind, instantiator::InstantiatorErrorKind};
use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Identifier `{0}` not found in container")]
    UnknownIdentifier(Box<str>),
    #[error(
        "Incorrect value type. Actual: {:?}, expected: {} ({:?})",
        actual, expected.name, expected.id,
    )]
    IncorrectType { expected: TypeInfo, actual: TypeId },
    #[error(transparent)]
    Instantiator(InstantiatorErrorKind<Box<ResolveErrorKind>, InstantiateErrorKind>),
}

impl From<super::InvokeErrorKind> for ResolveErrorKind {
    fn from(err: super::InvokeErrorKind) -> Self {
        Self::Instantiator(match err {
            InstantiatorErrorKind::Deps(err) => InstantiatorErrorKind::Deps(Box::new(err)),
            InstantiatorErrorKind::Factory(err) => InstantiatorErrorKind::Factory(err),
        })
    }
}
