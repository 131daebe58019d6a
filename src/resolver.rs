use tracing::debug;

use crate::{
    container::Container,
    errors::ResolveErrorKind,
    params::{Arg, Args, Params},
    signature::Signature,
};

/// Turns a parameter-name list into an ordered argument list.
///
/// Precedence per name: explicit parameter (key presence wins, even when the
/// stored value is the absence marker), then a container lookup, then an
/// unset slot. Names nobody can supply are not an error; the slot stays
/// unset and the callable's own default takes over at call time.
pub(crate) fn resolve_args(container: &Container, signature: &Signature, params: &Params) -> Result<Args, ResolveErrorKind> {
    signature
        .iter()
        .map(|name| {
            if let Some(arg) = params.get(name) {
                debug!(name, "Explicit parameter");
                Ok(arg.clone())
            } else if container.has(name) {
                container.get_raw(name).map(Arg::Set)
            } else {
                debug!(name, "Parameter left unset");
                Ok(Arg::Unset)
            }
        })
        .collect()
}
