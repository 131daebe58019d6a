/// Config for a binding registration.
/// ## Fields
/// - `singleton`:
///   If `true`, the first `get` promotes the produced value to a stored
///   instance and every later `get` returns that same handle.
///
///   Promotion replaces the binding entry; it cannot be undone.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub singleton: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { singleton: false }
    }
}
