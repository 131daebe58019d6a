#[cfg(feature = "thread_safe")]
mod thread_safe {
    use alloc::sync::Arc;
    use core::any::Any;

    pub trait SendBound: Send {}
    pub trait SyncBound: Sync {}

    impl<T: Send> SendBound for T {}
    impl<T: Sync> SyncBound for T {}

    pub type Shared<T> = Arc<T>;
    pub type SharedAny = Shared<dyn Any + Send + Sync>;
}

#[cfg(not(feature = "thread_safe"))]
mod thread_unsafe {
    use alloc::rc::Rc;
    use core::any::Any;

    pub trait SendBound {}
    pub trait SyncBound {}

    impl<T> SendBound for T {}
    impl<T> SyncBound for T {}

    pub type Shared<T> = Rc<T>;
    pub type SharedAny = Shared<dyn Any>;
}

#[cfg(feature = "thread_safe")]
pub use thread_safe::{SendBound, Shared, SharedAny, SyncBound};

#[cfg(not(feature = "thread_safe"))]
pub use thread_unsafe::{SendBound, Shared, SharedAny, SyncBound};
