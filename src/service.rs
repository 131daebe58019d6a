use alloc::boxed::Box;

use crate::utils::sharing::{SendBound, SyncBound};

pub(crate) trait Service<Request: ?Sized> {
    type Response;
    type Error;

    fn call(&mut self, request: Request) -> Result<Self::Response, Self::Error>;
}

#[inline]
#[must_use]
pub(crate) const fn service_fn<T>(f: T) -> ServiceFn<T> {
    ServiceFn { f }
}

#[derive(Clone)]
pub(crate) struct ServiceFn<T> {
    f: T,
}

impl<F, Request, Response, Error> Service<Request> for ServiceFn<F>
where
    F: FnMut(Request) -> Result<Response, Error>,
{
    type Response = Response;
    type Error = Error;

    #[inline]
    fn call(&mut self, request: Request) -> Result<Self::Response, Self::Error> {
        (self.f)(request)
    }
}

pub(crate) struct BoxCloneService<Request: ?Sized, Response, Error>(
    pub(crate) Box<dyn CloneService<Request, Response = Response, Error = Error>>,
);

pub(crate) trait CloneService<Request: ?Sized>: Service<Request> + SendBound + SyncBound {
    #[must_use]
    fn clone_box(&self) -> Box<dyn CloneService<Request, Response = Self::Response, Error = Self::Error>>;
}

impl<Request, T> CloneService<Request> for T
where
    Request: ?Sized,
    T: Service<Request> + Clone + SendBound + SyncBound + 'static,
{
    #[inline]
    fn clone_box(&self) -> Box<dyn CloneService<Request, Response = T::Response, Error = T::Error>> {
        Box::new(self.clone())
    }
}

impl<Request: ?Sized, Response, Error> Clone for BoxCloneService<Request, Response, Error> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

impl<Request, Response, Error> Service<Request> for BoxCloneService<Request, Response, Error> {
    type Response = Response;
    type Error = Error;

    #[inline]
    fn call(&mut self, request: Request) -> Result<Self::Response, Self::Error> {
        self.0.call(request)
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::{service_fn, Service as _};

    #[derive(Clone, Copy)]
    struct Request(bool);
    struct Response(bool);

    #[test]
    fn test_service() {
        let mut service = service_fn(|Request(val)| Ok::<_, Infallible>(Response(val)));

        let request = Request(true);
        let response = service.call(request).unwrap();

        assert_eq!(request.0, response.0);
    }
}
