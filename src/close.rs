use crate::logger::Logger;
use std::{
    fmt,
    ops::{Deref, DerefMut},
    panic::Location,
};

/// A resource with an explicit, fallible release step.
pub trait Close {
    type Error: fmt::Display;

    fn close(&mut self) -> Result<(), Self::Error>;
}

impl<C: Close + ?Sized> Close for Box<C> {
    type Error = C::Error;

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}

impl<C: Close + ?Sized> Close for &mut C {
    type Error = C::Error;

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}

/// Closes the wrapped resource when dropped, reporting any failure through
/// the logger at error level instead of propagating it.
///
/// Created by [`Logger::close_on_drop`].
pub struct CloseGuard<'a, C: Close> {
    logger: &'a Logger,
    resource: C,
    context: String,
    caller: &'static Location<'static>,
}

impl<'a, C: Close> CloseGuard<'a, C> {
    pub(crate) fn new(
        logger: &'a Logger,
        resource: C,
        context: String,
        caller: &'static Location<'static>,
    ) -> Self {
        Self {
            logger,
            resource,
            context,
            caller,
        }
    }
}

impl<C: Close> Deref for CloseGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl<C: Close> DerefMut for CloseGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.resource
    }
}

impl<C: Close> Drop for CloseGuard<'_, C> {
    fn drop(&mut self) {
        self.logger.close_at(
            &mut self.resource,
            format_args!("{}", self.context),
            self.caller,
        );
    }
}
