//! Typed constructors
//!
//! Any `Fn(Arc<A>, Arc<B>, ...) -> Result<Arc<T>, E>` with up to eight inputs
//! is a [`Constructor`]. The input types are read off the signature at
//! registration time, so resolution never inspects values at runtime beyond a
//! checked downcast of already-resolved instances.
//!
//! ```ignore
//! fn new_handler(logger: Arc<Logger>, client: Arc<EchoClient>) -> anyhow::Result<Arc<EchoHandler>> {
//!     Ok(Arc::new(EchoHandler::new(logger, client)))
//! }
//!
//! container.register(new_handler);
//! ```

use super::key::TypeKey;
use appinit_domain::error::{BoxError, Error};
use std::any::{Any, type_name};
use std::sync::Arc;

/// A resolved instance as stored in the cache
///
/// Always holds an `Arc<T>` for the bound `T`, so trait-object bindings and
/// concrete bindings share one representation.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// A function that builds one output type from resolved inputs
///
/// `Args` is the tuple of `Arc<_>` inputs and only serves to keep the blanket
/// implementations apart; callers never name it.
pub trait Constructor<Args>: Send + Sync + 'static {
    /// Type produced by this constructor
    type Output: ?Sized + Send + Sync + 'static;

    /// Declared input types, in parameter order
    fn inputs() -> Vec<TypeKey>;

    /// Invoke with inputs resolved in the order given by [`Constructor::inputs`]
    fn construct(&self, inputs: &[Instance]) -> Result<Arc<Self::Output>, BoxError>;
}

fn downcast<T: ?Sized + Send + Sync + 'static>(
    instance: Option<&Instance>,
) -> Result<Arc<T>, BoxError> {
    instance
        .and_then(|instance| {
            let any: &(dyn Any + Send + Sync) = &**instance;
            any.downcast_ref::<Arc<T>>()
        })
        .cloned()
        .ok_or_else(|| {
            Error::internal(format!("resolved input is not `{}`", type_name::<T>())).into()
        })
}

macro_rules! impl_constructor {
    ($($arg:ident),*) => {
        impl<Func, Out, Err, $($arg,)*> Constructor<($(Arc<$arg>,)*)> for Func
        where
            Func: Fn($(Arc<$arg>),*) -> Result<Arc<Out>, Err> + Send + Sync + 'static,
            Out: ?Sized + Send + Sync + 'static,
            Err: Into<BoxError>,
            $($arg: ?Sized + Send + Sync + 'static,)*
        {
            type Output = Out;

            fn inputs() -> Vec<TypeKey> {
                vec![$(TypeKey::of::<$arg>()),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn construct(&self, inputs: &[Instance]) -> Result<Arc<Out>, BoxError> {
                let mut inputs = inputs.iter();
                $(let $arg = downcast::<$arg>(inputs.next())?;)*
                (self)($($arg),*).map_err(Into::into)
            }
        }
    };
}

impl_constructor!();
impl_constructor!(A1);
impl_constructor!(A1, A2);
impl_constructor!(A1, A2, A3);
impl_constructor!(A1, A2, A3, A4);
impl_constructor!(A1, A2, A3, A4, A5);
impl_constructor!(A1, A2, A3, A4, A5, A6);
impl_constructor!(A1, A2, A3, A4, A5, A6, A7);
impl_constructor!(A1, A2, A3, A4, A5, A6, A7, A8);
