//! Factory capability for creating and tearing down pooled items

/// Creates and destroys items on behalf of a pool.
///
/// The pool calls [`create`](ItemFactory::create) when pre-warming and when
/// growing under [`ExhaustionPolicy::Grow`](crate::ExhaustionPolicy::Grow),
/// and [`destroy`](ItemFactory::destroy) when the pool is drained via
/// [`Pool::destroy_all`](crate::Pool::destroy_all).
///
/// `destroy` defaults to dropping the item, which is all most in-memory
/// resources need. Implement it when teardown has a side effect (closing a
/// handle, returning memory to an allocator).
pub trait ItemFactory<T>: Send + Sync {
    /// Build one new item.
    fn create(&self) -> T;

    /// Tear one item down.
    fn destroy(&self, item: T) {
        drop(item);
    }
}

/// Adapts a plain closure into an [`ItemFactory`] with the default
/// drop-based `destroy`.
///
/// # Examples
///
/// ```
/// use slotpool::{FnFactory, ItemFactory};
///
/// let factory = FnFactory(|| String::from("ready"));
/// assert_eq!(factory.create(), "ready");
/// ```
pub struct FnFactory<F>(pub F);

impl<T, F> ItemFactory<T> for FnFactory<F>
where
    F: Fn() -> T + Send + Sync,
{
    fn create(&self) -> T {
        (self.0)()
    }
}
