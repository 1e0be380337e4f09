use std::sync::Arc;

/// A shared single-argument function.
pub type Unary<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

/// Compose functions right to left.
///
/// `compose([f, g, h])` behaves like `|x| f(g(h(x)))`. With no functions the
/// result is the identity, and a single function is returned as is.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tincan_redux::{compose, Unary};
///
/// let add_one: Unary<i32> = Arc::new(|a: i32| a + 1);
/// let double: Unary<i32> = Arc::new(|a: i32| a * 2);
/// let minus_three: Unary<i32> = Arc::new(|a: i32| a - 3);
///
/// let f = compose([add_one, double, minus_three]);
/// assert_eq!(f(5), 5);
/// ```
pub fn compose<T, I>(fns: I) -> Unary<T>
where
    T: 'static,
    I: IntoIterator<Item = Unary<T>>,
{
    let mut fns = fns.into_iter();
    match fns.next() {
        None => Arc::new(|arg: T| arg),
        Some(first) => fns.fold(first, |outer: Unary<T>, inner: Unary<T>| -> Unary<T> {
            Arc::new(move |arg: T| outer(inner(arg)))
        }),
    }
}
