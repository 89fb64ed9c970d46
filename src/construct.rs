//! Compile-time contracts a type must meet before it can be registered.
//!
//! A factory for base `B` taking arguments `A` accepts a concrete type `D` only when
//! `D: Construct<A>` ("buildable from `A`") and `D: Upcast<B>` ("is a `B`"). Both are
//! checked by the trait system at the registration call site.

/// Builds `Self` from an argument tuple.
///
/// The argument list is always a tuple: `()` for no arguments, `(T,)` for one,
/// `(T, U)` for two and so on. A type may implement `Construct` for several
/// tuples; each one is a separate overload with its own registry.
///
/// ```rust
/// use factory_registry::Construct;
///
/// struct Sum(i32);
///
/// impl Construct<(i32,)> for Sum {
///     fn construct((v,): (i32,)) -> Self {
///         Sum(v)
///     }
/// }
///
/// impl Construct<(i32, i32)> for Sum {
///     fn construct((x, y): (i32, i32)) -> Self {
///         Sum(x + y)
///     }
/// }
///
/// assert_eq!(Sum::construct((1, 2)).0, 3);
/// ```
pub trait Construct<A>: Sized {
    fn construct(args: A) -> Self;
}

/// Converts a boxed value into a box of its base type.
///
/// For trait-object bases implement it with [`impl_upcast!`](crate::impl_upcast), which
/// lets the compiler verify the unsizing coercion. Every sized type is trivially its own
/// base.
pub trait Upcast<B: ?Sized> {
    fn upcast(self: Box<Self>) -> Box<B>;
}

impl<T> Upcast<T> for T {
    fn upcast(self: Box<Self>) -> Box<T> {
        self
    }
}

/// Declares that each listed type is a subtype of the given base.
///
/// ```rust
/// use factory_registry::{impl_upcast, Upcast};
///
/// trait Shape {
///     fn area(&self) -> f64;
/// }
///
/// struct Square(f64);
///
/// impl Shape for Square {
///     fn area(&self) -> f64 {
///         self.0 * self.0
///     }
/// }
///
/// impl_upcast!(dyn Shape => Square);
///
/// let shape: Box<dyn Shape> = Box::new(Square(2.0)).upcast();
/// assert_eq!(shape.area(), 4.0);
/// ```
#[macro_export]
macro_rules! impl_upcast {
    ($base:ty => $($derived:ty),+ $(,)?) => {
        $(
            impl $crate::Upcast<$base> for $derived {
                fn upcast(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<$base> {
                    self
                }
            }
        )+
    };
}

/// The creator every typed registration stores: build `D` from `args` and box it as `B`.
pub(crate) fn construct_boxed<D, B, A>(args: A) -> Box<B>
where
    D: Construct<A> + Upcast<B>,
    B: ?Sized,
{
    <D as Upcast<B>>::upcast(Box::new(D::construct(args)))
}
