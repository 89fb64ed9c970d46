//! Self-registering shapes.
//!
//! Run with `RUST_LOG=factory_registry=debug cargo run --example shapes` to see the
//! registrations as they happen.

use factory_registry::{impl_upcast, register_factory, Construct, Factory};
use tracing_subscriber::EnvFilter;

pub trait Shape {
    fn name(&self) -> String;
    fn area(&self) -> f64;
}

mod circle {
    use super::*;

    pub struct Circle {
        radius: f64,
    }

    impl Shape for Circle {
        fn name(&self) -> String {
            format!("circle(r={})", self.radius)
        }

        fn area(&self) -> f64 {
            std::f64::consts::PI * self.radius * self.radius
        }
    }

    impl Construct<()> for Circle {
        fn construct(_: ()) -> Self {
            Circle { radius: 1.0 }
        }
    }

    impl Construct<(f64,)> for Circle {
        fn construct((radius,): (f64,)) -> Self {
            Circle { radius }
        }
    }

    impl_upcast!(dyn Shape => Circle);

    register_factory!(String, "circle", dyn Shape, Circle);
    register_factory!(String, "circle", dyn Shape, Circle, f64);
}

mod rect {
    use super::*;

    pub struct Rect {
        width: f64,
        height: f64,
    }

    impl Shape for Rect {
        fn name(&self) -> String {
            format!("rect({}x{})", self.width, self.height)
        }

        fn area(&self) -> f64 {
            self.width * self.height
        }
    }

    impl Construct<(f64, f64)> for Rect {
        fn construct((width, height): (f64, f64)) -> Self {
            Rect { width, height }
        }
    }

    impl_upcast!(dyn Shape => Rect);

    register_factory!(String, "rect", dyn Shape, Rect, f64, f64);
}

type Shapes = Factory<String, dyn Shape>;

fn main() -> Result<(), factory_registry::RegistryError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let units = factory_registry::init()?;
    println!("{units} factories registered");

    let shapes = [
        Shapes::create("circle", ())?,
        Shapes::create("circle", (2.5,))?,
        Shapes::create("rect", (3.0, 4.0))?,
    ];
    for shape in &shapes {
        println!("{:<16} area {:>8.3}", shape.name(), shape.area());
    }

    println!("rect(f64)? {}", Shapes::is_registered("rect", (1.0,)));
    if let Err(err) = Shapes::create("rect", (1.0,)) {
        println!("{err}");
    }

    Ok(())
}
