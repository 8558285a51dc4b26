use std::f64::consts::FRAC_PI_4;

use lazy_streams::numeric;
use lazy_streams::{Result, Tolerance};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let slope = |x: f64| 1.0 / (1.0 + x * x);
    println!("single trapezoid: {}", numeric::easy_integrate(&slope, 0.0, 1.0));
    println!("subdivisions: {}", numeric::integrate(slope, 0.0, 1.0).take(6));

    for tolerance in [Tolerance::Absolute(1e-6), Tolerance::Relative(1e-10)] {
        let area = numeric::integral(slope, 0.0, 1.0, tolerance)?;
        println!(
            "{:?}: {} (error {:e})",
            tolerance,
            area,
            (area - FRAC_PI_4).abs()
        );
    }

    let area = numeric::integral(f64::exp, 0.0, 1.0, Tolerance::default())?;
    println!("integral of exp over [0, 1] = {}", area);
    Ok(())
}
