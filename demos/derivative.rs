use lazy_streams::numeric;
use lazy_streams::{within, Result, Tolerance};

fn cubic(x: f64) -> f64 {
    x * x * x + x + 13.0
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let quotients = numeric::differentiate(1.0, cubic, 3.0);
    println!("difference quotients: {}", quotients.take(6));
    println!("estimated order: {}", numeric::order(&quotients)?);

    let plain = within(1e-4, &quotients);
    println!("plain:    {} after {} steps", plain.get(-1)?, plain.length());

    let improved = within(1e-4, &numeric::improve(&quotients)?);
    println!("improved: {} after {} steps", improved.get(-1)?, improved.length());

    let accelerated = numeric::superman(&quotients);
    for (level, approximation) in accelerated.take(4).iter().enumerate() {
        println!("superman level {}: {}", level, approximation?);
    }

    for x in [0.0, 1.0, 3.0] {
        let d = numeric::derivative(1.0, cubic, x, Tolerance::default())?;
        println!("d/dx (x^3 + x + 13) at {} = {}", x, d);
    }
    let d = numeric::derivative(0.5, f64::sin, 0.0, Tolerance::Relative(1e-10))?;
    println!("d/dx sin at 0 = {}", d);
    Ok(())
}
