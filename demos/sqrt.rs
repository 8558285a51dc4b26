use lazy_streams::numeric::{self, DEFAULT_EPS};
use lazy_streams::{Result, Tolerance};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    for n in [2.0, 10.0, 1e6, 1e-6] {
        let absolute = numeric::sqrt(1.0, DEFAULT_EPS, n);
        let relative = numeric::relative_sqrt(1.0, DEFAULT_EPS, n);
        println!(
            "sqrt({}) = {} after {} steps, relative test: {} after {} steps",
            n,
            absolute.get(-1)?,
            absolute.length(),
            relative.get(-1)?,
            relative.length(),
        );
    }

    let approximations = numeric::sqrt_approximations(1.0, 2.0);
    let cut = Tolerance::Relative(1e-12).truncate(&approximations);
    println!("newton steps towards sqrt(2): {}", cut);
    Ok(())
}
