use chain_nn::{matrix::Matrix2, prelude::Result, Bounds, LayerConfig, Network};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const ITERATIONS: usize = 20_000;
const ITERATIONS_PER_LOG: usize = 2_000;
const SEED: u64 = 7;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let mut rng = StdRng::seed_from_u64(SEED);
    let mut net = Network::builder(Bounds::new(-1.0, 1.0)?)
        .layer(LayerConfig::new(2).bias(true).label("input"))
        .layer(LayerConfig::new(2).bias(true).label("hidden"))
        .layer(LayerConfig::new(1).label("output"))
        .build(&mut rng)?;

    let inputs: Matrix2<f64> = Matrix2::from_array([[0, 0], [0, 1], [1, 0], [1, 1]]).into();
    let targets: Matrix2<f64> = Matrix2::from_array([[0], [1], [1], [0]]).into();

    for i in 0..ITERATIONS {
        let mse = net.train_step(&inputs, &targets)?;
        if i % ITERATIONS_PER_LOG == 0 {
            info!(iteration = i, mse, "training");
        }
    }
    info!(
        mse = net.mean_squared_error(&inputs, &targets)?,
        "final training cost"
    );

    // Restore the trained weights into a freshly initialized chain.
    let weights = net.weights();
    let mut copy = Network::builder(Bounds::default())
        .layer(LayerConfig::new(2).bias(true))
        .layer(LayerConfig::new(2).bias(true))
        .layer(LayerConfig::new(1))
        .build(&mut rng)?;
    copy.set_weights(&weights)?;

    let res = copy.predict(&inputs)?;
    for row in 0..inputs.rows() {
        info!("{:?} -> {:.4}", inputs.row(row), res[(row, 0)]);
    }
    Ok(())
}
