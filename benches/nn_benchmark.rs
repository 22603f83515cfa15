use chain_nn::{matrix::Matrix2, Activations, Bounds, LayerConfig, Network};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};

fn build(sizes: &[usize]) -> Network {
    let mut rng = StdRng::seed_from_u64(42);
    let last = sizes.len() - 1;
    sizes
        .iter()
        .enumerate()
        .fold(Network::builder(Bounds::default()), |builder, (i, &size)| {
            let config = LayerConfig::new(size).bias(i != last);
            if i == 0 || i == last {
                builder.layer(config)
            } else {
                builder.layer(config.activation(Activations::Tanh))
            }
        })
        .build(&mut rng)
        .unwrap()
}

fn train(net: &mut Network, inputs: &Matrix2<f64>, targets: &Matrix2<f64>, iterations: usize) {
    for _ in 0..iterations {
        assert!(net.train_step(inputs, targets).is_ok());
    }
}

fn xor_data() -> (Matrix2<f64>, Matrix2<f64>) {
    let inputs = Matrix2::from_array([[0, 0], [0, 1], [1, 0], [1, 1]]).into();
    let targets = Matrix2::from_array([[0], [1], [1], [0]]).into();
    (inputs, targets)
}

fn bench_forward(c: &mut Criterion) {
    let mut small = build(&[2, 10, 10, 2]);
    let mut medium = build(&[2, 20, 20, 20, 2]);

    let input_small = Matrix2::new(10, 2);
    let input_medium = Matrix2::new(1_000, 2);

    c.bench_function("forward small 10 inputs", |b| {
        b.iter(|| small.forward(black_box(&input_small)).map(|_| ()))
    });
    c.bench_function("forward small 1,000 inputs", |b| {
        b.iter(|| small.forward(black_box(&input_medium)).map(|_| ()))
    });

    c.bench_function("forward medium 10 inputs", |b| {
        b.iter(|| medium.forward(black_box(&input_small)).map(|_| ()))
    });
    c.bench_function("forward medium 1,000 inputs", |b| {
        b.iter(|| medium.forward(black_box(&input_medium)).map(|_| ()))
    });
}

fn bench_train(c: &mut Criterion) {
    let (inputs, targets) = xor_data();

    c.bench_function("tiny 10 iterations", |b| {
        b.iter(|| train(&mut build(&[2, 2, 1]), &inputs, &targets, black_box(10)))
    });
    c.bench_function("tiny 1,000 iterations", |b| {
        b.iter(|| train(&mut build(&[2, 2, 1]), &inputs, &targets, black_box(1_000)))
    });
    c.bench_function("medium 100 iterations", |b| {
        b.iter(|| {
            train(
                &mut build(&[2, 20, 20, 1]),
                &inputs,
                &targets,
                black_box(100),
            )
        })
    });
}

fn bench_weights(c: &mut Criterion) {
    let mut net = build(&[2, 20, 20, 20, 2]);
    let weights = net.weights();

    c.bench_function("weights round trip medium", |b| {
        b.iter(|| {
            let flat = net.weights();
            net.set_weights(black_box(&flat)).map(|rest| rest.len())
        })
    });
    c.bench_function("set weights medium", |b| {
        b.iter(|| net.set_weights(black_box(&weights)).map(|rest| rest.len()))
    });
}

criterion_group!(benches, bench_forward, bench_train, bench_weights);
criterion_main!(benches);
