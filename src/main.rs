use ferrite_mlp::{train_sampled, xor_dataset, Result, TrainConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// Usage: ferrite-mlp [config.json]
// Trains on XOR and prints the prediction for each pair.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => TrainConfig::load_json(path)?,
        None => TrainConfig::default(),
    };
    info!(?config, "starting run");

    let mut rng = config.rng();
    let mut network = config.build_network(&mut rng);
    let mut data = xor_dataset();

    let loss = train_sampled(&mut network, &data, config.iterations, config.log_every, &mut rng)?;
    info!("final loss = {loss:.6}");

    data.sort_by(|a, b| a.input.partial_cmp(&b.input).unwrap_or(std::cmp::Ordering::Equal));
    for sample in &data {
        let output = network.predict(&sample.input)?;
        let input: Vec<String> = sample.input.iter().map(|x| format!("{x}")).collect();
        let output: Vec<String> = output.iter().map(|y| format!("{y:.3}")).collect();
        println!("[{}]: {}", input.join(", "), output.join(" "));
    }

    Ok(())
}
