use ferrite_mlp::{
    evaluate, train_sampled, xor_dataset, ActivationFunction, NeuralNetwork, TrainConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn xor_is_learned(network: &NeuralNetwork) -> bool {
    xor_dataset().iter().all(|sample| {
        let y = network.predict(&sample.input).unwrap()[0];
        (y - sample.target[0]).abs() < 0.5
    })
}

#[test]
fn xor_converges_with_default_settings() {
    let data = xor_dataset();
    let mut converged = 0;

    for seed in 0..5 {
        let config = TrainConfig { seed: Some(seed), log_every: 0, ..TrainConfig::default() };
        let mut rng = config.rng();
        let mut network = config.build_network(&mut rng);
        assert!(matches!(network.activation_function(), ActivationFunction::Tanh));
        assert_eq!(network.learning_rate(), 0.1);

        train_sampled(&mut network, &data, config.iterations, 0, &mut rng).unwrap();
        if xor_is_learned(&network) {
            converged += 1;
        }
    }

    assert!(converged >= 3, "only {converged} of 5 seeds learned XOR");
}

#[test]
fn copied_network_trains_independently() {
    let mut rng = StdRng::seed_from_u64(21);
    let original = NeuralNetwork::with_rng(2, 4, 1, &mut rng);
    let data = xor_dataset();
    let before = evaluate(&original, &data).unwrap();

    let mut a = NeuralNetwork::from_network(&original);
    let mut b = NeuralNetwork::from_network(&original);
    train_sampled(&mut a, &data, 2_000, 0, &mut rng).unwrap();

    assert_ne!(a.hidden_bias(), b.hidden_bias());
    assert_ne!(a.output_bias(), b.output_bias());
    assert_eq!(b.hidden_bias(), original.hidden_bias());
    assert_eq!(evaluate(&original, &data).unwrap(), before);

    train_sampled(&mut b, &data, 10, 0, &mut rng).unwrap();
    assert_ne!(a.output_bias(), b.output_bias());
}
