use log::{debug, info};

use crate::error::Result;
use crate::network::Network;
use crate::samples::SampleProvider;
use crate::train::backprop::learn;
use crate::train::step_stats::{RollingMean, StepStats};
use crate::train::train_config::TrainConfig;

/// Trains `network` for `config.steps` single-example steps, pulling one sample from
/// `provider` per step, and returns the per-step diagnostics.
///
/// Stops at the first sample whose shape disagrees with the network.
pub fn train_loop(
    network: &mut Network,
    provider: &mut impl SampleProvider,
    config: &TrainConfig,
) -> Result<Vec<StepStats>> {
    info!(
        "gradient descent: {} steps, learning rate {}, topology {:?}",
        config.steps,
        config.learning_rate,
        network.layer_sizes()
    );

    let mut rolling = RollingMean::new(config.cost_window);
    let mut history = Vec::with_capacity(config.steps);

    for step in 0..config.steps {
        let sample = provider.sample();
        let cost = learn(network, &sample.input, &sample.target, config.learning_rate)?.cost;
        let avg_cost = rolling.push(cost);

        if config.report_every > 0 && step % config.report_every == 0 {
            debug!("step {step} | cost {cost:.6} | avg cost {avg_cost:.6}");
        }
        history.push(StepStats { step, cost, avg_cost });
    }

    if let Some(last) = history.last() {
        info!("finished after {} steps, avg cost {:.6}", config.steps, last.avg_cost);
    }
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction::Sigmoid;
    use crate::error::NetError;
    use crate::random::RandomSource;
    use crate::samples::{PointRegion, Sample};

    #[test]
    fn emits_one_stat_per_step() {
        let mut rng = RandomSource::seeded(1);
        let mut net = Network::new(&[2, 3, 2], &[Sigmoid, Sigmoid]).unwrap();
        net.randomize(&mut rng, (-1.0, 1.0), (-1.0, 1.0));
        let mut points = PointRegion::new(rng.fork());
        let stats = train_loop(&mut net, &mut points, &TrainConfig::new(250, 0.02).with_cost_window(10)).unwrap();
        assert_eq!(stats.len(), 250);
        assert!(stats.iter().enumerate().all(|(i, s)| s.step == i));
        let window: f64 = stats[240..].iter().map(|s| s.cost).sum::<f64>() / 10.0;
        assert!((stats[249].avg_cost - window).abs() < 1e-9);
    }

    #[test]
    fn cost_falls_on_a_learnable_task() {
        let mut rng = RandomSource::seeded(17);
        let mut net = Network::new(&[1, 1], &[crate::activation::ActivationFunction::Identity]).unwrap();
        net.randomize(&mut rng, (-1.0, 1.0), (-1.0, 1.0));
        let mut data = rng.fork();
        let mut provider = move || {
            let x = data.uniform_real(-1.0, 1.0);
            Sample::new(vec![x], vec![0.5 * x + 0.25])
        };
        let stats = train_loop(&mut net, &mut provider, &TrainConfig::new(3_000, 0.05).with_cost_window(100)).unwrap();
        assert!(stats.last().unwrap().avg_cost < stats[99].avg_cost);
        assert!(stats.last().unwrap().avg_cost < 1e-4);
    }

    #[test]
    fn bad_sample_stops_the_run() {
        let mut net = Network::new(&[2, 1], &[Sigmoid]).unwrap();
        let mut provider = || Sample::new(vec![1.0], vec![0.0]);
        let err = train_loop(&mut net, &mut provider, &TrainConfig::new(5, 0.1)).unwrap_err();
        assert!(matches!(err, NetError::DimensionMismatch { what: "input", .. }));
    }
}
