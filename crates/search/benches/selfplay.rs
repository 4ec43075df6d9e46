use incognito_search::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        playing_pennies_episode,
        predicting_perceptron_values,
        training_perceptron_round,
        answering_pennies_query,
}

fn playing_pennies_episode(c: &mut criterion::Criterion) {
    let config = Config::default();
    let ref mut rng = SmallRng::seed_from_u64(0);
    let approximator = Perceptron::of::<Pennies>(config.hyper.clone(), rng);
    let mut tree = Tree::new(Turn::First);
    c.bench_function("play one Pennies self-play episode", |b| {
        b.iter(|| {
            let seats = [Seat::drawn(Pennies::first()), Seat::drawn(Pennies::second())];
            SelfPlay::new(&mut tree, &approximator, &Ucb, &config).episode(seats, rng)
        })
    });
}

fn predicting_perceptron_values(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(0);
    let approximator = Perceptron::of::<Pennies>(Hyper::default(), rng);
    let features = Pennies::first().features();
    c.bench_function("predict action values for one hidden state", |b| {
        b.iter(|| approximator.predict(&features))
    });
}

fn training_perceptron_round(c: &mut criterion::Criterion) {
    let hyper = Hyper {
        threshold: 1,
        ..Hyper::default()
    };
    let ref mut rng = SmallRng::seed_from_u64(0);
    let mut approximator = Perceptron::of::<Pennies>(hyper, rng);
    let entry = Entry::bootstrap(Pennies::first().legal(), &[0.5, -0.5]);
    (0..256).for_each(|_| approximator.regress(Regression::from((&Pennies::first(), &entry))));
    c.bench_function("train one Perceptron round on 256 regressions", |b| {
        b.iter(|| {
            approximator.regress(Regression::from((&Pennies::first(), &entry)));
            approximator.train()
        })
    });
}

fn answering_pennies_query(c: &mut criterion::Criterion) {
    let config = Config {
        min_root_samples: 1024,
        min_entry_samples: 256,
        ..Config::default()
    };
    let priors: [Prior<Pennies>; 2] = [
        Arc::new(|_: &mut SmallRng| Pennies::first()),
        Arc::new(Pennies::mixed(Turn::Second).expect("equilibrium belief")),
    ];
    c.bench_function("start a Pennies episode and answer a query", |b| {
        b.iter(|| {
            let mut manager = Manager::new(config.clone(), priors.clone());
            manager.start_episode(true).expect("fresh tree");
            manager.query(&Pennies::first()).expect("grown root")
        })
    });
}
