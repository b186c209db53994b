use hochlern_core::SimConfig;
use hochlern_markov::MarkovChain;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let cfg = SimConfig::default();
    let chain = MarkovChain::from_config(&cfg);
    let mut rng = StdRng::seed_from_u64(42);
    let outcomes = chain.generate(cfg.num_periods, &mut rng);
    println!("{}", serde_json::to_string(&outcomes).unwrap());
}
