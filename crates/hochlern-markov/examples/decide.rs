use hochlern_core::{Agent, SimConfig, State};
use hochlern_markov::PayoffBandit;

fn main() {
    let cfg = SimConfig::default();
    let mut agent = PayoffBandit::from_config(&cfg, Some(7));

    // Teilweise aufgedeckte Episode: zwei Perioden bekannt, Rest verborgen.
    let mut revealed = vec![None; cfg.num_periods];
    revealed[0] = Some(State::Low);
    revealed[1] = Some(State::High);

    let action = agent.decide(&revealed);
    println!("{}", serde_json::to_string_pretty(&action).unwrap());
}
