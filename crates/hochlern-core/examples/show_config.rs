use hochlern_core::SimConfig;

fn main() {
    let cfg = SimConfig::default();
    println!("{}", serde_json::to_string_pretty(&cfg).unwrap());
}
