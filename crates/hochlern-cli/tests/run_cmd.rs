use assert_cmd::Command;
use predicates::prelude::*;

fn hochlern() -> Command {
    Command::cargo_bin("hochlern").expect("binary should build")
}

#[test]
fn defaults_prints_form_initial_values() {
    hochlern()
        .arg("defaults")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"highPayoff\": 10.0"))
        .stdout(predicate::str::contains("\"numTestIterations\": 100"));
}

#[test]
fn run_forced_high_config_reaches_the_ceiling() {
    // Start and all transitions force High; a trained greedy agent
    // matches the oracle exactly: 5 periods * highPayoff 10.
    hochlern()
        .args([
            "run",
            "--seed",
            "1",
            "--agent-seed",
            "2",
            "--quiet",
            "--start-high",
            "1.0",
            "--start-low",
            "0.0",
            "--high-given-high",
            "1.0",
            "--low-given-high",
            "0.0",
            "--high-given-low",
            "1.0",
            "--low-given-low",
            "0.0",
            "--num-periods",
            "5",
            "--num-learn-iterations",
            "200",
            "--num-test-iterations",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"maximum\": 50.0"))
        .stdout(predicate::str::contains("\"achieved\": 50.0"));
}

#[test]
fn run_rejects_out_of_range_probability() {
    hochlern()
        .args(["run", "--quiet", "--start-high", "2.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("startHigh"));
}

#[test]
fn run_rejects_unparseable_field_text() {
    hochlern()
        .args(["run", "--high-payoff", "ten"])
        .assert()
        .failure();
}
