use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

const SQUARE: &str = "0 1\n1 2\n2 3\n3 0\n";

fn epi_sim(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_epi-sim"))
        .current_dir(root)
        .arg("--graphs-dir")
        .arg(root.join("graphs"))
        .arg("--evolutions-dir")
        .arg(root.join("evolutions"))
        .args(args)
        .output()
        .expect("run epi-sim")
}

fn stdout(output: Output) -> String {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf8")
}

#[test]
fn simulate_then_render_timeline() {
    let dir = tempdir().unwrap();
    let graph_file = dir.path().join("square.adj");
    fs::write(&graph_file, SQUARE).unwrap();

    let graph_uid = stdout(epi_sim(dir.path(), &["save-graph", graph_file.to_str().unwrap()]));
    let graph_uid = graph_uid.trim();
    assert_eq!(graph_uid.len(), 64);

    let evolution_uid = stdout(epi_sim(
        dir.path(),
        &["simulate", &graph_uid[..10], "-p", "1", "--zero", "0", "--seed", "3"],
    ));
    let evolution_uid = evolution_uid.trim();
    assert!(evolution_uid.starts_with(&graph_uid[..8]));

    let path = stdout(epi_sim(dir.path(), &["resolve", "evolutions", evolution_uid]));
    let record: Value = serde_json::from_slice(&fs::read(path.trim()).unwrap()).unwrap();
    assert_eq!(record["graph-uid"], graph_uid);
    assert_eq!(record["rounds"].as_array().unwrap().len(), 4);

    let timeline = stdout(epi_sim(dir.path(), &["timeline", evolution_uid, "--plain"]));
    assert_eq!(timeline, "[0] ISSS\n[1] RISI\n[2] RRIR\n[3] RRRR\n");

    let verified = stdout(epi_sim(dir.path(), &["verify", &graph_uid[..6]]));
    assert!(verified.contains("verified"));
}

#[test]
fn generated_graphs_are_canonical_adjacency_lists() {
    let dir = tempdir().unwrap();
    let text = stdout(epi_sim(dir.path(), &["generate", "CYCLE", "--nodes", "4"]));
    assert_eq!(text, "0 1 3\n1 2\n2 3\n3\n");

    let missing = epi_sim(dir.path(), &["generate", "TORUS", "--columns", "3"]);
    assert!(!missing.status.success());
}

#[test]
fn unknown_prefix_fails() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("graphs")).unwrap();
    let output = epi_sim(dir.path(), &["resolve", "graphs", "ffff"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not-found"));
}

#[test]
fn seed_file_comments_are_ignored() {
    let dir = tempdir().unwrap();
    let graph_file = dir.path().join("square.adj");
    fs::write(&graph_file, SQUARE).unwrap();
    let zero_file = dir.path().join("zero.txt");
    fs::write(&zero_file, "0 # patient zero\n# node 2 is excluded\n").unwrap();

    let body = stdout(epi_sim(
        dir.path(),
        &[
            "simulate",
            graph_file.to_str().unwrap(),
            "-p",
            "0",
            "--zero-file",
            zero_file.to_str().unwrap(),
            "--seed",
            "1",
            "--print",
        ],
    ));
    let record: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(record["rounds"][0]["infectious"], serde_json::json!([0]));
}

#[test]
fn timeline_follows_the_coercion_of_the_run() {
    let dir = tempdir().unwrap();
    let graph_file = dir.path().join("square.adj");
    fs::write(&graph_file, SQUARE).unwrap();
    let config = dir.path().join("run.yaml");
    fs::write(&config, "numeric: never\n").unwrap();

    let evolution_uid = stdout(epi_sim(
        dir.path(),
        &[
            "simulate",
            graph_file.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "-p",
            "1",
            "--zero",
            "0",
            "--seed",
            "3",
        ],
    ));
    let timeline = stdout(epi_sim(
        dir.path(),
        &[
            "timeline",
            evolution_uid.trim(),
            "--graph",
            graph_file.to_str().unwrap(),
            "--plain",
        ],
    ));
    assert_eq!(timeline, "[0] ISSS\n[1] RISI\n[2] RRIR\n[3] RRRR\n");
}

#[test]
fn local_file_wins_over_uid_prefix() {
    let dir = tempdir().unwrap();
    let graph_file = dir.path().join("square.adj");
    fs::write(&graph_file, SQUARE).unwrap();
    let uid = stdout(epi_sim(dir.path(), &["save-graph", graph_file.to_str().unwrap()]));
    let prefix = &uid.trim()[..4];
    fs::write(dir.path().join(prefix), "a b\n").unwrap();

    let output = epi_sim(
        dir.path(),
        &["-vv", "simulate", prefix, "-p", "0", "--zero", "a", "--seed", "1", "--print"],
    );
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let record: Value = serde_json::from_str(&stdout(output)).unwrap();
    assert_eq!(record["nodes"], serde_json::json!(["a", "b"]));
    assert!(stderr.contains("reading graph from file, not as a uid prefix"));
}
