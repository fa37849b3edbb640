use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Write `contents` to `name` inside a fresh temp dir.
///
/// The dir is returned so it outlives the test body.
pub fn write_temp(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write temp file");
    (dir, path)
}

pub const DOCUMENTED_RESOLUTION: &str = r#"{
  "actual_value": 850,
  "pool": "400",
  "bets": [
    {"participant": "alice", "stake": "100", "predicted_value": 820, "timestamp": 1},
    {"participant": "bob", "stake": "100", "predicted_value": 850, "timestamp": 2},
    {"participant": "charlie", "stake": "100", "predicted_value": 880, "timestamp": 3},
    {"participant": "diana", "stake": "100", "predicted_value": 830, "timestamp": 4}
  ]
}"#;

pub const MARKETS: &str = r#"[
  {"id": "0xaaa", "name": "BTC end of June", "start_time": 1000, "end_time": 2000,
   "min_value": 80000, "max_value": 100000, "status": 1},
  {"id": "0xbbb", "name": "ETH end of June", "start_time": 3000, "end_time": 4000,
   "min_value": 1000, "max_value": 5000, "status": 2, "final_value": 3120},
  {"id": "0xccc", "name": "SOL end of June", "start_time": 2000, "end_time": 5000,
   "min_value": 50, "max_value": 500, "status": 1,
   "total_volume": 2500000000000000000, "total_participants": 4}
]"#;
