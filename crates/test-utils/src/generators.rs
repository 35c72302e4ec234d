//! Generators for observation archives.

use std::path::PathBuf;

use tempfile::TempDir;
use wfs_protocol::Observation;

use crate::fixtures::observation_at;

/// One observation per grid point, `spacing` apart, starting at the origin.
///
/// Ids are `obs-{row}-{col}`, features of interest `station-{row}-{col}`.
pub fn observation_grid(cols: usize, rows: usize, spacing: f64) -> Vec<Observation> {
    let mut observations = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            observations.push(observation_at(
                &format!("obs-{}-{}", row, col),
                &format!("station-{}-{}", row, col),
                col as f64 * spacing,
                row as f64 * spacing,
            ));
        }
    }
    observations
}

/// Write observations as a JSON archive in a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the file is needed.
pub fn observations_file(observations: &[Observation]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("observations.json");
    let json = serde_json::to_string_pretty(observations).expect("Failed to encode observations");
    std::fs::write(&path, json).expect("Failed to write observations");
    (dir, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_grid_layout() {
        let grid = observation_grid(3, 2, 5.0);
        assert_eq!(grid.len(), 6);
        let last = grid.last().unwrap();
        assert_eq!(last.identifier.as_deref(), Some("obs-1-2"));
        assert_eq!(last.feature_of_interest.shape.x, 10.0);
        assert_eq!(last.feature_of_interest.shape.y, 5.0);
    }

    #[test]
    fn test_observations_file_roundtrip() {
        let (_dir, path) = observations_file(&observation_grid(2, 1, 1.0));
        let content = std::fs::read_to_string(&path).unwrap();
        let decoded: Vec<Observation> = serde_json::from_str(&content).unwrap();
        assert_eq!(decoded.len(), 2);
    }
}
