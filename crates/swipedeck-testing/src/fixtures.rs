//! Sample data generation.

use serde_json::json;
use std::io::Write;
use swipedeck_types::Candidate;
use tempfile::NamedTempFile;

/// A single candidate with a predictable payload
pub fn candidate(id: i64) -> Candidate {
    let emotion = if id % 2 == 0 { "joy" } else { "tension" };
    Candidate::new(
        id,
        json!({
            "title": format!("Film {}", id),
            "description": format!("Description of film {}", id),
            "emotions": [emotion],
        }),
    )
    .with_external_id(format!("tmdb-{}", 1000 + id))
}

/// Candidates with ids `start..start + count`
pub fn sample_candidates(start: i64, count: usize) -> Vec<Candidate> {
    (start..start + count as i64).map(candidate).collect()
}

/// JSON catalogue text for `count` sample candidates
pub fn catalog_json(count: usize) -> String {
    serde_json::to_string_pretty(&sample_candidates(1, count))
        .expect("sample candidates always serialize")
}

/// Write a catalogue of `count` sample candidates to a temp file
pub fn catalog_file(count: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(catalog_json(count).as_bytes())
        .expect("Failed to write catalog");
    file
}
