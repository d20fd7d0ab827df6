use std::io::Write;
use swipedeck_providers::{CandidateSource, CatalogSource, Error, PageRequest};
use swipedeck_types::FilterMode;

#[tokio::test]
async fn loads_catalog_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": "10", "external_id": "tmdb-603", "payload": {{"title": "The Matrix"}}}},
            {{"id": "11", "payload": {{"title": "Stalker"}}}},
            {{"id": "end-card", "is_terminal": true}}
        ]"#
    )
    .unwrap();

    let source = CatalogSource::from_path(file.path()).unwrap();
    assert_eq!(source.len(), 2);

    let page = source
        .fetch_page(&PageRequest::new(0, 10, FilterMode::Feed))
        .await
        .unwrap();
    assert_eq!(page[0].external_id.as_deref(), Some("tmdb-603"));
    assert!(page.iter().all(|c| !c.is_terminal));
}

#[test]
fn malformed_catalog_is_a_json_error() {
    let err = CatalogSource::from_json("{ not json").err().unwrap();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CatalogSource::from_path(&dir.path().join("absent.json"))
        .err()
        .unwrap();
    assert!(matches!(err, Error::Io(_)));
}
