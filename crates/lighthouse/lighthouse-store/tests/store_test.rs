use lighthouse_core::errors::{LighthouseError, StoreError};
use lighthouse_core::models::Citation;
use lighthouse_core::traits::IKnowledgeStore;
use lighthouse_store::{KnowledgeStore, PartitionSource};
use test_fixtures::{fragment, knowledge_bundle_json, partition_source};

#[test]
fn bundle_loads_with_single_primary() {
    let store = KnowledgeStore::from_json(&knowledge_bundle_json()).unwrap();
    assert_eq!(store.primary_id(), "Enochian");
    assert!(store.primary().is_primary);
    assert_eq!(store.partitions().len(), 4);
    assert_eq!(store.fragment_count(), 14);

    // Load order preserved.
    let ids: Vec<_> = store.partitions().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["Enochian", "Thelema", "Hermetic_Qabalah", "Alchemy"]);

    // Name falls back to id only when absent.
    assert_eq!(store.get_partition("Enochian").unwrap().name, "Enochian Magic");
}

#[test]
fn fragment_lookup_distinguishes_missing_partition_and_fragment() {
    let store = KnowledgeStore::from_json(&knowledge_bundle_json()).unwrap();
    let f = store.get_fragment("Thelema", "the-02").unwrap();
    assert_eq!(f.name, "Liber 418");

    assert!(matches!(
        store.get_fragment("Thelema", "the-99"),
        Err(StoreError::FragmentNotFound { .. })
    ));
    assert!(matches!(
        store.get_fragment("Goetia", "x"),
        Err(StoreError::PartitionNotFound { .. })
    ));
    assert!(matches!(
        store.get_partition("Goetia"),
        Err(StoreError::PartitionNotFound { .. })
    ));
}

#[test]
fn trait_object_exposes_the_same_view() {
    let store = KnowledgeStore::from_json(&knowledge_bundle_json()).unwrap();
    let dyn_store: &dyn IKnowledgeStore = &store;
    assert_eq!(dyn_store.primary_id(), "Enochian");
    assert_eq!(dyn_store.partition_ids().len(), 4);
    assert!(dyn_store.get_fragment("Alchemy", "alc-01").is_ok());
    assert!(matches!(
        dyn_store.get_partition("Nope"),
        Err(LighthouseError::StoreError(StoreError::PartitionNotFound { .. }))
    ));
}

#[test]
fn dangling_cross_refs_are_not_load_errors() {
    let store = KnowledgeStore::from_json(&knowledge_bundle_json()).unwrap();
    let f = store.get_fragment("Enochian", "eno-05").unwrap();
    assert_eq!(f.cross_refs[0].fragment_id, "eno-99");
}

#[test]
fn keywords_are_normalized_on_load() {
    let source = PartitionSource::new("Enochian", true)
        .with_keywords(["  Aethyr ", "aethyr", "", "SIGIL"])
        .with_fragments(vec![fragment("f1", "text", 0.5)]);
    let store = KnowledgeStore::load(vec![source]).unwrap();
    assert_eq!(store.primary().keywords, vec!["aethyr", "sigil"]);
}

#[test]
fn missing_primary_is_invalid_configuration() {
    let err = KnowledgeStore::load(vec![partition_source("Thelema", false, 2)]).unwrap_err();
    assert!(matches!(err, LighthouseError::InvalidConfiguration { .. }));
    assert!(err.is_fatal());

    let err = KnowledgeStore::load(Vec::new()).unwrap_err();
    assert!(matches!(err, LighthouseError::InvalidConfiguration { .. }));
}

#[test]
fn multiple_primaries_are_invalid_configuration() {
    let err = KnowledgeStore::load(vec![
        partition_source("Enochian", true, 2),
        partition_source("Thelema", true, 2),
    ])
    .unwrap_err();
    assert!(matches!(err, LighthouseError::InvalidConfiguration { .. }));
    assert!(err.to_string().contains("Thelema"));
}

#[test]
fn duplicate_ids_are_load_errors() {
    let err = KnowledgeStore::load(vec![
        partition_source("Enochian", true, 2),
        partition_source("Enochian", false, 2),
    ])
    .unwrap_err();
    assert!(matches!(
        err,
        LighthouseError::StoreError(StoreError::DuplicatePartition { .. })
    ));
    assert!(err.is_fatal());

    let source = PartitionSource::new("Enochian", true)
        .with_fragments(vec![fragment("f1", "a", 0.5), fragment("f1", "b", 0.5)]);
    let err = KnowledgeStore::load(vec![source]).unwrap_err();
    assert!(matches!(
        err,
        LighthouseError::StoreError(StoreError::DuplicateFragment { .. })
    ));
}

#[test]
fn citation_reliability_must_be_in_unit_range() {
    for bad in [1.2, -0.1, f64::NAN] {
        let mut f = fragment("f1", "a", 0.5);
        f.citations.push(Citation {
            source_label: "bad".into(),
            reliability: bad,
        });
        let source = PartitionSource::new("Enochian", true).with_fragments(vec![f]);
        let err = KnowledgeStore::load(vec![source]).unwrap_err();
        assert!(matches!(
            err,
            LighthouseError::StoreError(StoreError::InvalidCitation { .. })
        ));
    }
}

#[test]
fn malformed_bundle_is_a_load_error() {
    let err = KnowledgeStore::from_json("{\"partitions\": [{\"name\": 3}]}").unwrap_err();
    assert!(matches!(
        err,
        LighthouseError::StoreError(StoreError::LoadFailed { .. })
    ));
    assert!(err.is_fatal());
}

#[test]
fn store_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KnowledgeStore>();
}
