use surveillance_dashboard::core::{DatasetStore, LoadReport, RawRecord, RegionTotal, TimeValue};

fn sample_store() -> DatasetStore {
    DatasetStore::load(vec![
        RawRecord::new("Austria", "AT", 1, 5.0),
        RawRecord::new("Nowhere", "ZZ", 1, 100.0),
        RawRecord::new("Germany", "DE", 1, 20.0),
        RawRecord::new("Austria", "AT", 2, 9.0),
        RawRecord::new("France", "FR", 1, 14.0),
    ])
}

#[test]
fn load_drops_unmapped_records_and_keeps_order() {
    let store = sample_store();

    assert_eq!(store.len(), 4);
    let codes: Vec<&str> = store
        .all()
        .iter()
        .map(|record| record.region_code3.as_str())
        .collect();
    assert_eq!(codes, vec!["AUT", "DEU", "AUT", "FRA"]);
    assert!(store.all().iter().all(|record| record.region_code2 != "ZZ"));
    assert_eq!(
        store.load_report(),
        LoadReport {
            raw: 5,
            retained: 4,
            dropped_unmapped: 1,
            missing_values: 0,
            saturated_totals: 0,
        }
    );
}

#[test]
fn distinct_values_follow_first_seen_order() {
    let store = sample_store();

    let names: Vec<&str> = store.distinct_region_names().into_iter().collect();
    assert_eq!(names, vec!["Austria", "Germany", "France"]);

    let codes: Vec<&str> = store.distinct_region_codes3().into_iter().collect();
    assert_eq!(codes, vec!["AUT", "DEU", "FRA"]);
}

#[test]
fn filters_match_exact_keys_only() {
    let store = sample_store();

    let austria = store.filter_by_region_name("Austria");
    assert_eq!(austria.len(), 2);
    assert_eq!(austria[0].time, TimeValue::numeric(1.0));
    assert_eq!(austria[1].time, TimeValue::numeric(2.0));

    assert!(store.filter_by_region_name("austria").is_empty());
    assert!(store.filter_by_region_name("Austria' or '1'=='1").is_empty());
    assert_eq!(store.filter_by_region_code3("DEU").len(), 1);
    assert!(store.filter_by_region_code3("AT").is_empty());
}

#[test]
fn top_n_sorts_descending_and_truncates() {
    let store = sample_store();

    assert_eq!(
        store.top_n_by_region_code3(2),
        vec![RegionTotal::new("DEU", 20.0), RegionTotal::new("AUT", 14.0)]
    );
    assert_eq!(store.top_n_by_region_code3(10).len(), 3);
    assert!(store.top_n_by_region_code3(0).is_empty());
}

#[test]
fn top_n_ties_keep_first_seen_order() {
    let store = DatasetStore::load(vec![
        RawRecord::new("France", "FR", 1, 7.0),
        RawRecord::new("Austria", "AT", 1, 3.0),
        RawRecord::new("Germany", "DE", 1, 7.0),
        RawRecord::new("Austria", "AT", 2, 4.0),
    ]);

    let codes: Vec<String> = store
        .top_n_by_region_code3(3)
        .into_iter()
        .map(|entry| entry.region_code3)
        .collect();
    assert_eq!(codes, vec!["FRA", "AUT", "DEU"]);
}

#[test]
fn empty_input_builds_an_empty_store() {
    let store = DatasetStore::load(Vec::new());
    assert!(store.is_empty());
    assert!(store.distinct_region_names().is_empty());
    assert!(store.top_n_by_region_code3(5).is_empty());
}
