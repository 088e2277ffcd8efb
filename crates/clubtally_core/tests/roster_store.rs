use clubtally_core::db::open_db_in_memory;
use clubtally_core::{
    Event, KeyValueStore, Member, PointLog, RosterRepository, SqliteKeyValueStore,
    SqliteRosterRepository, EVENTS_KEY, MEMBERS_KEY,
};

#[test]
fn first_run_yields_no_members_and_seed_events() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRosterRepository::try_new(&conn).unwrap();

    assert!(repo.load_members().unwrap().is_empty());

    let events = repo.load_events().unwrap();
    let summary = events
        .iter()
        .map(|event| (event.name.as_str(), event.points, event.glyph.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            ("University", 4, "🎓"),
            ("Gathering", 3, "🤝"),
            ("Symposium", 2, "🎤"),
            ("Karaoke", 1, "🎶"),
        ]
    );
}

#[test]
fn members_roundtrip_through_store() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRosterRepository::try_new(&conn).unwrap();

    let event = Event::new("Symposium", 2, "🎤").unwrap();
    let mut first = Member::new("Aylin").unwrap();
    first.record_award(PointLog::from_event(&event, 5)).unwrap();
    let members = vec![first, Member::new("Burak").unwrap()];

    repo.save_members(&members).unwrap();
    assert_eq!(repo.load_members().unwrap(), members);
}

#[test]
fn events_roundtrip_including_empty_collection() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRosterRepository::try_new(&conn).unwrap();

    let events = vec![Event::new("Jam", 5, "🎸").unwrap()];
    repo.save_events(&events).unwrap();
    assert_eq!(repo.load_events().unwrap(), events);

    // An explicitly emptied list stays empty; defaults only seed a missing key.
    repo.save_events(&[]).unwrap();
    assert!(repo.load_events().unwrap().is_empty());
}

#[test]
fn undecodable_payloads_fall_back_to_defaults() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    store.put(MEMBERS_KEY, "not json").unwrap();
    store.put(EVENTS_KEY, r#"[{"id": 1}]"#).unwrap();

    let repo = SqliteRosterRepository::try_new(&conn).unwrap();
    assert!(repo.load_members().unwrap().is_empty());
    assert_eq!(repo.load_events().unwrap().len(), 4);
}

#[test]
fn members_violating_point_invariant_are_treated_as_undecodable() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    store
        .put(
            MEMBERS_KEY,
            r#"[{"id":"11111111-2222-4333-8444-555555555555","name":"Ada","points":9,"history":[]}]"#,
        )
        .unwrap();

    let repo = SqliteRosterRepository::try_new(&conn).unwrap();
    assert!(repo.load_members().unwrap().is_empty());
}

#[test]
fn members_with_duplicate_history_ids_are_treated_as_undecodable() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let entry = r#"{"id":"21111111-2222-4333-8444-555555555555","event_name":"Gathering","points":POINTS,"created_at_ms":1}"#;
    let payload = format!(
        r#"[{{"id":"11111111-2222-4333-8444-555555555555","name":"Ada","points":5,"history":[{},{}]}}]"#,
        entry.replace("POINTS", "2"),
        entry.replace("POINTS", "3")
    );
    store.put(MEMBERS_KEY, &payload).unwrap();

    let repo = SqliteRosterRepository::try_new(&conn).unwrap();
    assert!(repo.load_members().unwrap().is_empty());
}

#[test]
fn collections_are_stored_under_independent_keys() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRosterRepository::try_new(&conn).unwrap();
    repo.save_members(&[Member::new("Cem").unwrap()]).unwrap();

    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    assert!(store.get(MEMBERS_KEY).unwrap().is_some());
    assert!(store.get(EVENTS_KEY).unwrap().is_none());
}
