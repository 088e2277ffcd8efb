use clubtally_core::{Event, Member, MemberValidationError, PointLog};
use uuid::Uuid;

#[test]
fn member_new_sets_defaults_and_trims_name() {
    let member = Member::new("  Selin  ").unwrap();

    assert!(!member.id.is_nil());
    assert_eq!(member.name, "Selin");
    assert_eq!(member.points, 0);
    assert!(member.history.is_empty());
}

#[test]
fn member_new_rejects_blank_and_nil() {
    assert_eq!(
        Member::new(" \t ").unwrap_err(),
        MemberValidationError::EmptyName
    );
    assert_eq!(
        Member::with_id(Uuid::nil(), "Can").unwrap_err(),
        MemberValidationError::NilUuid
    );
}

#[test]
fn member_serialization_uses_expected_wire_fields() {
    let member_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let event = Event::new("Karaoke", 1, "🎶").unwrap();
    let mut member = Member::with_id(member_id, "Emre").unwrap();
    member
        .record_award(PointLog::from_event(&event, 1_700_000_000_000))
        .unwrap();

    let json = serde_json::to_value(&member).unwrap();
    assert_eq!(json["id"], member_id.to_string());
    assert_eq!(json["name"], "Emre");
    assert_eq!(json["points"], 1);
    assert_eq!(json["history"][0]["event_name"], "Karaoke");
    assert_eq!(json["history"][0]["points"], 1);
    assert_eq!(json["history"][0]["created_at_ms"], 1_700_000_000_000_i64);

    let decoded: Member = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, member);
}

#[test]
fn deserialize_rejects_points_history_mismatch() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "name": "Bora",
        "points": 7,
        "history": [{
            "id": "21111111-2222-4333-8444-555555555555",
            "event_name": "Gathering",
            "points": 3,
            "created_at_ms": 1
        }]
    });

    let err = serde_json::from_value::<Member>(value).unwrap_err();
    assert!(
        err.to_string()
            .contains("member points (7) must equal history total (3)"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_duplicate_point_log_ids() {
    let entry = |points: i64| {
        serde_json::json!({
            "id": "21111111-2222-4333-8444-555555555555",
            "event_name": "Gathering",
            "points": points,
            "created_at_ms": 1
        })
    };
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "name": "Bora",
        "points": 5,
        "history": [entry(2), entry(3)]
    });

    let err = serde_json::from_value::<Member>(value).unwrap_err();
    assert!(
        err.to_string().contains("appears more than once"),
        "unexpected error: {err}"
    );
}

#[test]
fn event_deserialize_rejects_blank_name() {
    let value = serde_json::json!({
        "id": "31111111-2222-4333-8444-555555555555",
        "name": "  ",
        "points": 2,
        "glyph": "🎤"
    });

    let err = serde_json::from_value::<Event>(value).unwrap_err();
    assert!(err.to_string().contains("event name must not be empty"));
}

#[test]
fn negative_and_zero_point_events_are_allowed() {
    assert_eq!(Event::new("Penalty", -2, "🔥").unwrap().points, -2);
    assert_eq!(Event::new("Attendance", 0, "📚").unwrap().points, 0);
}
