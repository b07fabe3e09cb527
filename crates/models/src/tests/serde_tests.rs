use crate::todo;
use chrono::NaiveDate;

#[test]
fn serializes_in_canonical_field_order() {
    let stamp = NaiveDate::from_ymd_opt(2023, 2, 20)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let model = todo::Model {
        id: 1,
        title: "Watch lecture".into(),
        description: None,
        completed: false,
        deadline_at: None,
        created_at: stamp,
        updated_at: stamp,
    };

    let json = serde_json::to_string(&model).unwrap();
    assert_eq!(
        json,
        "{\"id\":1,\"title\":\"Watch lecture\",\"description\":null,\"completed\":false,\
         \"deadline_at\":null,\"created_at\":\"2023-02-20T00:00:00\",\"updated_at\":\"2023-02-20T00:00:00\"}"
    );
}

#[test]
fn deserializes_iso8601_deadline() {
    let model: todo::Model = serde_json::from_str(
        "{\"id\":2,\"title\":\"t\",\"description\":\"d\",\"completed\":true,\
         \"deadline_at\":\"2023-02-27T00:00:00\",\"created_at\":\"2023-02-20T00:00:00\",\
         \"updated_at\":\"2023-02-20T00:00:00\"}",
    )
    .unwrap();

    let deadline = NaiveDate::from_ymd_opt(2023, 2, 27)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(model.deadline_at, Some(deadline));
    assert!(model.completed);
}
