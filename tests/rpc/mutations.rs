//! `setup.create`, `setup.delete` and `setup.like`.

use serde_json::json;
use showcase::rpc::{CommandRequest, ErrorCode, ErrorEnvelope, HandlerError, Session, USER_ID};
use showcase::Setup;

use crate::support::{seeded_service, signed_in};

fn stored_count(service: &crate::support::SetupService) -> usize {
    service.repo().len().unwrap()
}

#[test]
fn like_adds_exactly_one() {
    let service = seeded_service();
    let liked: Setup = serde_json::from_value(
        service
            .dispatch("setup.like", json!({ "id": "1" }), signed_in("user-1"))
            .unwrap(),
    )
    .unwrap();

    assert_eq!(liked.likes, 43);
    assert_eq!(service.repo().find_by_id("1").unwrap().unwrap().likes, 43);
}

#[test]
fn mutations_require_a_session() {
    let service = seeded_service();

    for command in ["setup.like", "setup.delete"] {
        let err = service
            .dispatch(command, json!({ "id": "1" }), Session::new())
            .unwrap_err();
        assert!(matches!(err, HandlerError::Unauthorized(_)), "{command}");
    }

    assert_eq!(service.repo().find_by_id("1").unwrap().unwrap().likes, 42);
    assert_eq!(stored_count(&service), 12);
}

#[test]
fn blank_user_id_is_not_a_session() {
    let service = seeded_service();
    let err = service
        .dispatch("setup.like", json!({ "id": "1" }), signed_in("  "))
        .unwrap_err();
    assert!(matches!(err, HandlerError::Unauthorized(_)));
}

#[test]
fn like_missing_is_not_found() {
    let service = seeded_service();
    let err = service
        .dispatch("setup.like", json!({ "id": "404" }), signed_in("user-1"))
        .unwrap_err();
    assert!(matches!(err, HandlerError::NotFound(_)));
}

#[test]
fn delete_twice_leaves_state_as_first_delete_did() {
    let service = seeded_service();
    let session = || signed_in("user-1");

    let removed = service
        .dispatch("setup.delete", json!({ "id": "2" }), session())
        .unwrap();
    assert_eq!(removed["id"], "2");
    let after_first = service
        .dispatch("setup.all", json!(null), Session::new())
        .unwrap();

    let err = service
        .dispatch("setup.delete", json!({ "id": "2" }), session())
        .unwrap_err();
    assert!(matches!(err, HandlerError::NotFound(_)));

    let after_second = service
        .dispatch("setup.all", json!(null), Session::new())
        .unwrap();
    assert_eq!(after_first, after_second);
    assert_eq!(stored_count(&service), 11);
}

#[test]
fn create_with_empty_title_never_reaches_the_store() {
    let service = seeded_service();
    let before = stored_count(&service);

    let err = service
        .dispatch(
            "setup.create",
            json!({ "title": "", "author": "Ana", "imageUrl": "img" }),
            Session::new(),
        )
        .unwrap_err();

    match err {
        HandlerError::Validation(e) => {
            assert_eq!(e.field, "title");
            assert_eq!(e.message, "Title is required");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(stored_count(&service), before);
}

#[test]
fn create_with_missing_fields_is_a_validation_error() {
    let service = seeded_service();
    let response = service.dispatch_request(&CommandRequest {
        command: "setup.create".into(),
        input: json!({ "title": "Desk" }),
        session_variables: Default::default(),
    });

    assert_eq!(response.status, 400);
    let envelope: ErrorEnvelope = serde_json::from_value(response.body).unwrap();
    assert_eq!(envelope.error.code, ErrorCode::BadRequest);
    assert_eq!(envelope.error.field.as_deref(), Some("author"));
}

#[test]
fn create_fills_defaults_and_lists_after_seeded_rows() {
    let service = seeded_service();
    let created: Setup = serde_json::from_value(
        service
            .dispatch(
                "setup.create",
                json!({
                    "title": "Attic Studio",
                    "author": "Noor",
                    "imageUrl": "https://example.com/attic.jpg",
                    "tags": ["attic"]
                }),
                Session::new(),
            )
            .unwrap(),
    )
    .unwrap();

    assert_eq!(created.likes, 0);
    assert_eq!(created.tags, vec!["attic"]);
    assert_eq!(created.description, None);
    assert_eq!(service.repo().find_by_id(&created.id).unwrap(), Some(created));
    assert_eq!(stored_count(&service), 13);
}

#[test]
fn session_header_is_case_insensitive() {
    let service = seeded_service();
    let mut vars = std::collections::HashMap::new();
    vars.insert(USER_ID.to_uppercase(), "user-7".to_string());

    let response = service.dispatch_request(&CommandRequest {
        command: "setup.like".into(),
        input: json!({ "id": "3" }),
        session_variables: vars,
    });
    assert_eq!(response.status, 200);
    assert_eq!(response.body["likes"], 28);
}

#[test]
fn like_at_the_ceiling_is_rejected_without_change() {
    let service = seeded_service();
    let created = service
        .dispatch(
            "setup.create",
            json!({ "title": "Maxed", "author": "Ana", "imageUrl": "img", "likes": u32::MAX }),
            Session::new(),
        )
        .unwrap();
    let id = created["id"].as_str().unwrap();

    let err = service
        .dispatch("setup.like", json!({ "id": id }), signed_in("user-1"))
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::BadRequest);
    assert_eq!(err.to_body().field.as_deref(), Some("likes"));
    assert_eq!(
        service.repo().find_by_id(id).unwrap().unwrap().likes,
        u32::MAX
    );
}
