//! Handler-file convention and registration.

use serde_json::json;
use showcase::register_handlers;
use showcase::rpc::handlers::{all, by_id, create, delete, like};
use showcase::rpc::{HandlerError, ProcedureKind, Service, Session};
use showcase::{InMemoryModelStore, SetupStore};

use crate::support::seeded_service;

#[test]
fn every_procedure_is_registered_with_its_kind() {
    let service = seeded_service();
    assert_eq!(
        service.procedures(),
        vec![
            ("setup.all", ProcedureKind::Query),
            ("setup.byId", ProcedureKind::Query),
            ("setup.create", ProcedureKind::Mutation),
            ("setup.delete", ProcedureKind::Mutation),
            ("setup.like", ProcedureKind::Mutation),
        ]
    );
}

#[test]
fn handler_modules_export_their_names() {
    assert_eq!(all::COMMAND, "setup.all");
    assert_eq!(by_id::COMMAND, "setup.byId");
    assert_eq!(create::COMMAND, "setup.create");
    assert_eq!(delete::COMMAND, "setup.delete");
    assert_eq!(like::COMMAND, "setup.like");
    assert_eq!(like::KIND, ProcedureKind::Mutation);
}

#[test]
fn subset_registration() {
    let service = register_handlers!(
        Service::new(SetupStore::new(InMemoryModelStore::new())),
        all,
        create,
    );

    let created = service
        .dispatch(
            create::COMMAND,
            json!({ "title": "Desk", "author": "Ana", "imageUrl": "img" }),
            Session::new(),
        )
        .unwrap();
    assert_eq!(created["likes"], 0);

    let listed = service
        .dispatch(all::COMMAND, json!(null), Session::new())
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let err = service
        .dispatch(like::COMMAND, json!({ "id": "1" }), Session::new())
        .unwrap_err();
    assert_eq!(err, HandlerError::UnknownCommand("setup.like".into()));
}
