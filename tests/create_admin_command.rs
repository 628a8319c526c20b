use std::sync::Arc;

use admin_users_api::commands::create_admin::{CreateAdminArgs, CreateAdminCommand};
use admin_users_api::commands::{CommandStatus, OutputType};
use admin_users_api::models::admin::Admin;
use admin_users_api::repositories::admin_repository::AdminStore;
use admin_users_api::services::admin_listener::AdminCreatedListener;
use admin_users_api::services::admin_user_manager::AdminUserManager;
use admin_users_api::test_helpers::{InMemoryAdminStore, ScriptedConsole, StubHasher};
use clap::Parser;

fn store() -> InMemoryAdminStore {
    InMemoryAdminStore::new().with_listener(AdminCreatedListener::new(Arc::new(StubHasher)))
}

fn full_args() -> CreateAdminArgs {
    CreateAdminArgs::parse_from(["create-admin", "admin@mail.com", "test", "Admin", "Admin"])
}

async fn run(
    store: &InMemoryAdminStore,
    args: CreateAdminArgs,
    answers: Vec<Option<String>>,
) -> (CommandStatus, ScriptedConsole) {
    let command = CreateAdminCommand::new(AdminUserManager::new(Arc::new(store.clone())));
    let mut console = ScriptedConsole::new(answers);
    let status = command.execute(args, &mut console).await.expect("execute");
    (status, console)
}

#[tokio::test]
async fn creates_admin_from_full_arguments() {
    let store = store();
    let (status, console) = run(&store, full_args(), vec![]).await;

    assert_eq!(status, CommandStatus::Success);
    assert!(console.output().contains("Admin admin@mail.com created"));
    assert_eq!(console.written.last().map(|(_, t)| *t), Some(OutputType::Info));

    let admins = store.admins();
    assert_eq!(admins.len(), 1);
    let admin = &admins[0];
    assert!(admin.id.is_some());
    assert_eq!(admin.email, "admin@mail.com");
    assert_eq!(admin.password.as_deref(), Some("hashed:test"));
    assert_eq!(admin.first_name.as_deref(), Some("Admin"));
    assert_eq!(admin.last_name.as_deref(), Some("Admin"));
    assert!(admin.created_at().is_some());
}

#[tokio::test]
async fn empty_optional_names_are_left_unset() {
    for (first, last) in [("", "Admin"), ("Admin", ""), ("", "")] {
        let store = store();
        let args = CreateAdminArgs {
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            ..full_args()
        };
        let (status, console) = run(&store, args, vec![]).await;

        assert_eq!(status, CommandStatus::Success, "{:?}", console.output());
        let admin = &store.admins()[0];
        assert_eq!(admin.first_name.is_none(), first.is_empty());
        assert_eq!(admin.last_name.is_none(), last.is_empty());
    }
}

#[tokio::test]
async fn missing_arguments_are_prompted_for() {
    let store = store();
    let answers = vec![
        Some("admin@mail.com".to_string()),
        Some("test".to_string()),
        None,
        Some("Admin".to_string()),
    ];
    let (status, console) = run(&store, CreateAdminArgs::default(), answers).await;

    assert_eq!(status, CommandStatus::Success);
    assert_eq!(
        console.questions,
        ["Email: ", "Password: ", "First name: ", "Last name: "]
    );
    let admin = &store.admins()[0];
    assert!(admin.first_name.is_none());
    assert_eq!(admin.last_name.as_deref(), Some("Admin"));
}

#[tokio::test]
async fn duplicated_email_is_refused_without_saving() {
    let store = store();
    store.save(&mut Admin::new("admin@mail.com")).await.unwrap();
    let calls_before = store.save_calls();

    let (status, console) = run(&store, full_args(), vec![]).await;

    assert_eq!(status, CommandStatus::Failure);
    assert!(console.output().contains("This email is already used"));
    assert_eq!(store.save_calls(), calls_before);
}

#[tokio::test]
async fn invalid_required_arguments_fail() {
    let cases = [
        ("", "test", "Invalid email", true),
        ("invalid_email", "test", "Invalid email", false),
        ("admin@mail.com", "", "Invalid password", true),
        ("", "", "Invalid email", true),
        ("admin@mail.com", "pas", "Invalid password", false),
        (
            "admin@mail.com",
            "suuuuper_loooooooooong_passwooooooord",
            "Invalid password",
            false,
        ),
    ];

    for (email, password, expected, required_message) in cases {
        let store = store();
        let args = CreateAdminArgs {
            email: Some(email.into()),
            password: Some(password.into()),
            ..full_args()
        };
        let (status, console) = run(&store, args, vec![]).await;
        let output = console.output();

        assert_eq!(status, CommandStatus::Failure, "{email:?}/{password:?}");
        assert!(output.contains(expected), "{output}");
        if required_message {
            assert!(output.contains("This param is required"), "{output}");
        }
        assert!(store.admins().is_empty());
        assert!(console.written.iter().all(|(_, t)| *t == OutputType::Error));
    }
}

#[tokio::test]
async fn invalid_optional_arguments_fail() {
    let long = "suuuuper_loooooooooong_firstNaaaaaame";
    let cases = [
        (Some("A"), None, "Invalid firstName"),
        (Some(long), None, "Invalid firstName"),
        (None, Some("A"), "Invalid lastName"),
        (None, Some(long), "Invalid lastName"),
    ];

    for (first, last, expected) in cases {
        let store = store();
        let defaults = full_args();
        let args = CreateAdminArgs {
            first_name: first.map(String::from).or(defaults.first_name.clone()),
            last_name: last.map(String::from).or(defaults.last_name.clone()),
            ..defaults
        };
        let (status, console) = run(&store, args, vec![]).await;

        assert_eq!(status, CommandStatus::Failure);
        assert!(console.output().contains(expected), "{}", console.output());
        assert!(store.admins().is_empty());
    }
}

#[tokio::test]
async fn unanswered_email_prompt_reports_required_argument() {
    let store = store();
    let (status, console) = run(&store, CreateAdminArgs::default(), vec![None]).await;

    assert_eq!(status, CommandStatus::Failure);
    assert!(console.output().contains("Argument email is required"));
}
