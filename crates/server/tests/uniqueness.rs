mod common;

use lms_api_types::RegisterRequest;
use lms_core::domain::{Role, Title};
use lms_server::repository::{
    CategoryRepository, NewUser, SeaOrmCategoryRepository, SeaOrmUserRepository, UserRepository,
    is_unique_violation,
};
use lms_server::service::ServiceError;

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        role: Role::Student,
        first_name: String::new(),
        last_name: String::new(),
        mobile_no: None,
    }
}

fn title(raw: &str) -> Title {
    Title::new(raw.to_string()).expect("title should be valid")
}

#[tokio::test]
async fn test_duplicate_category_insert_returns_none() {
    let app = common::setup().await;
    let categories = SeaOrmCategoryRepository::new(app.db.clone());

    let first = categories
        .create(title("Art"))
        .await
        .expect("first insert should succeed");
    assert!(first.is_some());

    let second = categories
        .create(title("Art"))
        .await
        .expect("duplicate insert should not be an error");
    assert!(second.is_none());
}

#[tokio::test]
async fn test_renaming_onto_taken_title_is_a_unique_violation() {
    let app = common::setup().await;
    let categories = SeaOrmCategoryRepository::new(app.db.clone());
    categories
        .create(title("Art"))
        .await
        .expect("insert should succeed");
    let biology = categories
        .create(title("Biology"))
        .await
        .expect("insert should succeed")
        .expect("title should be free");

    let err = categories
        .rename(biology.id, title("Art"))
        .await
        .expect_err("rename onto a taken title should fail");
    assert!(is_unique_violation(&err), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_duplicate_user_insert_returns_none() {
    let app = common::setup().await;
    let users = SeaOrmUserRepository::new(app.db.clone());

    let first = users
        .create(new_user("ada", "ada@example.com"))
        .await
        .expect("first insert should succeed");
    assert!(first.is_some());

    let same_username = users
        .create(new_user("ada", "other@example.com"))
        .await
        .expect("duplicate username should not be an error");
    assert!(same_username.is_none());

    let same_email = users
        .create(new_user("lovelace", "ada@example.com"))
        .await
        .expect("duplicate email should not be an error");
    assert!(same_email.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_registrations_yield_one_user_and_conflicts() {
    let app = common::setup_file_backed().await;

    let tasks: Vec<_> = (0..4)
        .map(|i| {
            let accounts = app.state.accounts.clone();
            tokio::spawn(async move {
                accounts
                    .register(RegisterRequest {
                        username: "ada".to_string(),
                        email: format!("ada{i}@example.com"),
                        password: common::PASSWORD.to_string(),
                        role: Some(Role::Student.to_string()),
                        first_name: String::new(),
                        last_name: String::new(),
                        mobile_no: None,
                    })
                    .await
            })
        })
        .collect();

    let mut registered = 0;
    for task in tasks {
        match task.await.expect("registration task should not panic") {
            Ok(_) => registered += 1,
            Err(ServiceError::Conflict(_)) => {}
            Err(other) => panic!("expected a conflict, got {other:?}"),
        }
    }
    assert_eq!(registered, 1);
}
