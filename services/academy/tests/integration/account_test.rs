use academy::error::AcademyError;
use academy::usecase::account::{GetAccountUseCase, UpdateAccountInput, UpdateAccountUseCase};
use academy_auth_types::identity::Identity;
use academy_domain::user::AuthRole;

use crate::helpers::{MockUserRepo, other_user, test_user};

fn caller(user_id: i64, role: AuthRole) -> Identity {
    Identity { user_id, role }
}

#[tokio::test]
async fn should_get_account_by_id() {
    let user = test_user();
    let usecase = GetAccountUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    assert_eq!(usecase.execute(user.id).await.unwrap().username, "alice");
    assert!(matches!(
        usecase.execute(404).await,
        Err(AcademyError::UserNotFound)
    ));
}

#[tokio::test]
async fn should_let_owner_update_own_profile() {
    let user = test_user();
    let users = MockUserRepo::new(vec![user.clone()]);
    let usecase = UpdateAccountUseCase {
        users: users.clone(),
    };

    let updated = usecase
        .execute(
            caller(user.id, AuthRole::Student),
            user.id,
            UpdateAccountInput {
                username: Some(" alicia ".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.username, "alicia");
    assert_eq!(updated.email, user.email);
    assert_eq!(users.get(user.id).unwrap().username, "alicia");
}

#[tokio::test]
async fn should_forbid_updating_another_account() {
    let user = test_user();
    let usecase = UpdateAccountUseCase {
        users: MockUserRepo::new(vec![user.clone(), other_user()]),
    };

    let result = usecase
        .execute(
            caller(other_user().id, AuthRole::Student),
            user.id,
            UpdateAccountInput {
                username: Some("mallory".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AcademyError::Forbidden)));
}

#[tokio::test]
async fn should_let_admin_update_any_account() {
    let user = test_user();
    let usecase = UpdateAccountUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let updated = usecase
        .execute(
            caller(99, AuthRole::Admin),
            user.id,
            UpdateAccountInput {
                phone_number: Some("+998907654321".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.phone_number.as_deref(), Some("+998907654321"));
}

#[tokio::test]
async fn should_reject_taken_email_but_allow_own() {
    let user = test_user();
    let other = other_user();
    let usecase = UpdateAccountUseCase {
        users: MockUserRepo::new(vec![user.clone(), other.clone()]),
    };
    let me = caller(user.id, AuthRole::Student);

    let result = usecase
        .execute(
            me,
            user.id,
            UpdateAccountInput {
                email: other.email.clone(),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AcademyError::Duplicate("email"))));

    usecase
        .execute(
            me,
            user.id,
            UpdateAccountInput {
                email: user.email.clone(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn should_validate_profile_fields() {
    let user = test_user();
    let usecase = UpdateAccountUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };
    let me = caller(user.id, AuthRole::Student);

    let result = usecase
        .execute(
            me,
            user.id,
            UpdateAccountInput {
                email: Some("nope".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AcademyError::Validation(_))));

    let result = usecase
        .execute(
            me,
            user.id,
            UpdateAccountInput {
                email: Some("alice@localhost".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AcademyError::Validation(_))));

    let result = usecase
        .execute(
            me,
            user.id,
            UpdateAccountInput {
                phone_number: Some("call me".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AcademyError::InvalidInput(_))));
}

#[tokio::test]
async fn should_return_current_account_for_empty_update() {
    let user = test_user();
    let usecase = UpdateAccountUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let same = usecase
        .execute(
            caller(user.id, AuthRole::Student),
            user.id,
            UpdateAccountInput::default(),
        )
        .await
        .unwrap();

    assert_eq!(same.username, user.username);
}
