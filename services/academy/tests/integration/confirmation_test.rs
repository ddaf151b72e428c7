use academy::domain::types::CONFIRMATION_CODE_TTL_SECS;
use academy::error::AcademyError;
use academy::usecase::confirmation::{
    CodePurpose, ConfirmCodeInput, ConfirmCodeUseCase, RequestCodeUseCase,
};
use academy_auth_types::token::{validate_access_token, validate_refresh_token};
use academy_domain::user::AuthStatus;

use crate::helpers::{MockCodeStore, MockSender, MockUserRepo, TEST_JWT_SECRET, test_user};

// ── RequestCodeUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_and_email_code_for_email_contact() {
    let user = test_user();
    let codes = MockCodeStore::default();
    let sender = MockSender::default();
    let usecase = RequestCodeUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        codes: codes.clone(),
        sender: sender.clone(),
    };

    let user_id = usecase.execute("alice@example.com").await.unwrap();

    assert_eq!(user_id, user.id);
    let stored = codes.code_for(user.id).unwrap();
    assert_eq!(stored.len(), 6);
    assert!(stored.bytes().all(|b| b.is_ascii_digit()));
    assert_eq!(codes.ttl_for(user.id), Some(CONFIRMATION_CODE_TTL_SECS));

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].channel, "email");
    assert_eq!(sent[0].to, "alice@example.com");
    assert_eq!(sent[0].code, stored);
}

#[tokio::test]
async fn should_text_code_for_phone_contact() {
    let user = test_user();
    let sender = MockSender::default();
    let usecase = RequestCodeUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        codes: MockCodeStore::default(),
        sender: sender.clone(),
    };

    usecase.execute(" +998901234567 ").await.unwrap();

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].channel, "sms");
    assert_eq!(sent[0].to, "+998901234567");
}

#[tokio::test]
async fn should_replace_pending_code() {
    let user = test_user();
    let codes = MockCodeStore::with_code(user.id, "stale!");
    let usecase = RequestCodeUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        codes: codes.clone(),
        sender: MockSender::default(),
    };

    usecase.execute("alice@example.com").await.unwrap();

    assert_ne!(codes.code_for(user.id).as_deref(), Some("stale!"));
}

#[tokio::test]
async fn should_reject_unrecognised_contact() {
    let sender = MockSender::default();
    let usecase = RequestCodeUseCase {
        users: MockUserRepo::new(vec![test_user()]),
        codes: MockCodeStore::default(),
        sender: sender.clone(),
    };

    let result = usecase.execute("not a contact").await;
    assert!(
        matches!(result, Err(AcademyError::InvalidContact)),
        "expected InvalidContact, got {result:?}"
    );
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn should_report_unknown_account() {
    let codes = MockCodeStore::default();
    let usecase = RequestCodeUseCase {
        users: MockUserRepo::empty(),
        codes: codes.clone(),
        sender: MockSender::default(),
    };

    let result = usecase.execute("ghost@example.com").await;
    assert!(matches!(result, Err(AcademyError::UserNotFound)));
    assert!(codes.codes.lock().unwrap().is_empty());
}

// ── ConfirmCodeUseCase ───────────────────────────────────────────────────────

fn confirm_usecase(
    users: MockUserRepo,
    codes: MockCodeStore,
) -> ConfirmCodeUseCase<MockUserRepo, MockCodeStore> {
    ConfirmCodeUseCase {
        users,
        codes,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

fn code_input(user_id: i64, code: &str) -> ConfirmCodeInput {
    ConfirmCodeInput {
        user_id,
        code: code.to_owned(),
    }
}

#[tokio::test]
async fn should_confirm_account_and_issue_tokens() {
    let user = test_user();
    let users = MockUserRepo::new(vec![user.clone()]);
    let usecase = confirm_usecase(users.clone(), MockCodeStore::with_code(user.id, "123456"));

    let pair = usecase
        .execute(code_input(user.id, "123456"), CodePurpose::ConfirmEmail)
        .await
        .unwrap();

    assert_eq!(users.get(user.id).unwrap().auth_status, AuthStatus::Confirmed);
    let access = validate_access_token(&pair.access, TEST_JWT_SECRET).unwrap();
    assert_eq!(access.user_id().unwrap(), user.id);
    let refresh = validate_refresh_token(&pair.refresh, TEST_JWT_SECRET).unwrap();
    assert_eq!(refresh.user_id().unwrap(), user.id);
}

#[tokio::test]
async fn should_leave_status_alone_for_reset_code() {
    let user = test_user();
    let users = MockUserRepo::new(vec![user.clone()]);
    let usecase = confirm_usecase(users.clone(), MockCodeStore::with_code(user.id, "654321"));

    usecase
        .execute(code_input(user.id, "654321"), CodePurpose::ResetPassword)
        .await
        .unwrap();

    assert_eq!(users.get(user.id).unwrap().auth_status, AuthStatus::Unconfirmed);
}

#[tokio::test]
async fn should_keep_code_usable_until_expiry() {
    let user = test_user();
    let codes = MockCodeStore::with_code(user.id, "111222");
    let usecase = confirm_usecase(MockUserRepo::new(vec![user.clone()]), codes.clone());

    for _ in 0..2 {
        usecase
            .execute(code_input(user.id, "111222"), CodePurpose::ResetPassword)
            .await
            .unwrap();
    }
    assert_eq!(codes.code_for(user.id).as_deref(), Some("111222"));
}

#[tokio::test]
async fn should_reject_wrong_or_missing_code() {
    let user = test_user();
    let users = MockUserRepo::new(vec![user.clone()]);

    let usecase = confirm_usecase(users.clone(), MockCodeStore::with_code(user.id, "123456"));
    let result = usecase
        .execute(code_input(user.id, "000000"), CodePurpose::ConfirmEmail)
        .await;
    assert!(matches!(result, Err(AcademyError::InvalidCode)));
    assert_eq!(users.get(user.id).unwrap().auth_status, AuthStatus::Unconfirmed);

    let usecase = confirm_usecase(users, MockCodeStore::default());
    let result = usecase
        .execute(code_input(user.id, "000000"), CodePurpose::ConfirmEmail)
        .await;
    assert!(matches!(result, Err(AcademyError::InvalidCode)));
}

#[tokio::test]
async fn should_report_missing_user_before_checking_code() {
    let usecase = confirm_usecase(MockUserRepo::empty(), MockCodeStore::with_code(9, "123456"));
    let result = usecase
        .execute(code_input(9, "123456"), CodePurpose::ConfirmEmail)
        .await;
    assert!(
        matches!(result, Err(AcademyError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}
