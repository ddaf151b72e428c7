use academy::error::AcademyError;
use academy::usecase::session::{LoginInput, LoginUseCase, LogoutUseCase, RefreshUseCase};
use academy_auth_types::token::{validate_access_token, validate_refresh_token};
use academy_domain::user::AuthRole;
use academy_testing::auth::MockAuth;

use crate::helpers::{
    MockBlacklist, MockUserRepo, TEST_JWT_SECRET, TEST_PASSWORD, other_user, test_user,
};

// ── LoginUseCase ─────────────────────────────────────────────────────────────

fn login(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: username.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn should_issue_token_pair_for_valid_credentials() {
    let user = test_user();
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let pair = usecase.execute(login("alice", TEST_PASSWORD)).await.unwrap();

    let access = validate_access_token(&pair.access, TEST_JWT_SECRET).unwrap();
    assert_eq!(access.user_id().unwrap(), user.id);
    assert_eq!(access.role, AuthRole::Student);
    let refresh = validate_refresh_token(&pair.refresh, TEST_JWT_SECRET).unwrap();
    assert_ne!(access.jti, refresh.jti);
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_user_alike() {
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![test_user()]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase.execute(login("alice", "wrong-password")).await;
    assert!(matches!(result, Err(AcademyError::InvalidCredentials)));

    let result = usecase.execute(login("nobody", TEST_PASSWORD)).await;
    assert!(matches!(result, Err(AcademyError::InvalidCredentials)));
}

// ── RefreshUseCase ───────────────────────────────────────────────────────────

fn refresh_usecase(blacklist: MockBlacklist) -> RefreshUseCase<MockUserRepo, MockBlacklist> {
    RefreshUseCase {
        users: MockUserRepo::new(vec![test_user()]),
        blacklist,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

#[tokio::test]
async fn should_exchange_refresh_token_for_access_token() {
    let refresh = MockAuth::student(1).refresh_token();

    let access = refresh_usecase(MockBlacklist::default())
        .execute(&refresh)
        .await
        .unwrap();

    let claims = validate_access_token(&access, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.user_id().unwrap(), 1);
}

#[tokio::test]
async fn should_not_refresh_with_access_token() {
    let access = MockAuth::student(1).access_token();
    let result = refresh_usecase(MockBlacklist::default())
        .execute(&access)
        .await;
    assert!(
        matches!(result, Err(AcademyError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_not_refresh_with_token_for_deleted_user() {
    let refresh = MockAuth::student(77).refresh_token();
    let result = refresh_usecase(MockBlacklist::default())
        .execute(&refresh)
        .await;
    assert!(matches!(result, Err(AcademyError::InvalidRefreshToken)));
}

// ── LogoutUseCase ────────────────────────────────────────────────────────────

fn logout_usecase(blacklist: MockBlacklist) -> LogoutUseCase<MockBlacklist> {
    LogoutUseCase {
        blacklist,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

#[tokio::test]
async fn should_blacklist_refresh_token_on_logout() {
    let blacklist = MockBlacklist::default();
    let refresh = MockAuth::student(1).refresh_token();

    logout_usecase(blacklist.clone())
        .execute(1, &refresh)
        .await
        .unwrap();

    let jti = validate_refresh_token(&refresh, TEST_JWT_SECRET).unwrap().jti;
    assert!(blacklist.revoked.lock().unwrap().contains(&jti));

    let result = refresh_usecase(blacklist).execute(&refresh).await;
    assert!(matches!(result, Err(AcademyError::InvalidRefreshToken)));
}

#[tokio::test]
async fn should_report_second_logout_as_blacklisted() {
    let blacklist = MockBlacklist::default();
    let refresh = MockAuth::student(1).refresh_token();
    let usecase = logout_usecase(blacklist);

    usecase.execute(1, &refresh).await.unwrap();
    let result = usecase.execute(1, &refresh).await;

    assert!(
        matches!(result, Err(AcademyError::TokenBlacklisted)),
        "expected TokenBlacklisted, got {result:?}"
    );
}

#[tokio::test]
async fn should_refuse_to_logout_someone_elses_token() {
    let blacklist = MockBlacklist::default();
    let refresh = MockAuth::student(other_user().id).refresh_token();

    let result = logout_usecase(blacklist.clone()).execute(1, &refresh).await;

    assert!(matches!(result, Err(AcademyError::InvalidToken)));
    assert!(blacklist.revoked.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_garbage_or_access_token_on_logout() {
    let usecase = logout_usecase(MockBlacklist::default());

    let result = usecase.execute(1, "garbage").await;
    assert!(matches!(result, Err(AcademyError::InvalidToken)));

    let access = MockAuth::student(1).access_token();
    let result = usecase.execute(1, &access).await;
    assert!(matches!(result, Err(AcademyError::InvalidToken)));
}
