use tavern_auth::{
    SessionClaims, create_session_token, create_session_token_at, verify_session_token,
    verify_session_token_at,
};
use tavern_config::JwtConfig;
use tavern_models::RoleId;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig::new("test_secret_key_for_testing_purposes")
}

#[test]
fn test_create_session_token_success() {
    let token = create_session_token(&RoleId::new().to_string(), &get_test_jwt_config()).unwrap();
    assert!(!token.is_empty());
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_verify_session_token_success() {
    let jwt_config = get_test_jwt_config();
    let role_id = RoleId::new();

    let token = create_session_token(&role_id.to_string(), &jwt_config).unwrap();
    let claims = verify_session_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.subject(), Some(role_id.to_string().as_str()));
    assert_eq!(claims.exp - claims.iat, 86_400);
}

#[test]
fn test_verify_session_token_wrong_secret() {
    let token = create_session_token(&RoleId::new().to_string(), &get_test_jwt_config()).unwrap();
    let other = JwtConfig::new("different_secret");

    let err = verify_session_token(&token, &other).unwrap_err();
    assert_eq!(err.status.as_u16(), 401);
    assert_eq!(err.public_message(), "invalid token");
}

#[test]
fn test_verify_session_token_empty_and_malformed() {
    let jwt_config = get_test_jwt_config();
    for token in ["", "abc", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30."] {
        let err = verify_session_token(token, &jwt_config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401, "token {:?}", token);
    }
}

#[test]
fn test_session_window_is_one_day() {
    let jwt_config = get_test_jwt_config();
    let issued_at = 1_700_000_000;
    let token = create_session_token_at("role", &jwt_config, issued_at).unwrap();

    assert!(verify_session_token_at(&token, &jwt_config, issued_at).is_ok());
    assert!(verify_session_token_at(&token, &jwt_config, issued_at + 86_399).is_ok());
    assert!(verify_session_token_at(&token, &jwt_config, issued_at + 86_400).is_err());
}

#[test]
fn test_different_roles_get_different_tokens() {
    let jwt_config = get_test_jwt_config();
    let a = create_session_token_at(&RoleId::new().to_string(), &jwt_config, 1_700_000_000).unwrap();
    let b = create_session_token_at(&RoleId::new().to_string(), &jwt_config, 1_700_000_000).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_session_lifetime_follows_config() {
    let mut jwt_config = get_test_jwt_config();
    jwt_config.session_expiry = 60;

    let token = create_session_token_at("role", &jwt_config, 1_000).unwrap();
    let claims: SessionClaims = verify_session_token_at(&token, &jwt_config, 1_059).unwrap();
    assert_eq!(claims.exp, 1_060);
}
