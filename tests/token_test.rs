use chrono::{Duration, TimeZone, Utc};
use wspotify::auth::Token;

fn token_created_at(seconds: i64) -> Token {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    Token::new("access", seconds).with_created_at(created_at)
}

#[test]
fn test_token_valid_before_expiry() {
    let token = token_created_at(3600);
    let expiry = token.created_at + Duration::seconds(3600);

    assert!(token.valid_at(token.created_at));
    assert!(token.valid_at(expiry - Duration::milliseconds(1)));
    assert!(token.valid_at(expiry - Duration::seconds(1)));
}

#[test]
fn test_token_invalid_at_and_after_expiry() {
    let token = token_created_at(3600);
    let expiry = token.created_at + Duration::seconds(3600);

    assert_eq!(token.expires_at(), Some(expiry));
    assert!(!token.valid_at(expiry));
    assert!(!token.valid_at(expiry + Duration::seconds(1)));
}

#[test]
fn test_token_with_zero_lifetime_is_never_valid() {
    let token = token_created_at(0);
    assert!(!token.valid_at(token.created_at));
}

#[test]
fn test_fresh_token_is_valid() {
    assert!(Token::new("access", 3600).valid());
    assert!(!Token::new("access", 3600)
        .with_created_at(Utc::now() - Duration::hours(2))
        .valid());
}

#[test]
fn test_token_deserializes_token_endpoint_response() {
    let before = Utc::now();
    let token: Token = serde_json::from_str(
        r#"{
            "access_token": "NgCXRK...MzYjw",
            "token_type": "Bearer",
            "scope": "user-read-private user-read-email",
            "expires_in": 3600,
            "refresh_token": "NgAagA...Um_SHo"
        }"#,
    )
    .unwrap();

    assert_eq!(token.access_token, "NgCXRK...MzYjw");
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.refresh_token.as_deref(), Some("NgAagA...Um_SHo"));
    assert!(token.created_at >= before);
    assert!(token.valid());
}

#[test]
fn test_token_without_refresh_token() {
    let token: Token = serde_json::from_str(
        r#"{"access_token": "abc", "token_type": "bearer", "expires_in": 3600}"#,
    )
    .unwrap();

    assert!(token.refresh_token.is_none());
    assert!(token.scope.is_none());
}

#[test]
fn test_token_with_out_of_range_lifetime() {
    let token: Token = serde_json::from_str(
        r#"{"access_token": "a", "token_type": "Bearer", "expires_in": 9223372036854775807}"#,
    )
    .unwrap();

    assert!(token.expires_at().is_none());
    assert!(token.valid());

    let token = Token::new("a", i64::MIN);
    assert!(token.expires_at().is_none());
    assert!(!token.valid());
}

#[test]
fn test_token_expiring_past_the_calendar_range() {
    // representable as a duration, but the sum overflows the date range
    let token = Token::new("a", i64::MAX / 1000);
    assert!(token.expires_at().is_none());
    assert!(token.valid());
}
