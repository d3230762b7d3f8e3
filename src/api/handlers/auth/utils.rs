use axum::http::{HeaderMap, header::AUTHORIZATION};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::SystemTime;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 128;

static EMAIL_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$"));

static USERNAME_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$"));

/// Lightweight email sanity check applied before persisting accounts.
pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_ok_and(|re| re.is_match(email))
}

pub fn valid_username(username: &str) -> bool {
    let len = username.chars().count();
    (USERNAME_MIN..=USERNAME_MAX).contains(&len)
        && USERNAME_RE.as_ref().is_ok_and(|re| re.is_match(username))
}

pub fn valid_password(password: &str) -> bool {
    let len = password.chars().count();
    (PASSWORD_MIN..=PASSWORD_MAX).contains(&len)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn normalize_username(username: &str) -> String {
    username.trim().to_string()
}

/// Read `Authorization: Bearer <token>`; the scheme is matched case-insensitively.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

pub fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(value) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    #[test]
    fn email_validation() {
        assert!(valid_email("user1@example.com"));
        assert!(!valid_email("user1example.com"));
        assert!(!valid_email("user 1@example.com"));
        assert!(!valid_email("user1@example"));
    }

    #[test]
    fn username_validation() {
        assert!(valid_username("user1"));
        assert!(valid_username("first.last-2_x"));
        assert!(!valid_username("ab"));
        assert!(!valid_username("has space"));
        assert!(!valid_username(&"a".repeat(51)));
    }

    #[test]
    fn password_length_bounds() {
        assert!(valid_password("password123"));
        assert!(!valid_password("short"));
        assert!(!valid_password(&"x".repeat(129)));
    }

    #[test]
    fn normalizes_identifiers() {
        assert_eq!(normalize_email("  User1@Example.COM "), "user1@example.com");
        assert_eq!(normalize_username("  user1 "), "user1");
    }

    #[test]
    fn bearer_token_extraction() {
        assert_eq!(
            extract_bearer_token(&headers_with("Bearer abc.def")),
            Some("abc.def".to_string())
        );
        assert_eq!(
            extract_bearer_token(&headers_with("bearer abc")),
            Some("abc".to_string())
        );
        assert_eq!(extract_bearer_token(&headers_with("Basic abc")), None);
        assert_eq!(extract_bearer_token(&headers_with("Bearer   ")), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }
}
