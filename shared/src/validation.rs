//! Input validation functions
//!
//! Validation rules applied at the API boundary before any credential
//! work happens. Kept in the shared crate so clients can apply the same
//! rules before submitting.

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    // Basic email regex check
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate username shape
///
/// Usernames are case-sensitive and compared byte-for-byte, so the only
/// rules here are length and charset.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }
    if username.len() > 32 {
        return Err("Username too long".to_string());
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
    {
        return Err("Username may only contain letters, digits, '_', '.' and '-'".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@x.com")]
    #[case("user.name+tag@example.co.uk")]
    #[case("a_b@sub.domain.org")]
    fn test_valid_emails(#[case] email: &str) {
        assert!(validate_email(email).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("not-an-email")]
    #[case("missing@tld")]
    #[case("two words@x.com")]
    #[case("@x.com")]
    fn test_invalid_emails(#[case] email: &str) {
        assert!(validate_email(email).is_err());
    }

    #[rstest]
    #[case("alice")]
    #[case("a.b-c_d")]
    #[case("abc")]
    fn test_valid_usernames(#[case] username: &str) {
        assert!(validate_username(username).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("ab")]
    #[case("has space")]
    #[case("exclaim!")]
    fn test_invalid_usernames(#[case] username: &str) {
        assert!(validate_username(username).is_err());
    }

    #[test]
    fn test_username_length_limit() {
        let long = "a".repeat(33);
        assert!(validate_username(&long).is_err());
        let max = "a".repeat(32);
        assert!(validate_username(&max).is_ok());
    }

    #[rstest]
    #[case("Secret1!")]
    #[case("longenough")]
    fn test_valid_passwords(#[case] password: &str) {
        assert!(validate_password(password).is_ok());
    }

    #[test]
    fn test_password_too_short() {
        assert!(validate_password("1234567").is_err());
    }

    #[test]
    fn test_password_too_long() {
        let long = "a".repeat(129);
        assert!(validate_password(&long).is_err());
    }
}
