use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 姓名允许字母（含重音）、空格、连字符与撇号
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}][\p{L} '\-]*$").expect("Invalid name regex"));

const MAX_NAME_LEN: usize = 50;
const MAX_SUBJECT_LEN: usize = 100;
const MAX_COMMENT_LEN: usize = 2000;

const WEAK_PASSWORDS: [&str; 8] = [
    "password",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "password1",
    "abcd1234",
    "linklearn1",
];

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name must not be empty");
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err("Name must be at most 50 characters");
    }
    if !NAME_RE.is_match(name) {
        return Err("Name may only contain letters, spaces, hyphens or apostrophes");
    }
    Ok(())
}

pub fn validate_subject_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Subject name must not be empty");
    }
    if name.chars().count() > MAX_SUBJECT_LEN {
        return Err("Subject name must be at most 100 characters");
    }
    Ok(())
}

/// 评论正文与评论者姓名均为必填
pub fn validate_comment(
    comment: Option<&str>,
    commenter: Option<&str>,
) -> Result<(), &'static str> {
    let comment = comment.map(str::trim).unwrap_or_default();
    let commenter = commenter.map(str::trim).unwrap_or_default();
    if comment.is_empty() || commenter.is_empty() {
        return Err("Comment text and commenter name are required");
    }
    if comment.chars().count() > MAX_COMMENT_LEN {
        return Err("Comment must be at most 2000 characters");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 密码策略：至少 8 位，同时包含大写、小写字母和数字，且不在常见弱密码表中
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let checks: [(bool, &'static str); 4] = [
        (
            password.chars().count() >= 8,
            "Password must be at least 8 characters long",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain at least one uppercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain at least one lowercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain at least one digit",
        ),
    ];

    let mut errors: Vec<&'static str> = checks
        .iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, msg)| *msg)
        .collect();

    if WEAK_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecurePass123").is_valid);
        assert!(validate_password("Tut0ringRocks").is_valid);
    }

    #[test]
    fn test_password_collects_every_failure() {
        let result = validate_password("abc");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
        assert!(validate_password_simple("abc").is_err());
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Password is too common, please choose a stronger password"]
        );
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("ana.perez@example.com").is_ok());
        assert!(validate_email("ana@example").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_name_rules() {
        assert!(validate_name("María José").is_ok());
        assert!(validate_name("O'Neil-Smith").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("R2D2").is_err());
        assert!(validate_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_comment_required_fields() {
        assert!(validate_comment(Some("Great class"), Some("Ana")).is_ok());
        assert!(validate_comment(None, Some("Ana")).is_err());
        assert!(validate_comment(Some("Great class"), Some("  ")).is_err());
    }
}
