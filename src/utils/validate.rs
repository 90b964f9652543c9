use once_cell::sync::Lazy;
use regex::Regex;

static COURSE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").expect("Invalid course code regex"));

pub fn validate_course_code(code: &str) -> Result<(), &'static str> {
    // 课程代码长度校验：2 <= x <= 32
    if code.len() < 2 || code.len() > 32 {
        return Err("Course code length must be between 2 and 32 characters");
    }
    // 课程代码格式校验：字母或数字开头，只能包含字母、数字、下划线、点或连字符
    if !COURSE_CODE_RE.is_match(code) {
        return Err(
            "Course code must start with a letter or digit and contain only letters, numbers, underscores, dots or hyphens",
        );
    }
    Ok(())
}

pub fn validate_course_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Course name must not be empty");
    }
    if trimmed.chars().count() > 128 {
        return Err("Course name must not exceed 128 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_course_codes() {
        assert!(validate_course_code("ALG-101").is_ok());
        assert!(validate_course_code("ielts_2030.spring").is_ok());
        assert!(validate_course_code("7A").is_ok());
    }

    #[test]
    fn test_invalid_course_codes() {
        assert!(validate_course_code("A").is_err());
        assert!(validate_course_code("-ALG").is_err());
        assert!(validate_course_code("ALG 101").is_err());
        assert!(validate_course_code(&"A".repeat(33)).is_err());
    }

    #[test]
    fn test_course_name() {
        assert!(validate_course_name("Algebra I").is_ok());
        assert!(validate_course_name("   ").is_err());
        assert!(validate_course_name(&"数".repeat(129)).is_err());
        assert!(validate_course_name(&"数".repeat(128)).is_ok());
    }
}
