use super::*;

// =============================================================
// contact fields
// =============================================================

#[test]
fn email_is_optional_but_must_be_well_formed() {
    assert_eq!(validate_email(""), Ok(()));
    assert_eq!(validate_email("awa@ecole.gn"), Ok(()));
    assert!(validate_email("awa@ecole").is_err());
    assert!(validate_email("a wa@ecole.gn").is_err());
}

#[test]
fn phone_requires_guinea_prefix_and_nine_digits() {
    assert_eq!(validate_phone(""), Ok(()));
    assert_eq!(validate_phone("+224621000000"), Ok(()));
    assert!(validate_phone("+22462100000").is_err());
    assert!(validate_phone("621000000").is_err());
}

#[test]
fn at_least_one_contact() {
    assert!(validate_at_least_one_contact("", "").is_err());
    assert_eq!(validate_at_least_one_contact("a@b.co", ""), Ok(()));
    assert_eq!(validate_at_least_one_contact("", "+224621000000"), Ok(()));
}

// =============================================================
// password
// =============================================================

#[test]
fn password_rules_report_first_failure() {
    assert_eq!(validate_password(""), Err("Password is required".to_owned()));
    assert_eq!(validate_password("Ab1"), Err("Password must be at least 8 characters".to_owned()));
    assert_eq!(validate_password("abcdefg1"), Err("Password must contain at least one uppercase letter".to_owned()));
    assert_eq!(validate_password("ABCDEFG1"), Err("Password must contain at least one lowercase letter".to_owned()));
    assert_eq!(validate_password("Abcdefgh"), Err("Password must contain at least one number".to_owned()));
    assert_eq!(validate_password("Abcdefg1"), Ok(()));
}

#[test]
fn password_confirmation() {
    assert_eq!(validate_password_match("x", ""), Err("Please confirm your password".to_owned()));
    assert_eq!(validate_password_match("x", "y"), Err("Passwords do not match".to_owned()));
    assert_eq!(validate_password_match("x", "x"), Ok(()));
}

#[test]
fn required_field_names_itself() {
    assert_eq!(validate_required("  ", "First name"), Err("First name is required".to_owned()));
    assert_eq!(validate_required("Awa", "First name"), Ok(()));
}

#[test]
fn strength_levels_follow_score_bands() {
    let empty = password_strength("");
    assert_eq!((empty.score, empty.level), (0, StrengthLevel::Weak));

    let short = password_strength("abc");
    assert_eq!(short.score, 15);
    assert!(short.feedback.contains(&"Use at least 8 characters"));

    let fair = password_strength("abcdefgh");
    assert_eq!((fair.score, fair.level), (35, StrengthLevel::Weak));

    let good = password_strength("Abcdefg1");
    assert_eq!((good.score, good.level), (65, StrengthLevel::Good));

    let strong = password_strength("Abcdefghijk1!xyz");
    assert_eq!((strong.score, strong.level), (100, StrengthLevel::Strong));
    assert!(strong.feedback.contains(&"Great! You used special characters"));
}

#[test]
fn strength_level_names() {
    assert_eq!(StrengthLevel::Fair.as_str(), "fair");
    assert_eq!(password_strength("abcdefgH").level, StrengthLevel::Fair);
}

// =============================================================
// formatting
// =============================================================

#[test]
fn phone_formatting_adds_prefix_and_caps_length() {
    assert_eq!(format_phone_number("621 00 00 00"), "+224621000000");
    assert_eq!(format_phone_number("+224 621-000-000 99"), "+224621000000");
    assert_eq!(format_phone_number("2246"), "+2246");
    assert_eq!(format_phone_number("+"), "+");
    assert_eq!(format_phone_number(""), "");
}

#[test]
fn trimmed_strips_whitespace() {
    assert_eq!(trimmed("  awa@ecole.gn \n"), "awa@ecole.gn");
}

#[test]
fn patterns_compile() {
    assert!(EMAIL_RE.is_some());
    assert!(PHONE_RE.is_some());
}
