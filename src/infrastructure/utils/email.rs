use once_cell::sync::Lazy;
use regex::Regex;

/// Loose `something@something.something` shape used by the admin and
/// subscribe forms.
pub static LOOSE_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\S+@\S+\.\S+$").expect("valid loose email regex")
});

/// Stricter shape used by the contact form.
pub static CONTACT_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid contact email regex")
});

pub fn is_loose_email(value: &str) -> bool {
    LOOSE_EMAIL.is_match(value)
}

pub fn is_contact_email(value: &str) -> bool {
    CONTACT_EMAIL.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_shape_only_needs_at_and_dot() {
        assert!(is_loose_email("owner@site.dev"));
        assert!(is_loose_email("a@b.c"));
        assert!(!is_loose_email("owner@site"));
        assert!(!is_loose_email("owner site@x.y"));
    }

    #[test]
    fn contact_shape_wants_a_real_tld() {
        assert!(is_contact_email("Jane.Doe+hire@Example.COM"));
        assert!(!is_contact_email("a@b.c"));
        assert!(!is_contact_email("jane@example"));
    }
}
