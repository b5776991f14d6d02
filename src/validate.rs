// Boundary Validation
// Collected, human-readable validation for contact messages and listing imports

use crate::catalog::Listing;
use crate::contact::ContactMessage;

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub context: String,
}

impl ValidationError {
    fn new(context: &str, field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.into(),
            context: context.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.context, self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// All failures are collected before reporting; validation never stops at
/// the first problem.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

// ============================================================================
// FIELD VALIDATORS
// ============================================================================

/// RFC-light email check: one "@" separating a non-empty local part from a
/// domain that contains a dot with non-empty labels. No whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };

    if local.is_empty() || domain.is_empty() {
        return false;
    }

    // Domain needs at least one dot with something on both sides
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Phone check after stripping spaces, dashes and parentheses:
/// optional leading "+", then 1-16 digits with a nonzero first digit.
pub fn is_valid_phone(phone: &str) -> bool {
    let stripped: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    let digits = stripped.strip_prefix('+').unwrap_or(&stripped);

    if digits.is_empty() || digits.len() > 16 {
        return false;
    }

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    // Leading zero is not a dialable number
    !digits.starts_with('0')
}

// ============================================================================
// CONTACT VALIDATION
// ============================================================================

/// Validate a contact message, collecting every failure.
pub fn validate_contact(msg: &ContactMessage) -> ValidationResult {
    let mut errors = Vec::new();

    if msg.name.trim().len() < 2 {
        errors.push(ValidationError::new(
            "Contact",
            "name",
            "Name must be at least 2 characters long",
        ));
    }

    if !is_valid_email(&msg.email) {
        errors.push(ValidationError::new(
            "Contact",
            "email",
            "Please enter a valid email address",
        ));
    }

    if !is_valid_phone(&msg.phone) {
        errors.push(ValidationError::new(
            "Contact",
            "phone",
            "Please enter a valid phone number",
        ));
    }

    if msg.message.trim().len() < 10 {
        errors.push(ValidationError::new(
            "Contact",
            "message",
            "Message must be at least 10 characters long",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// LISTING VALIDATION
// ============================================================================

/// Validate a listing record at the import boundary.
pub fn validate_listing(listing: &Listing) -> ValidationResult {
    let mut errors = Vec::new();

    if listing.address.trim().is_empty() {
        errors.push(ValidationError::new(
            "Listing",
            "address",
            "Required field is empty",
        ));
    }

    if listing.neighborhood.trim().is_empty() {
        errors.push(ValidationError::new(
            "Listing",
            "neighborhood",
            "Required field is empty",
        ));
    }

    if listing.property_type.trim().is_empty() {
        errors.push(ValidationError::new(
            "Listing",
            "type",
            "Required field is empty",
        ));
    }

    if listing.price < 0.0 || listing.price.is_nan() {
        errors.push(ValidationError::new(
            "Listing",
            "price",
            format!("Must be a non-negative amount, got {}", listing.price),
        ));
    }

    if listing.sqft == 0 {
        errors.push(ValidationError::new(
            "Listing",
            "sqft",
            "Must be greater than zero",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_listings;

    fn valid_message() -> ContactMessage {
        ContactMessage {
            name: "Jordan Reyes".to_string(),
            email: "user@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            message: "I'd like to book a viewing for the Maple Street house.".to_string(),
        }
    }

    #[test]
    fn test_email_accepts_plain_address() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@mail.example.org"));
    }

    #[test]
    fn test_email_rejects_malformed() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[test]
    fn test_phone_accepts_formatted_numbers() {
        assert!(is_valid_phone("+1 (555) 123-4567"));
        assert!(is_valid_phone("5551234567"));
        assert!(is_valid_phone("+442071234567"));
    }

    #[test]
    fn test_phone_rejects_malformed() {
        assert!(!is_valid_phone("abc"));
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("+"));
        assert!(!is_valid_phone("0555123456"));
        assert!(!is_valid_phone("12345678901234567")); // 17 digits
        assert!(!is_valid_phone("555-123-456x"));
    }

    #[test]
    fn test_valid_contact_passes() {
        assert!(validate_contact(&valid_message()).is_ok());
    }

    #[test]
    fn test_contact_errors_are_collected() {
        let msg = ContactMessage {
            name: "J".to_string(),
            email: "not-an-email".to_string(),
            phone: "abc".to_string(),
            message: "too short".to_string(),
        };

        let errors = validate_contact(&msg).unwrap_err();
        assert_eq!(errors.len(), 4);

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "phone", "message"]);
        assert_eq!(errors[0].message, "Name must be at least 2 characters long");
    }

    #[test]
    fn test_whitespace_name_is_rejected() {
        let mut msg = valid_message();
        msg.name = "  a  ".to_string();

        let errors = validate_contact(&msg).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "name"));
    }

    #[test]
    fn test_sample_listings_validate() {
        for listing in sample_listings() {
            assert!(validate_listing(&listing).is_ok());
        }
    }

    #[test]
    fn test_listing_validation_collects_errors() {
        let mut listing = sample_listings()[0].clone();
        listing.address = String::new();
        listing.price = -1.0;
        listing.sqft = 0;

        let errors = validate_listing(&listing).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "price"));
    }
}
