// Contact Desk
// Inquiry intake: validate, guard against double submission, dispatch
// through an injectable gateway

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

use crate::validate::{validate_contact, ValidationError};

/// Shown when the gateway fails; no retry is attempted.
pub const FAILURE_NOTICE: &str = "Failed to send message. Please try again.";

/// Shown after a successful dispatch.
pub const SUCCESS_NOTICE: &str =
    "Thank you for your message! We'll get back to you within 24 hours.";

// ============================================================================
// MESSAGE & RECEIPT
// ============================================================================

/// An inquiry submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Proof of dispatch for a sent inquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Stable inquiry identity
    pub inquiry_id: String,

    /// When the gateway accepted the message
    pub received_at: DateTime<Utc>,
}

impl Receipt {
    pub fn new() -> Self {
        Receipt {
            inquiry_id: uuid::Uuid::new_v4().to_string(),
            received_at: Utc::now(),
        }
    }
}

impl Default for Receipt {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// GATEWAY
// ============================================================================

/// Capability for delivering a contact message.
///
/// The real backend does not exist yet; production wires in
/// [`SimulatedGateway`], tests substitute deterministic fakes.
pub trait ContactGateway {
    fn send(&self, msg: &ContactMessage) -> Result<Receipt>;
}

/// Stand-in for the future submission endpoint: blocks for a fixed delay,
/// then accepts the message. The delay always completes; there is no
/// cancellation.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        SimulatedGateway { delay }
    }
}

impl Default for SimulatedGateway {
    /// The production stand-in waits one second, like a slow network call
    fn default() -> Self {
        SimulatedGateway::new(Duration::from_secs(1))
    }
}

impl ContactGateway for SimulatedGateway {
    fn send(&self, _msg: &ContactMessage) -> Result<Receipt> {
        thread::sleep(self.delay);
        Ok(Receipt::new())
    }
}

// ============================================================================
// CONTACT DESK
// ============================================================================

/// Result of one submission attempt, mapped to user-facing notices.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was dispatched
    Invalid(Vec<ValidationError>),
    /// Dispatched and accepted
    Sent(Receipt),
    /// Gateway failed; show [`FAILURE_NOTICE`]
    Failed,
    /// A submission is already in flight; nothing was dispatched
    Busy,
}

impl SubmitOutcome {
    /// The notice to surface to the user, if any
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            SubmitOutcome::Sent(_) => Some(SUCCESS_NOTICE),
            SubmitOutcome::Failed => Some(FAILURE_NOTICE),
            _ => None,
        }
    }
}

/// Front desk for inquiries. Owns the submit flow: validate first, refuse
/// re-entrant submission while a dispatch is in flight, then hand the
/// message to the gateway.
pub struct ContactDesk<G: ContactGateway> {
    gateway: G,
    in_flight: bool,
}

impl<G: ContactGateway> ContactDesk<G> {
    pub fn new(gateway: G) -> Self {
        ContactDesk {
            gateway,
            in_flight: false,
        }
    }

    /// Whether a submission is currently being dispatched. UIs disable the
    /// submit control while this is true.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Validate and dispatch one message.
    pub fn submit(&mut self, msg: &ContactMessage) -> SubmitOutcome {
        if self.in_flight {
            return SubmitOutcome::Busy;
        }

        if let Err(errors) = validate_contact(msg) {
            return SubmitOutcome::Invalid(errors);
        }

        self.in_flight = true;
        let result = self.gateway.send(msg);
        self.in_flight = false;

        match result {
            Ok(receipt) => SubmitOutcome::Sent(receipt),
            Err(_) => SubmitOutcome::Failed,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::RefCell;

    /// Records every dispatched message instead of sending anything.
    struct RecordingGateway {
        sent: RefCell<Vec<ContactMessage>>,
    }

    impl RecordingGateway {
        fn new() -> Self {
            RecordingGateway {
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl ContactGateway for RecordingGateway {
        fn send(&self, msg: &ContactMessage) -> Result<Receipt> {
            self.sent.borrow_mut().push(msg.clone());
            Ok(Receipt::new())
        }
    }

    /// Always fails, like an unreachable endpoint.
    struct FailingGateway;

    impl ContactGateway for FailingGateway {
        fn send(&self, _msg: &ContactMessage) -> Result<Receipt> {
            bail!("connection refused")
        }
    }

    fn valid_message() -> ContactMessage {
        ContactMessage {
            name: "Jordan Reyes".to_string(),
            email: "user@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            message: "I'd like to book a viewing for the Maple Street house.".to_string(),
        }
    }

    #[test]
    fn test_valid_message_dispatches_once() {
        let mut desk = ContactDesk::new(RecordingGateway::new());

        let outcome = desk.submit(&valid_message());

        assert!(matches!(outcome, SubmitOutcome::Sent(_)));
        assert_eq!(outcome.notice(), Some(SUCCESS_NOTICE));
        assert_eq!(desk.gateway.sent.borrow().len(), 1);
        assert!(!desk.is_busy());
    }

    #[test]
    fn test_invalid_message_is_not_dispatched() {
        let mut desk = ContactDesk::new(RecordingGateway::new());

        let msg = ContactMessage {
            name: String::new(),
            ..valid_message()
        };
        let outcome = desk.submit(&msg);

        match outcome {
            SubmitOutcome::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "name");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert!(desk.gateway.sent.borrow().is_empty());
    }

    #[test]
    fn test_gateway_failure_surfaces_generic_notice() {
        let mut desk = ContactDesk::new(FailingGateway);

        let outcome = desk.submit(&valid_message());

        assert!(matches!(outcome, SubmitOutcome::Failed));
        assert_eq!(outcome.notice(), Some(FAILURE_NOTICE));
        // The desk recovers; a later attempt is allowed
        assert!(!desk.is_busy());
    }

    #[test]
    fn test_submit_while_in_flight_is_refused() {
        let mut desk = ContactDesk::new(RecordingGateway::new());

        // A second click landing while the first send is still running
        desk.in_flight = true;
        let outcome = desk.submit(&valid_message());

        assert!(matches!(outcome, SubmitOutcome::Busy));
        assert!(desk.gateway.sent.borrow().is_empty());

        desk.in_flight = false;
        assert!(matches!(desk.submit(&valid_message()), SubmitOutcome::Sent(_)));
        assert_eq!(desk.gateway.sent.borrow().len(), 1);
    }

    #[test]
    fn test_simulated_gateway_accepts_after_delay() {
        let gateway = SimulatedGateway::new(Duration::ZERO);
        let receipt = gateway.send(&valid_message()).unwrap();
        assert!(!receipt.inquiry_id.is_empty());
    }

    #[test]
    fn test_receipts_have_distinct_ids() {
        assert_ne!(Receipt::new().inquiry_id, Receipt::new().inquiry_id);
    }
}
