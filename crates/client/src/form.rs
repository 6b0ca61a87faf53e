//! Order form state machine.
//!
//! ```text
//! Idle ──submit──▶ Validating ──invalid──▶ Idle (errors shown)
//!                       │
//!                     valid
//!                       ▼
//!                  Submitting ──ok──▶ Succeeded (fields reset)
//!                       │
//!                     error
//!                       ▼
//!                    Failed (fields kept, may retry)
//! ```
//!
//! `Succeeded` and `Failed` behave like `Idle`: the visitor can edit and
//! submit again.

use moos_core::error::CoreError;
use moos_core::{validate, OrderField, OrderSubmission, ValidationReport};

use crate::sender::{OrderSender, SendError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Validation failed; nothing was sent.
    #[error("Order form is invalid: {} field(s) need attention", .0.error_count())]
    Invalid(ValidationReport),

    /// A previous submission has not finished yet.
    #[error("An order is already being submitted")]
    InProgress,

    /// The order was valid but could not be delivered.
    #[error(transparent)]
    Send(#[from] SendError),
}

/// Values, per-field errors, and phase of one visitor's order form.
#[derive(Debug, Clone)]
pub struct OrderForm {
    values: OrderSubmission,
    errors: ValidationReport,
    phase: FormPhase,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderForm {
    pub fn new() -> Self {
        Self {
            values: OrderSubmission::default(),
            errors: ValidationReport::default(),
            phase: FormPhase::Idle,
        }
    }

    pub fn values(&self) -> &OrderSubmission {
        &self.values
    }

    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Apply one edit. A changed value clears that field's error and only
    /// that one; nothing is re-validated until the next submit.
    pub fn set_field(&mut self, field: OrderField, value: impl Into<String>) -> bool {
        let changed = self.values.set(field, value);
        if changed {
            self.errors.clear(field);
        }
        changed
    }

    /// [`set_field`](Self::set_field) addressed by input name.
    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<bool, CoreError> {
        let field: OrderField = name.parse()?;
        Ok(self.set_field(field, value))
    }

    /// Re-run every rule and replace the error map.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.values);
        self.errors.is_valid()
    }

    /// Validate and, on success, enter `Submitting` and return the snapshot
    /// to send.
    pub fn begin_submit(&mut self) -> Result<OrderSubmission, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::InProgress);
        }

        self.phase = FormPhase::Validating;
        if !self.validate() {
            self.phase = FormPhase::Idle;
            return Err(SubmitError::Invalid(self.errors.clone()));
        }

        self.phase = FormPhase::Submitting;
        Ok(self.values.clone())
    }

    /// Leave `Submitting` with the result of the send.
    pub fn finish_submit(&mut self, result: Result<(), SendError>) -> Result<(), SubmitError> {
        match result {
            Ok(()) => {
                self.values = OrderSubmission::default();
                self.errors = ValidationReport::default();
                self.phase = FormPhase::Succeeded;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Order submission failed");
                self.phase = FormPhase::Failed;
                Err(SubmitError::Send(e))
            }
        }
    }

    /// Full submit cycle: validate, send once, settle.
    pub async fn submit<S>(&mut self, sender: &S) -> Result<(), SubmitError>
    where
        S: OrderSender + ?Sized,
    {
        let snapshot = self.begin_submit()?;
        let result = sender.send_order(&snapshot).await;
        self.finish_submit(result)
    }
}
