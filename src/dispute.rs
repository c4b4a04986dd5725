//! Dispute Board Logic
//!
//! Filtering and paging of the dispute list, and compensation decision
//! validation. DOM-free so it can be unit tested.

use std::fmt;

use crate::models::{format_amount, Dispute, DisputeStatus};
use crate::pagination::Pager;

/// Minimum admin note length, counted after trimming
pub const MIN_NOTE_CHARS: usize = 10;

// ========================
// Filtering
// ========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisputeFilter {
    /// None = all statuses
    pub status: Option<DisputeStatus>,
    pub query: String,
}

impl DisputeFilter {
    /// Case-insensitive match on booking code, item title and party names
    pub fn matches(&self, dispute: &Dispute) -> bool {
        if let Some(status) = self.status {
            if dispute.status != status {
                return false;
            }
        }
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [
            &dispute.booking_code,
            &dispute.item_title,
            &dispute.renter_name,
            &dispute.owner_name,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Filter and page cursor for the dispute table.
/// Any filter mutation sends the cursor back to page 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisputeBoard {
    filter: DisputeFilter,
    pager: Pager,
}

impl DisputeBoard {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: DisputeFilter::default(),
            pager: Pager::new(page_size),
        }
    }

    pub fn filter(&self) -> &DisputeFilter {
        &self.filter
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn set_status(&mut self, status: Option<DisputeStatus>) {
        self.filter.status = status;
        self.pager.reset();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.pager.reset();
    }

    pub fn clear_filter(&mut self) {
        self.filter = DisputeFilter::default();
        self.pager.reset();
    }

    pub fn go_to(&mut self, page: usize) -> bool {
        self.pager.go_to(page)
    }

    /// Filtered list in server order; updates the pager's total
    pub fn apply<'a>(&mut self, disputes: &'a [Dispute]) -> Vec<&'a Dispute> {
        let filtered: Vec<&Dispute> = disputes.iter().filter(|d| self.filter.matches(d)).collect();
        self.pager.set_total(filtered.len());
        filtered
    }

    /// Rows on the current page
    pub fn visible(&mut self, disputes: &[Dispute]) -> Vec<Dispute> {
        let filtered = self.apply(disputes);
        self.pager.visible(&filtered).iter().map(|d| (*d).clone()).collect()
    }
}

// ========================
// Compensation Decision
// ========================

/// Decision kind chosen in the radio group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    ApproveFull,
    ApprovePartial,
    Reject,
}

impl DecisionKind {
    pub const ALL: [DecisionKind; 3] = [DecisionKind::ApproveFull, DecisionKind::ApprovePartial, DecisionKind::Reject];

    /// Posted form value
    pub fn value(self) -> &'static str {
        match self {
            DecisionKind::ApproveFull => "approve_full",
            DecisionKind::ApprovePartial => "approve_partial",
            DecisionKind::Reject => "reject",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DecisionKind::ApproveFull => "Approve full amount",
            DecisionKind::ApprovePartial => "Approve partial amount",
            DecisionKind::Reject => "Reject claim",
        }
    }
}

/// Validated decision
#[derive(Debug, Clone, PartialEq)]
pub enum CompensationDecision {
    ApproveFull { amount: f64 },
    ApprovePartial { amount: f64 },
    Reject,
}

impl CompensationDecision {
    pub fn amount(&self) -> f64 {
        match self {
            CompensationDecision::ApproveFull { amount } | CompensationDecision::ApprovePartial { amount } => *amount,
            CompensationDecision::Reject => 0.0,
        }
    }

    /// Text for the confirmation dialog
    pub fn confirm_message(&self, booking_code: &str) -> String {
        match self {
            CompensationDecision::Reject => format!("Reject the compensation claim for booking {}?", booking_code),
            _ => format!(
                "Approve compensation of {} for booking {}?",
                format_amount(self.amount()),
                booking_code
            ),
        }
    }
}

/// Raw form input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionInput {
    pub kind: Option<DecisionKind>,
    pub amount: String,
    pub note: String,
}

/// Reason a decision cannot be submitted. `Display` is the alert text.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionError {
    NoDecision,
    MissingAmount,
    NonPositiveAmount,
    AmountExceedsClaim { claimed: f64 },
    NoteTooShort,
}

impl fmt::Display for DecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionError::NoDecision => write!(f, "Please select a decision."),
            DecisionError::MissingAmount => write!(f, "Please enter a compensation amount."),
            DecisionError::NonPositiveAmount => write!(f, "Compensation amount must be greater than zero."),
            DecisionError::AmountExceedsClaim { claimed } => write!(
                f,
                "Compensation amount cannot exceed the claimed amount of {}.",
                format_amount(*claimed)
            ),
            DecisionError::NoteTooShort => write!(
                f,
                "Please provide a note of at least {} characters.",
                MIN_NOTE_CHARS
            ),
        }
    }
}

/// Validate form input against the dispute's claimed amount.
/// The first failing check wins.
pub fn validate_decision(input: &DecisionInput, claimed: f64) -> Result<CompensationDecision, DecisionError> {
    let kind = input.kind.ok_or(DecisionError::NoDecision)?;

    let decision = match kind {
        DecisionKind::ApproveFull => CompensationDecision::ApproveFull { amount: claimed },
        DecisionKind::Reject => CompensationDecision::Reject,
        DecisionKind::ApprovePartial => {
            let amount: f64 = input.amount.trim().replace(',', "")
                .parse()
                .ok()
                .filter(|a: &f64| a.is_finite())
                .ok_or(DecisionError::MissingAmount)?;
            if amount <= 0.0 {
                return Err(DecisionError::NonPositiveAmount);
            }
            if amount > claimed {
                return Err(DecisionError::AmountExceedsClaim { claimed });
            }
            CompensationDecision::ApprovePartial { amount }
        }
    };

    if input.note.trim().chars().count() < MIN_NOTE_CHARS {
        return Err(DecisionError::NoteTooShort);
    }
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_dispute(id: u32, status: DisputeStatus, renter: &str) -> Dispute {
        Dispute {
            id,
            booking_code: format!("BK-{:04}", id),
            item_title: format!("Item {}", id),
            renter_name: renter.to_string(),
            owner_name: "Owner".to_string(),
            claimed_amount: 100.0,
            status,
            created_at: "2024-05-01T09:30:00Z".to_string(),
            description: None,
        }
    }

    fn sample(n: u32) -> Vec<Dispute> {
        (1..=n)
            .map(|i| {
                let status = if i % 2 == 0 { DisputeStatus::Pending } else { DisputeStatus::Resolved };
                make_dispute(i, status, if i % 5 == 0 { "Alice Nguyen" } else { "Bob" })
            })
            .collect()
    }

    fn input(kind: Option<DecisionKind>, amount: &str, note: &str) -> DecisionInput {
        DecisionInput {
            kind,
            amount: amount.to_string(),
            note: note.to_string(),
        }
    }

    const NOTE: &str = "Damage confirmed by photos";

    #[test]
    fn test_filter_by_status_and_query() {
        let disputes = sample(20);
        let mut filter = DisputeFilter::default();
        assert!(disputes.iter().all(|d| filter.matches(d)));

        filter.status = Some(DisputeStatus::Pending);
        assert_eq!(disputes.iter().filter(|d| filter.matches(d)).count(), 10);

        filter.query = "  alice ".to_string();
        let ids: Vec<u32> = disputes.iter().filter(|d| filter.matches(d)).map(|d| d.id).collect();
        assert_eq!(ids, vec![10, 20]);

        filter.status = None;
        filter.query = "bk-0003".to_string();
        let ids: Vec<u32> = disputes.iter().filter(|d| filter.matches(d)).map(|d| d.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let disputes = sample(40);
        let mut board = DisputeBoard::new(8);
        board.apply(&disputes);
        assert!(board.go_to(4));

        board.set_query("bob");
        assert_eq!(board.pager().page(), 1);

        board.go_to(2);
        board.set_status(Some(DisputeStatus::Resolved));
        assert_eq!(board.pager().page(), 1);

        board.apply(&disputes);
        board.go_to(2);
        board.clear_filter();
        assert_eq!(board.pager().page(), 1);
    }

    #[test]
    fn test_board_visible_rows() {
        let disputes = sample(20);
        let mut board = DisputeBoard::new(8);
        assert_eq!(board.visible(&disputes).len(), 8);
        assert_eq!(board.pager().total_pages(), 3);

        board.go_to(3);
        let rows = board.visible(&disputes);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].id, 17);

        board.set_status(Some(DisputeStatus::Pending));
        let rows = board.visible(&disputes);
        assert_eq!(board.pager().total(), 10);
        assert_eq!(rows.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2, 4, 6, 8, 10, 12, 14, 16]);
    }

    #[test]
    fn test_board_empty_result() {
        let disputes = sample(5);
        let mut board = DisputeBoard::new(8);
        board.set_query("nobody matches this");
        assert!(board.visible(&disputes).is_empty());
        assert!(board.pager().controls(5).is_empty());
    }

    #[test]
    fn test_validate_requires_decision() {
        assert_eq!(validate_decision(&input(None, "", NOTE), 100.0), Err(DecisionError::NoDecision));
    }

    #[test]
    fn test_validate_partial_amounts() {
        let partial = Some(DecisionKind::ApprovePartial);
        assert_eq!(validate_decision(&input(partial, "", NOTE), 100.0), Err(DecisionError::MissingAmount));
        assert_eq!(validate_decision(&input(partial, "abc", NOTE), 100.0), Err(DecisionError::MissingAmount));
        assert_eq!(validate_decision(&input(partial, "0", NOTE), 100.0), Err(DecisionError::NonPositiveAmount));
        assert_eq!(validate_decision(&input(partial, "-5", NOTE), 100.0), Err(DecisionError::NonPositiveAmount));
        assert_eq!(
            validate_decision(&input(partial, "100.01", NOTE), 100.0),
            Err(DecisionError::AmountExceedsClaim { claimed: 100.0 })
        );
        assert_eq!(
            validate_decision(&input(partial, " 1,000 ", NOTE), 5000.0),
            Ok(CompensationDecision::ApprovePartial { amount: 1000.0 })
        );
    }

    #[test]
    fn test_validate_note_length() {
        let full = Some(DecisionKind::ApproveFull);
        assert_eq!(validate_decision(&input(full, "", "   short   "), 100.0), Err(DecisionError::NoteTooShort));
        assert_eq!(
            validate_decision(&input(full, "", NOTE), 250.0),
            Ok(CompensationDecision::ApproveFull { amount: 250.0 })
        );
        assert_eq!(
            validate_decision(&input(Some(DecisionKind::Reject), "999", NOTE), 100.0),
            Ok(CompensationDecision::Reject)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(DecisionError::NoDecision.to_string(), "Please select a decision.");
        assert_eq!(
            DecisionError::AmountExceedsClaim { claimed: 1500.0 }.to_string(),
            "Compensation amount cannot exceed the claimed amount of 1,500.00."
        );
        assert_eq!(
            DecisionError::NoteTooShort.to_string(),
            "Please provide a note of at least 10 characters."
        );
    }

    #[test]
    fn test_confirm_message() {
        let decision = CompensationDecision::ApprovePartial { amount: 1250.0 };
        assert_eq!(decision.confirm_message("BK-0001"), "Approve compensation of 1,250.00 for booking BK-0001?");
        assert_eq!(
            CompensationDecision::Reject.confirm_message("BK-0002"),
            "Reject the compensation claim for booking BK-0002?"
        );
    }
}
