//! Item text acceptance policy.
//!
//! Submissions to the new-list and add-item forms pass their `item_text`
//! through an [`ItemTextPolicy`] before anything is written. The policy is
//! chosen at startup from configuration.

use crate::error::CoreError;

/// Message shown when a blank item is rejected.
pub const EMPTY_ITEM_ERROR: &str = "You can't have an empty list item";

/// Valid configuration strings for [`ItemTextPolicy::parse`].
const VALID_POLICY_STRINGS: &[&str] = &["accept_all", "reject_blank"];

/// How submitted item text is screened before an item is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemTextPolicy {
    /// Store whatever was submitted, including empty text.
    AcceptAll,
    /// Reject text that is empty or only whitespace.
    #[default]
    RejectBlank,
}

impl ItemTextPolicy {
    /// Return the policy as its configuration string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AcceptAll => "accept_all",
            Self::RejectBlank => "reject_blank",
        }
    }

    /// Parse a policy from its configuration string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim() {
            "accept_all" => Ok(Self::AcceptAll),
            "reject_blank" => Ok(Self::RejectBlank),
            other => Err(CoreError::Validation(format!(
                "Invalid item text policy '{other}'. Must be one of: {}",
                VALID_POLICY_STRINGS.join(", ")
            ))),
        }
    }

    /// Decide whether `text` may be stored as an item.
    pub fn validate(&self, text: &str) -> Result<(), CoreError> {
        match self {
            Self::AcceptAll => Ok(()),
            Self::RejectBlank if text.trim().is_empty() => {
                Err(CoreError::Validation(EMPTY_ITEM_ERROR.to_string()))
            }
            Self::RejectBlank => Ok(()),
        }
    }
}
