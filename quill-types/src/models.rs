use serde::{Deserialize, Serialize};

/// Form body sent to the vote endpoint. The payload is the activated
/// control's identifier, verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteForm {
    pub button: String,
}

impl VoteForm {
    pub fn new(button: impl Into<String>) -> Self {
        Self {
            button: button.into(),
        }
    }
}

/// Successful response from the vote endpoint.
///
/// `id` names the score display element to update and is produced by the
/// server; the client treats it verbatim and never derives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub id: String,
    pub new_score: i64,
}
