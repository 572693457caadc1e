use serde::{Deserialize, Serialize};

use crate::enums::VoteDirection;

/// A vote control: the direction and the post the vote applies to.
///
/// Rendered into the page as `{up|down}vote_{post_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteTarget {
    pub direction: VoteDirection,
    pub post_id: i64,
}

impl VoteTarget {
    /// The element identifier this target renders to, which is also the
    /// payload the vote endpoint expects verbatim.
    pub fn control_id(&self) -> String {
        format!("{}vote_{}", self.direction.as_str(), self.post_id)
    }

    pub fn parse(id: &str) -> Option<Self> {
        let (direction, rest) = if let Some(rest) = id.strip_prefix("upvote_") {
            (VoteDirection::Up, rest)
        } else if let Some(rest) = id.strip_prefix("downvote_") {
            (VoteDirection::Down, rest)
        } else {
            return None;
        };
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            direction,
            post_id: rest.parse().ok()?,
        })
    }
}

/// The entity a collapsible comment form hangs off: the question itself or a
/// specific answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentAnchor {
    Question,
    Answer(i64),
}

impl CommentAnchor {
    /// Parses the tag suffix shared by post and hide controls.
    ///
    /// Both template generations are accepted: the underscored spelling
    /// (`_question`, `_A_7`) and the compact one (`Q`, `A_7`, `A7`).
    fn parse_tag(tag: &str) -> Option<Self> {
        let tag = tag.strip_prefix('_').unwrap_or(tag);
        if tag == "question" || tag == "Q" {
            return Some(CommentAnchor::Question);
        }
        let rest = tag.strip_prefix('A')?;
        let digits = rest.strip_prefix('_').unwrap_or(rest);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(CommentAnchor::Answer(digits.parse().ok()?))
    }

    fn canonical_tag(&self) -> String {
        match self {
            CommentAnchor::Question => "_question".to_string(),
            CommentAnchor::Answer(id) => format!("_A_{}", id),
        }
    }

    fn compact_tag(&self) -> String {
        match self {
            CommentAnchor::Question => "Q".to_string(),
            CommentAnchor::Answer(id) => format!("A_{}", id),
        }
    }

    /// Identifier of the collapsible form container for this anchor.
    pub fn container_id(&self) -> String {
        match self {
            CommentAnchor::Question => "comment_form_question".to_string(),
            CommentAnchor::Answer(id) => format!("comment_form_answer_{}", id),
        }
    }

    /// Identifier of the control that expands the form.
    pub fn post_control_id(&self) -> String {
        format!("postC{}", self.canonical_tag())
    }

    /// Identifier of the control that collapses the form again.
    pub fn hide_control_id(&self) -> String {
        format!("hideC{}", self.canonical_tag())
    }

    /// Both spellings a template generation may have used for the post
    /// control, canonical first. Useful when toggling whichever one is
    /// actually on the page.
    pub fn post_control_spellings(&self) -> [String; 2] {
        [
            self.post_control_id(),
            format!("postC{}", self.compact_tag()),
        ]
    }

    /// Both spellings of the hide control, canonical first.
    pub fn hide_control_spellings(&self) -> [String; 2] {
        [
            self.hide_control_id(),
            format!("hideC{}", self.compact_tag()),
        ]
    }

    fn parse_container(id: &str) -> Option<Self> {
        let rest = id.strip_prefix("comment_form_")?;
        if rest == "question" {
            return Some(CommentAnchor::Question);
        }
        let digits = rest.strip_prefix("answer_")?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(CommentAnchor::Answer(digits.parse().ok()?))
    }
}

/// What a pending submission will be attached to.
///
/// Derived from a reply-control identifier on every activation, never stored
/// persistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplyTarget {
    /// An answer being posted to the question on the page.
    Question,
    /// An answer-style reply attached to a specific answer.
    Answer(i64),
    CommentOnQuestion,
    CommentOnAnswer(i64),
}

impl ReplyTarget {
    /// Parses the portion of a reply-control identifier after the `post`
    /// prefix: `A…` for answers, `C…` for comments.
    fn parse_suffix(suffix: &str) -> Option<Self> {
        match suffix.as_bytes().first()? {
            b'A' => {
                let tag = &suffix[1..];
                let tag = tag.strip_prefix('_').unwrap_or(tag);
                if !tag.is_empty() && tag.bytes().all(|b| b.is_ascii_digit()) {
                    Some(ReplyTarget::Answer(tag.parse().ok()?))
                } else {
                    // Any other suffix (`Q`, `question`, legacy decorations)
                    // answers the question on the page.
                    Some(ReplyTarget::Question)
                }
            }
            b'C' => match CommentAnchor::parse_tag(&suffix[1..])? {
                CommentAnchor::Question => Some(ReplyTarget::CommentOnQuestion),
                CommentAnchor::Answer(id) => Some(ReplyTarget::CommentOnAnswer(id)),
            },
            _ => None,
        }
    }

    /// Canonical reply-control identifier for this target.
    pub fn control_id(&self) -> String {
        match self {
            ReplyTarget::Question => "postA_question".to_string(),
            ReplyTarget::Answer(id) => format!("postA_{}", id),
            ReplyTarget::CommentOnQuestion => "postC_question".to_string(),
            ReplyTarget::CommentOnAnswer(id) => format!("postC_A_{}", id),
        }
    }

    /// Name the shared submit control is bound to for this target. The
    /// backend selects its form handler off this value.
    pub fn form_name(&self) -> String {
        match self {
            ReplyTarget::Question | ReplyTarget::Answer(_) => "answer_form".to_string(),
            ReplyTarget::CommentOnQuestion => "comment_form_question".to_string(),
            ReplyTarget::CommentOnAnswer(id) => format!("comment_form_answer_{}", id),
        }
    }

    /// Identifier of the element holding the content shown in the compose
    /// preview for this target.
    pub fn content_source_id(&self) -> String {
        match self {
            ReplyTarget::Question | ReplyTarget::CommentOnQuestion => {
                "content_question".to_string()
            }
            ReplyTarget::Answer(id) | ReplyTarget::CommentOnAnswer(id) => {
                format!("content_answer_{}", id)
            }
        }
    }

    /// Whether the question title is echoed above the preview. Answer-scoped
    /// comments clear it instead.
    pub fn shows_question_title(&self) -> bool {
        matches!(self, ReplyTarget::Question | ReplyTarget::CommentOnQuestion)
    }

    /// Heading shown on the compose modal.
    pub fn modal_heading(&self) -> &'static str {
        match self {
            ReplyTarget::Question | ReplyTarget::Answer(_) => "Posting Answer",
            ReplyTarget::CommentOnQuestion | ReplyTarget::CommentOnAnswer(_) => "Posting Comment",
        }
    }

    /// The comment-form container this target composes into, if any.
    pub fn comment_anchor(&self) -> Option<CommentAnchor> {
        match self {
            ReplyTarget::CommentOnQuestion => Some(CommentAnchor::Question),
            ReplyTarget::CommentOnAnswer(id) => Some(CommentAnchor::Answer(*id)),
            ReplyTarget::Question | ReplyTarget::Answer(_) => None,
        }
    }
}

/// The parsed form of any bindable element identifier on the page.
///
/// `Control::parse` is the single home of the identifier grammar: every
/// behavior the controller attaches dispatches over this enum instead of
/// re-inspecting identifier strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Vote(VoteTarget),
    Reply(ReplyTarget),
    HideComment(CommentAnchor),
    CommentForm(CommentAnchor),
}

impl Control {
    /// Parses an element identifier. Returns `None` for identifiers outside
    /// the grammar; the caller decides whether that is a skip (binding scan)
    /// or a template defect (direct activation).
    pub fn parse(id: &str) -> Option<Self> {
        if let Some(target) = VoteTarget::parse(id) {
            return Some(Control::Vote(target));
        }
        if let Some(tag) = id.strip_prefix("hideC") {
            return Some(Control::HideComment(CommentAnchor::parse_tag(tag)?));
        }
        if let Some(suffix) = id.strip_prefix("post") {
            return Some(Control::Reply(ReplyTarget::parse_suffix(suffix)?));
        }
        if let Some(anchor) = CommentAnchor::parse_container(id) {
            return Some(Control::CommentForm(anchor));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vote_controls() {
        assert_eq!(
            Control::parse("upvote_42"),
            Some(Control::Vote(VoteTarget {
                direction: VoteDirection::Up,
                post_id: 42,
            }))
        );
        assert_eq!(
            Control::parse("downvote_7"),
            Some(Control::Vote(VoteTarget {
                direction: VoteDirection::Down,
                post_id: 7,
            }))
        );
    }

    #[test]
    fn rejects_malformed_vote_controls() {
        assert_eq!(Control::parse("upvote_"), None);
        assert_eq!(Control::parse("upvote_12a"), None);
        assert_eq!(Control::parse("sidevote_12"), None);
        assert_eq!(Control::parse("vote_12"), None);
    }

    #[test]
    fn vote_control_id_round_trips() {
        let target = VoteTarget {
            direction: VoteDirection::Down,
            post_id: 9,
        };
        assert_eq!(VoteTarget::parse(&target.control_id()), Some(target));
    }

    #[test]
    fn answer_replies_bind_answer_form_for_every_spelling() {
        for id in ["postA_Q", "postAQ", "postA_question", "postAquestion"] {
            assert_eq!(
                Control::parse(id),
                Some(Control::Reply(ReplyTarget::Question)),
                "{id} should resolve to an answer on the question"
            );
        }
        assert_eq!(ReplyTarget::Question.form_name(), "answer_form");
    }

    #[test]
    fn answer_replies_can_target_a_specific_answer() {
        assert_eq!(
            Control::parse("postA_17"),
            Some(Control::Reply(ReplyTarget::Answer(17)))
        );
        assert_eq!(ReplyTarget::Answer(17).form_name(), "answer_form");
        assert_eq!(
            ReplyTarget::Answer(17).content_source_id(),
            "content_answer_17"
        );
    }

    #[test]
    fn comment_replies_resolve_both_spellings() {
        for id in ["postC_question", "postCQ", "postC_Q", "postCquestion"] {
            assert_eq!(
                Control::parse(id),
                Some(Control::Reply(ReplyTarget::CommentOnQuestion)),
                "{id} should resolve to a comment on the question"
            );
        }
        for id in ["postC_A_17", "postCA_17", "postCA17"] {
            assert_eq!(
                Control::parse(id),
                Some(Control::Reply(ReplyTarget::CommentOnAnswer(17))),
                "{id} should resolve to a comment on answer 17"
            );
        }
    }

    #[test]
    fn comment_replies_bind_comment_forms() {
        assert_eq!(
            ReplyTarget::CommentOnQuestion.form_name(),
            "comment_form_question"
        );
        assert_eq!(
            ReplyTarget::CommentOnAnswer(3).form_name(),
            "comment_form_answer_3"
        );
    }

    #[test]
    fn hide_controls_resolve() {
        assert_eq!(
            Control::parse("hideCQ"),
            Some(Control::HideComment(CommentAnchor::Question))
        );
        assert_eq!(
            Control::parse("hideC_A_5"),
            Some(Control::HideComment(CommentAnchor::Answer(5)))
        );
        assert_eq!(
            Control::parse("hideCA_5"),
            Some(Control::HideComment(CommentAnchor::Answer(5)))
        );
        assert_eq!(Control::parse("hideCX"), None);
    }

    #[test]
    fn containers_resolve() {
        assert_eq!(
            Control::parse("comment_form_question"),
            Some(Control::CommentForm(CommentAnchor::Question))
        );
        assert_eq!(
            Control::parse("comment_form_answer_12"),
            Some(Control::CommentForm(CommentAnchor::Answer(12)))
        );
        assert_eq!(Control::parse("comment_form_answer_x"), None);
    }

    #[test]
    fn anchor_ids_round_trip_through_the_parser() {
        for anchor in [CommentAnchor::Question, CommentAnchor::Answer(31)] {
            assert_eq!(
                Control::parse(&anchor.post_control_id()),
                Some(Control::Reply(match anchor {
                    CommentAnchor::Question => ReplyTarget::CommentOnQuestion,
                    CommentAnchor::Answer(id) => ReplyTarget::CommentOnAnswer(id),
                }))
            );
            assert_eq!(
                Control::parse(&anchor.hide_control_id()),
                Some(Control::HideComment(anchor))
            );
            assert_eq!(
                Control::parse(&anchor.container_id()),
                Some(Control::CommentForm(anchor))
            );
        }
    }

    #[test]
    fn both_spellings_of_a_control_parse_identically() {
        let anchor = CommentAnchor::Answer(17);
        let [canonical, compact] = anchor.post_control_spellings();
        assert_eq!(Control::parse(&canonical), Control::parse(&compact));
        let [canonical, compact] = anchor.hide_control_spellings();
        assert_eq!(Control::parse(&canonical), Control::parse(&compact));
    }

    #[test]
    fn unrelated_identifiers_do_not_parse() {
        for id in ["", "submitForm", "wmd-input", "marked_answer_3", "score_42"] {
            assert_eq!(Control::parse(id), None, "{id} should not be bindable");
        }
    }
}
