use quill_page::config::PageConfig;
use quill_page::controller::{apply_vote_outcome, region, Activation, Controller};
use quill_page::dom::{Document, MemoryDocument};
use quill_page::render::render_markup;
use quill_types::{CommentAnchor, VoteOutcome};

/// Builds the document a question-thread template produces before any
/// script has run.
fn freshly_templated_page() -> MemoryDocument {
    let mut doc = MemoryDocument::new();

    doc.insert_text("title_question", "What does ?Sized mean?");
    doc.insert_text("marked_content_question", "It *relaxes* the Sized bound.");
    doc.insert_text("content_question", "It *relaxes* the Sized bound.");
    doc.insert_text("content_answer_17", "See the reference.");

    doc.insert("upvote_42");
    doc.insert("downvote_42");
    doc.insert_text("score_42", "6");

    doc.insert("postA_Q");
    doc.insert("postCA_17");
    doc.insert("hideCA_17");
    doc.insert("comment_form_answer_17");

    doc.insert("submitForm");
    doc.insert("wmd-input");
    doc.insert("wmd-preview");
    doc.insert("modalTitle");
    doc.insert("postTitle");
    doc.insert("postContent");

    doc
}

#[tokio::test]
async fn page_lifecycle_from_load_to_submit_binding() {
    let mut doc = freshly_templated_page();
    let config = PageConfig::new("http://127.0.0.1:1", Some("t0k".to_string()));
    let mut controller = Controller::new(&config);

    // Page load: markup pass, then the binding pass.
    let rendered = render_markup(&mut doc, &|raw: &str| {
        format!("<p>{}</p>", raw.replace("*relaxes*", "<em>relaxes</em>"))
    });
    assert_eq!(rendered, 1);
    assert_eq!(
        doc.markup("marked_content_question").as_deref(),
        Some("<p>It <em>relaxes</em> the Sized bound.</p>")
    );

    controller.bind(&mut doc);
    assert!(
        !doc.is_visible("comment_form_answer_17"),
        "comment forms begin hidden"
    );

    // The user opens a comment on answer 17.
    let activation = controller.activate(&mut doc, "postCA_17").await.unwrap();
    assert_eq!(
        activation,
        Activation::ReplyBound {
            form_name: "comment_form_answer_17".to_string()
        }
    );
    assert!(doc.is_visible("comment_form_answer_17"));
    assert!(!doc.is_visible("postCA_17"));
    assert_eq!(
        doc.attr(region::SUBMIT, "name").as_deref(),
        Some("comment_form_answer_17")
    );
    assert_eq!(
        doc.markup(region::POST_CONTENT).as_deref(),
        Some("See the reference.")
    );

    // They close the form again; everything returns to the initial state.
    controller.activate(&mut doc, "hideCA_17").await.unwrap();
    assert!(!doc.is_visible("comment_form_answer_17"));
    assert!(doc.is_visible("postCA_17"));
    assert_eq!(
        controller.comment_form_state(CommentAnchor::Answer(17)),
        quill_page::controller::CommentFormState::Collapsed
    );

    // They answer the question instead; the binding is fully replaced.
    controller.activate(&mut doc, "postA_Q").await.unwrap();
    assert_eq!(
        doc.attr(region::SUBMIT, "name").as_deref(),
        Some("answer_form")
    );
    assert_eq!(
        doc.markup(region::POST_TITLE).as_deref(),
        Some("<h3>What does ?Sized mean?</h3>")
    );
}

#[test]
fn vote_response_updates_the_named_score_label() {
    let mut doc = freshly_templated_page();

    // Clicking `upvote_42` sends `button=upvote_42`; the backend answers
    // with the element to update and the new score.
    let outcome: VoteOutcome =
        serde_json::from_str(r#"{"id": "score_42", "new_score": 7}"#).unwrap();
    assert!(apply_vote_outcome(&mut doc, &outcome));
    assert_eq!(doc.text("score_42").as_deref(), Some("7"));
}

#[test]
fn vote_response_for_an_unbound_label_is_dropped() {
    let mut doc = MemoryDocument::new();
    let outcome = VoteOutcome {
        id: "score_42".to_string(),
        new_score: 7,
    };
    assert!(
        !apply_vote_outcome(&mut doc, &outcome),
        "a response arriving after the label is gone must not be applied"
    );
}
