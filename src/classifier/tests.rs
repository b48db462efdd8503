use super::client::parse_branch_guess;
use super::*;

const BARE_ARRAY: &str = r#"[
  {
    "categoryname": "Science",
    "sub-category": [
      {"categoryname": "Space", "description": "Astronomy and spaceflight."},
      {"categoryname": "Physics", "description": "Matter and energy."}
    ]
  },
  {
    "categoryname": "Culture",
    "sub-category": [
      {"categoryname": "Film", "description": "Cinema and film-making."}
    ]
  }
]"#;

#[test]
fn test_parse_bare_array() {
    let guess = parse_branch_guess(BARE_ARRAY).expect("parse");

    assert_eq!(guess.top_categories.len(), 2);
    assert_eq!(guess.top_categories[0].name, "Science");
    assert_eq!(guess.top_categories[0].sub_categories.len(), 2);
    assert_eq!(guess.top_categories[0].sub_categories[1].name, "Physics");
}

#[test]
fn test_parse_envelope_response() {
    let envelope = serde_json::json!({
        "model": "llama3.3:latest",
        "response": BARE_ARRAY,
        "done": true,
    })
    .to_string();

    let guess = parse_branch_guess(&envelope).expect("parse");
    assert_eq!(guess.top_categories.len(), 2);
    assert_eq!(
        guess.first_sub_category().map(|s| s.name.as_str()),
        Some("Space")
    );
}

#[test]
fn test_parse_rejects_non_json() {
    let err = parse_branch_guess("I think this is about space.").unwrap_err();
    assert!(matches!(err, ClassifierError::MalformedResponse { .. }));
}

#[test]
fn test_parse_rejects_non_string_envelope() {
    let envelope = r#"{"response": 42}"#;
    let err = parse_branch_guess(envelope).unwrap_err();
    assert!(matches!(err, ClassifierError::MalformedResponse { .. }));
    assert!(err.to_string().contains("not a string"));
}

#[test]
fn test_parse_rejects_wrong_shape() {
    let err = parse_branch_guess(r#"{"categoryname": "Science"}"#).unwrap_err();
    assert!(matches!(err, ClassifierError::MalformedResponse { .. }));
}

#[test]
fn test_missing_sub_categories_default_empty() {
    let guess = parse_branch_guess(r#"[{"categoryname": "Science"}]"#).expect("parse");
    assert_eq!(guess.top_categories.len(), 1);
    assert!(guess.top_categories[0].sub_categories.is_empty());
    assert!(guess.first_sub_category().is_none());
}

#[test]
fn test_all_sub_categories_preserves_proposal_order() {
    let guess = parse_branch_guess(BARE_ARRAY).expect("parse");
    let names: Vec<&str> = guess.all_sub_categories().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Space", "Physics", "Film"]);
}

#[test]
fn test_guess_usability() {
    let usable = SubCategoryGuess {
        name: "Space".to_string(),
        description: "Astronomy.".to_string(),
    };
    let unnamed = SubCategoryGuess {
        name: "  ".to_string(),
        description: "Astronomy.".to_string(),
    };
    let undescribed = SubCategoryGuess {
        name: "Space".to_string(),
        description: String::new(),
    };

    assert!(usable.is_usable());
    assert!(!unnamed.is_usable());
    assert!(!undescribed.is_usable());
}

#[tokio::test]
async fn test_mock_classifier_returns_programmed_guess() {
    let mock = MockClassifier::returning("Science", "Space", "Astronomy.");

    let guess = mock.classify("anything").await.expect("classify");
    assert_eq!(
        guess.first_sub_category().map(|s| s.name.as_str()),
        Some("Space")
    );
}

#[tokio::test]
async fn test_mock_classifier_without_guess_fails() {
    let mock = MockClassifier::new();
    let err = mock.classify("anything").await.unwrap_err();
    assert!(matches!(err, ClassifierError::MalformedResponse { .. }));
}
