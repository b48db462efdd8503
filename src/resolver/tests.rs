use std::time::Duration;

use super::*;
use crate::classifier::{BranchGuess, Classifier, ClassifierResult, MockClassifier};
use crate::embedding::MockEmbedder;
use crate::taxonomy::{MockTaxonomyStore, TaxonomyNode};

fn node(id: u64, name: &str, description: &str, embedding: &[f32]) -> TaxonomyNode {
    TaxonomyNode {
        id,
        name: name.to_string(),
        description: description.to_string(),
        embedding: embedding.to_vec(),
        parent_id: None,
    }
}

const QUERY: &str = "tell me about the cosmos";
const GUESS_DESC: &str = "astronomy and spaceflight";

/// Index with three sub-categories and a populated branch for each of the
/// two closest ones.
fn populated_store() -> MockTaxonomyStore {
    let store = MockTaxonomyStore::new();
    store.set_index(vec![
        node(10, "宇宙", "", &[1.0, 0.0]),
        node(20, "歴史", "", &[0.0, 1.0]),
        node(30, "芸術", "", &[0.5, 0.5]),
    ]);
    store.insert_branch(
        10,
        vec![
            node(101, "天文学", "stars", &[0.9, 0.1]),
            node(102, "銀河", "galaxies", &[0.8, 0.2]),
            node(103, "ロケット", "rockets", &[0.3, 0.7]),
        ],
    );
    store.insert_branch(
        30,
        vec![
            node(301, "絵画", "painting", &[0.1, 0.9]),
            node(302, "写真", "photography", &[0.6, 0.4]),
        ],
    );
    store.insert_branch(20, vec![node(201, "古代史", "antiquity", &[0.0, 1.0])]);
    store
}

fn embedder() -> MockEmbedder {
    MockEmbedder::with_entries(&[(QUERY, &[1.0, 0.0]), (GUESS_DESC, &[1.0, 0.0])])
}

fn resolver_with(
    store: MockTaxonomyStore,
    config: ResolverConfig,
) -> Resolver<MockClassifier, MockEmbedder, MockTaxonomyStore> {
    let classifier = MockClassifier::returning("科学", "宇宙", GUESS_DESC);
    Resolver::new(classifier, embedder(), store, config).expect("valid config")
}

#[test]
fn test_zero_limits_are_rejected() {
    for config in [
        ResolverConfig::default().top_subcategories(0),
        ResolverConfig::default().top_leaves_per_branch(0),
        ResolverConfig::default().top_results(0),
    ] {
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ResolveError::InvalidConfig { .. }));
    }
}

#[tokio::test]
async fn test_happy_path_ranks_across_branches() {
    let resolver = resolver_with(populated_store(), ResolverConfig::default());

    let results = resolver.resolve(QUERY).await.expect("resolve");

    assert_eq!(results.len(), 3);
    // 天文学 (0.9,0.1) is closest to the query, then 銀河, then 写真 from
    // the 芸術 branch.
    assert_eq!(results[0].id, 101);
    assert_eq!(results[1].id, 102);
    assert!(results[0].similarity >= results[1].similarity);
    assert!(results[1].similarity >= results[2].similarity);
}

#[tokio::test]
async fn test_exact_leaf_match_short_circuits_branch() {
    let store = populated_store();
    // Branch 10 gains a leaf literally named like the guessed sub-category;
    // despite its hopeless embedding it must dominate the branch alone.
    store.insert_branch(
        10,
        vec![
            node(101, "天文学", "stars", &[0.9, 0.1]),
            node(109, "宇宙", "the whole branch name", &[0.0, 1.0]),
        ],
    );

    let resolver = resolver_with(store, ResolverConfig::default());
    let results = resolver.resolve(QUERY).await.expect("resolve");

    assert_eq!(results[0].id, 109);
    assert_eq!(results[0].similarity, 1.0);
    // 天文学 was skipped entirely in that branch, not ranked below.
    assert!(results.iter().all(|r| r.id != 101));
}

#[tokio::test]
async fn test_missing_branch_degrades_gracefully() {
    let store = MockTaxonomyStore::new();
    store.set_index(vec![
        node(10, "宇宙", "", &[1.0, 0.0]),
        node(30, "芸術", "", &[0.5, 0.5]),
    ]);
    // Only 芸術 has a branch file.
    store.insert_branch(30, vec![node(302, "写真", "photography", &[0.6, 0.4])]);

    let resolver = resolver_with(store, ResolverConfig::default());
    let results = resolver.resolve(QUERY).await.expect("resolve");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 302);
}

#[tokio::test]
async fn test_all_branches_missing_is_empty_success() {
    let store = MockTaxonomyStore::new();
    store.set_index(vec![
        node(10, "宇宙", "", &[1.0, 0.0]),
        node(20, "歴史", "", &[0.0, 1.0]),
        node(30, "芸術", "", &[0.5, 0.5]),
    ]);

    let resolver = resolver_with(store, ResolverConfig::default());
    let results = resolver.resolve(QUERY).await.expect("resolve");
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_empty_index_is_empty_success() {
    let store = MockTaxonomyStore::new();
    store.set_index(vec![]);

    let resolver = resolver_with(store, ResolverConfig::default());
    let results = resolver.resolve(QUERY).await.expect("resolve");
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_index_failure_is_fatal() {
    let store = populated_store();
    store.fail_index();

    let resolver = resolver_with(store, ResolverConfig::default());
    let err = resolver.resolve(QUERY).await.unwrap_err();
    assert!(matches!(err, ResolveError::Store(_)));
}

#[tokio::test]
async fn test_classifier_failure_is_fatal() {
    let classifier = MockClassifier::new(); // no guess programmed
    let resolver = Resolver::new(
        classifier,
        embedder(),
        populated_store(),
        ResolverConfig::default(),
    )
    .expect("valid config");

    let err = resolver.resolve(QUERY).await.unwrap_err();
    assert!(matches!(err, ResolveError::Classifier(_)));
}

#[tokio::test]
async fn test_unusable_guess_is_empty_guess() {
    let classifier = MockClassifier::returning("科学", "宇宙", "");
    let resolver = Resolver::new(
        classifier,
        embedder(),
        populated_store(),
        ResolverConfig::default(),
    )
    .expect("valid config");

    let err = resolver.resolve(QUERY).await.unwrap_err();
    assert!(matches!(err, ResolveError::EmptyGuess));
}

#[tokio::test]
async fn test_embedder_failure_is_fatal() {
    let classifier = MockClassifier::returning("科学", "宇宙", GUESS_DESC);
    // The guess description embeds fine, the input text does not.
    let embedder = MockEmbedder::with_entries(&[(GUESS_DESC, &[1.0, 0.0])]);
    let resolver = Resolver::new(
        classifier,
        embedder,
        populated_store(),
        ResolverConfig::default(),
    )
    .expect("valid config");

    let err = resolver.resolve(QUERY).await.unwrap_err();
    assert!(matches!(err, ResolveError::Embedder(_)));
}

#[tokio::test]
async fn test_duplicate_leaves_across_branches_collapse() {
    let store = populated_store();
    // The same record appears under two branches.
    let shared = node(777, "共有", "shared leaf", &[0.95, 0.05]);
    store.insert_branch(10, vec![shared.clone()]);
    store.insert_branch(30, vec![shared]);

    let resolver = resolver_with(store, ResolverConfig::default());
    let results = resolver.resolve(QUERY).await.expect("resolve");

    assert_eq!(results.iter().filter(|r| r.id == 777).count(), 1);
}

#[tokio::test]
async fn test_fewer_candidates_than_limits_returns_all() {
    let store = MockTaxonomyStore::new();
    store.set_index(vec![node(10, "宇宙", "", &[1.0, 0.0])]);
    store.insert_branch(10, vec![node(101, "天文学", "stars", &[0.9, 0.1])]);

    let resolver = resolver_with(store, ResolverConfig::default());
    let results = resolver.resolve(QUERY).await.expect("resolve");
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_consider_all_branches_widens_recall() {
    let store = MockTaxonomyStore::new();
    store.set_index(vec![
        node(10, "宇宙", "", &[1.0, 0.0]),
        node(40, "映画", "", &[-1.0, 0.0]),
    ]);
    store.insert_branch(10, vec![node(101, "天文学", "stars", &[0.9, 0.1])]);
    store.insert_branch(40, vec![node(401, "SF映画", "sci-fi", &[0.7, 0.3])]);

    let classifier = MockClassifier::with_guess(BranchGuess {
        top_categories: vec![
            crate::classifier::TopCategoryGuess {
                name: "科学".to_string(),
                sub_categories: vec![crate::classifier::SubCategoryGuess {
                    name: "宇宙".to_string(),
                    description: GUESS_DESC.to_string(),
                }],
            },
            crate::classifier::TopCategoryGuess {
                name: "娯楽".to_string(),
                sub_categories: vec![crate::classifier::SubCategoryGuess {
                    name: "映画".to_string(),
                    description: "films and cinema".to_string(),
                }],
            },
        ],
    });

    let embedder = MockEmbedder::with_entries(&[
        (QUERY, &[1.0, 0.0]),
        (GUESS_DESC, &[1.0, 0.0]),
        ("films and cinema", &[-1.0, 0.0]),
    ]);

    // First-branch-only with a one-slot shortlist: only the 宇宙 guess runs,
    // so the 映画 branch can never enter the funnel.
    let resolver = Resolver::new(
        classifier.clone(),
        embedder.clone(),
        store.clone(),
        ResolverConfig::default().top_subcategories(1),
    )
    .expect("valid config");
    let narrow = resolver.resolve(QUERY).await.expect("resolve");
    assert!(narrow.iter().all(|r| r.id != 401));

    let resolver = Resolver::new(
        classifier,
        embedder,
        store,
        ResolverConfig::default()
            .top_subcategories(1)
            .consider_all_branches(true),
    )
    .expect("valid config");
    let wide = resolver.resolve(QUERY).await.expect("resolve");
    assert!(wide.iter().any(|r| r.id == 401));
}

#[tokio::test]
async fn test_idempotent_given_deterministic_collaborators() {
    let resolver = resolver_with(populated_store(), ResolverConfig::default());

    let first = resolver.resolve(QUERY).await.expect("resolve");
    let second = resolver.resolve(QUERY).await.expect("resolve");
    assert_eq!(first, second);
}

struct SlowClassifier;

#[async_trait::async_trait]
impl Classifier for SlowClassifier {
    async fn classify(&self, _text: &str) -> ClassifierResult<BranchGuess> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(BranchGuess::default())
    }
}

#[tokio::test]
async fn test_deadline_aborts_resolution() {
    let resolver = Resolver::new(
        SlowClassifier,
        embedder(),
        populated_store(),
        ResolverConfig::default().deadline(Duration::from_millis(20)),
    )
    .expect("valid config");

    let err = resolver.resolve(QUERY).await.unwrap_err();
    assert!(matches!(err, ResolveError::DeadlineExceeded { .. }));
}

#[test]
fn test_similarity_serializes_rounded() {
    let record = ResolvedCategory {
        id: 1,
        name: "宇宙".to_string(),
        description: "d".to_string(),
        similarity: 0.123_456_79,
    };

    let value = serde_json::to_value(&record).expect("serialize");
    assert_eq!(value["similarity"], serde_json::json!(0.1235_f32));
    assert_eq!(value["categoryname"], "宇宙");
    // Full precision is retained on the struct itself.
    assert_eq!(record.similarity, 0.123_456_79);
    assert_eq!(record.display_similarity(), 0.1235);
}
