// End-to-end tests for the matching pipeline
use std::io::Write;

use matchx::{
    top_n_accuracy, Accuracy, CatalogProduct, DealerListing, LemmaModel, LemmaPipeline, Matcher,
    ProductId, TfidfVectorizer,
};

fn vectorizer() -> TfidfVectorizer {
    let vocabulary = [
        "гель", "мыло", "антисептик", "универсальный", "отбеливатель", "ultra", "clean",
        "паста", "порошок",
    ];
    TfidfVectorizer::from_parts(
        vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.to_string(), i)),
        vec![1.0; 9],
    )
    .unwrap()
}

fn lemmas() -> LemmaPipeline {
    LemmaPipeline::new(
        LemmaModel::from_entries("en", [("cleaning".to_string(), "clean".to_string())]),
        LemmaModel::from_entries(
            "ru",
            [("универсальное".to_string(), "универсальный".to_string())],
        ),
    )
}

fn listing(key: &str, name: &str) -> DealerListing {
    DealerListing {
        key: key.to_string(),
        price: "99".to_string(),
        raw_name: name.to_string(),
        dealer_id: 2,
    }
}

fn product(id: i64, article: &str, name: &str) -> CatalogProduct {
    CatalogProduct {
        id: ProductId::Integer(id),
        article: if article.is_empty() {
            None
        } else {
            Some(article.to_string())
        },
        cost: Some("50".to_string()),
        name: Some(name.to_string()),
        name_1c: None,
        ozon_name: None,
        wb_name: None,
    }
}

fn catalog() -> Vec<CatalogProduct> {
    vec![
        product(1, "024-11", "Гель антисептик ultra 600 мл"),
        product(2, "", "Мыло универсальное 90 г"),
        product(3, "107-4", "Отбеливатель clean 5 л"),
        product(4, "", "Паста чистящая"),
        product(5, "", "Порошок универсальный 3 кг"),
    ]
}

#[test]
fn test_article_match_ranks_first() {
    let vectorizer = vectorizer();
    let lemmas = lemmas();
    let matcher = Matcher::new(&vectorizer, &lemmas);

    // The text points at the soap, the embedded article at the bleach.
    let out = matcher
        .run(&[listing("d-1", "Мыло 107-4 универсальное")], &catalog())
        .unwrap();
    assert_eq!(out["d-1"][0], ProductId::Integer(3));
    assert!(out["d-1"].contains(&ProductId::Integer(2)));
}

#[test]
fn test_similarity_only_when_no_article() {
    let vectorizer = vectorizer();
    let lemmas = lemmas();
    let matcher = Matcher::new(&vectorizer, &lemmas);

    let out = matcher
        .run(&[listing("d-2", "Гель-антисептик Ultra, 0,6 л")], &catalog())
        .unwrap();
    assert_eq!(out["d-2"][0], ProductId::Integer(1));
}

#[test]
fn test_lemmatization_bridges_word_forms() {
    let vectorizer = vectorizer();
    let lemmas = lemmas();
    let matcher = Matcher::new(&vectorizer, &lemmas);

    // "универсальное" only matches catalog entries through the ru lemma.
    let out = matcher
        .run(&[listing("d-3", "Порошок универсальное")], &catalog())
        .unwrap();
    assert_eq!(out["d-3"][0], ProductId::Integer(5));
}

#[test]
fn test_all_keys_present_and_duplicates_collapsed() {
    let vectorizer = vectorizer();
    let lemmas = lemmas();
    let matcher = Matcher::new(&vectorizer, &lemmas);

    let out = matcher
        .run(
            &[
                listing("d-4", "Паста чистящая"),
                listing("d-4", "Паста чистящая"),
                listing("d-5", "Гель"),
            ],
            &catalog(),
        )
        .unwrap();
    assert_eq!(out.len(), 2);
    assert!(out.contains_key("d-4"));
    assert!(out.contains_key("d-5"));
}

#[test]
fn test_candidate_list_cap() {
    let vectorizer = vectorizer();
    let lemmas = lemmas();
    let matcher = Matcher::new(&vectorizer, &lemmas);

    let out = matcher
        .run(&[listing("d-6", "Гель 024-11")], &catalog())
        .unwrap();
    // <=1 exact + <=10 similarity, deduplicated; 5 products total here.
    assert!(out["d-6"].len() <= 5);
    assert_eq!(out["d-6"][0], ProductId::Integer(1));
}

#[test]
fn test_offline_accuracy_on_pipeline_output() {
    let vectorizer = vectorizer();
    let lemmas = lemmas();
    let matcher = Matcher::new(&vectorizer, &lemmas);

    let out = matcher
        .run(
            &[listing("d-7", "Отбеливатель clean"), listing("d-8", "Мыло")],
            &catalog(),
        )
        .unwrap();

    let target: ahash::AHashMap<String, ProductId> = [
        ("d-7".to_string(), ProductId::Integer(3)),
        ("d-8".to_string(), ProductId::Integer(2)),
    ]
    .into_iter()
    .collect();

    match top_n_accuracy(&target, &out, 1) {
        Accuracy::Score {
            percent,
            comparisons,
        } => {
            assert_eq!(comparisons, 2);
            assert_eq!(percent, 100.0);
        }
        Accuracy::NotComputable => panic!("metric should be computable"),
    }
}

#[test]
fn test_candidate_mapping_serde_round_trip() {
    let vectorizer = vectorizer();
    let lemmas = lemmas();
    let matcher = Matcher::new(&vectorizer, &lemmas);

    let out = matcher
        .run(&[listing("d-9", "Гель антисептик")], &catalog())
        .unwrap();

    // The mapping is what the CLI writes out and what accuracy checks read
    // back in, so both serde directions have to work on the ahash maps.
    let json = serde_json::to_string(&out).unwrap();
    let back: ahash::AHashMap<String, Vec<ProductId>> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, out);
    assert_eq!(back["d-9"][0], ProductId::Integer(1));
}

#[test]
fn test_artifact_load_failures_abort() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ definitely not a vectorizer").unwrap();
    assert!(TfidfVectorizer::load(file.path()).is_err());
    assert!(TfidfVectorizer::load(std::path::Path::new("/missing/model.json")).is_err());
}

#[test]
fn test_listings_parse_from_upstream_json() {
    let raw = r#"[
        {"product_key": "546227", "price": "233.00", "product_name": "Мыло универсальное", "dealer_id": 9},
        {"product_key": "546228", "price": "120.00", "product_name": "Гель антисептик", "dealer_id": 9}
    ]"#;
    let listings: Vec<DealerListing> = serde_json::from_str(raw).unwrap();
    assert_eq!(listings.len(), 2);

    let vectorizer = vectorizer();
    let lemmas = lemmas();
    let matcher = Matcher::new(&vectorizer, &lemmas);
    let out = matcher.run(&listings, &catalog()).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out["546228"][0], ProductId::Integer(1));
}
