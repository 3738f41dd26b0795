//! End-to-end: sample dataset → training → persisted artifacts → inference.

use phishguard::{
    train, ArtifactPaths, DatasetSource, FeatureExtractor, ImportanceTable, Label, Predictor,
    TrainingConfig, FEATURE_DIM, FEATURE_NAMES,
};

#[test]
fn test_training_on_sample_set_writes_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = TrainingConfig::new(ArtifactPaths::under(dir.path()));
    let extractor = FeatureExtractor::simulated(Some(42));

    let report = train(&config, &extractor).unwrap();

    assert!(matches!(report.source, DatasetSource::Synthesized(_)));
    assert_eq!(report.examples, 20);
    assert_eq!(report.phishing, 10);
    assert_eq!(report.legitimate, 10);
    assert_eq!(report.test_size, 4);
    assert_eq!(report.train_size, 16);
    assert_eq!(report.metrics.confusion.total(), 4);
    assert!((0.0..=1.0).contains(&report.metrics.accuracy));

    assert!(config.paths.model.is_file());
    assert!(config.paths.importance.is_file());
    assert!(config.paths.dataset.is_file());

    let importance = ImportanceTable::load_csv(&config.paths.importance).unwrap();
    assert_eq!(importance.len(), FEATURE_DIM);
    assert!(importance.total() >= 0.0);
    for name in FEATURE_NAMES {
        assert!(importance.rows().iter().any(|r| r.feature == name));
    }
    assert_eq!(importance, report.importance);
}

#[test]
fn test_trained_model_serves_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let config = TrainingConfig::new(ArtifactPaths::under(dir.path()));
    train(&config, &FeatureExtractor::simulated(Some(42))).unwrap();

    let predictor =
        Predictor::load(&config.paths.model, FeatureExtractor::simulated(Some(7))).unwrap();
    for url in [
        "https://www.google.com",
        "http://192.168.1.1/paypal/login",
        "",
        "not a url at all",
    ] {
        let verdict = predictor.predict(url).unwrap();
        assert!((0.5..=1.0).contains(&verdict.confidence), "{url}");
        assert_eq!(verdict.features.url_length, url.chars().count() as u32);
        match verdict.label {
            Label::Phishing => assert!(verdict.phishing_probability > 0.5),
            Label::Legitimate => assert!(verdict.phishing_probability <= 0.5),
        }
    }
}

#[test]
fn test_second_run_reuses_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let config = TrainingConfig::new(ArtifactPaths::under(dir.path()));
    let extractor = FeatureExtractor::simulated(Some(42));

    train(&config, &extractor).unwrap();
    let report = train(&config, &extractor).unwrap();
    assert!(matches!(report.source, DatasetSource::Loaded(_)));
    assert_eq!(report.examples, 20);
}
