use anyhow::Result;
use backprop_ml::{
    accuracy, load_iris, BackpropClassifier, ClassifierConfig, NormalizationKind, Normalizer,
};

const IRIS_CSV: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/FisherIris.csv");

fn iris_config() -> ClassifierConfig {
    ClassifierConfig::new(3, 5000)
        .with_learn_rate(1.0)
        .with_seed(42)
        .with_normalization(NormalizationKind::Affine {
            offset: 25.0,
            scale: 25.0,
        })
}

#[test]
fn classify_fisher_iris() -> Result<()> {
    let (training_set, test_set) = load_iris(IRIS_CSV, Some(42))?;
    let mut classifier = BackpropClassifier::new(&training_set, &iris_config())?;
    assert_eq!(classifier.n_params(), 4);
    assert_eq!(classifier.n_classes(), 3);

    let accuracy = classifier.evaluate(&test_set)?;
    assert!(accuracy > 0.8, "Accuracy below expected threshold: {}", accuracy);
    Ok(())
}

#[test]
fn closure_normalizer_matches_config_normalizer() -> Result<()> {
    let (training_set, test_set) = load_iris(IRIS_CSV, Some(42))?;
    let config = iris_config();
    let mut from_config = BackpropClassifier::new(&training_set, &config)?;
    let mut from_closure = BackpropClassifier::with_normalizer(
        &training_set,
        &config,
        Normalizer::new(|x| (x - 25.0) / 25.0),
    )?;
    assert_eq!(from_config.network(), from_closure.network());
    for (_, params) in &test_set {
        assert_eq!(from_config.predict(params)?, from_closure.predict(params)?);
    }
    assert_eq!(
        accuracy(&mut from_config, &test_set)?,
        accuracy(&mut from_closure, &test_set)?
    );
    Ok(())
}

#[test]
fn incorrect_parameter_count() -> Result<()> {
    let (training_set, _) = load_iris(IRIS_CSV, Some(1))?;
    let config = ClassifierConfig::new(3, 10).with_seed(1);
    let mut classifier = BackpropClassifier::new(&training_set, &config)?;
    let err = classifier.predict(&[1.0, 2.0]).unwrap_err();
    assert!(err.to_string().contains("wrong number of parameters"));
    Ok(())
}
