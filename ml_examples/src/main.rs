// ml_examples/src/main.rs
use anyhow::Result;
use backprop_ml::init_logging;

fn main() -> Result<()> {
    init_logging(std::env::var_os("VERBOSE").is_some())?;

    #[cfg(feature = "iris")]
    run_iris(std::env::args().nth(1))?;

    #[cfg(feature = "mnist")]
    run_mnist()?;

    Ok(())
}

/// Train on the bundled Iris CSV, optionally with a JSON config file.
#[cfg(feature = "iris")]
fn run_iris(config_path: Option<String>) -> Result<()> {
    use backprop_ml::{
        confusion_matrix, load_iris, print_confusion_matrix, print_model_summary,
        BackpropClassifier, ClassifierConfig, NormalizationKind,
    };

    println!("=== Iris Dataset ===");
    let config = match config_path {
        Some(path) => ClassifierConfig::load_from_file(path)?,
        None => ClassifierConfig::new(3, 5000)
            .with_seed(42)
            .with_normalization(NormalizationKind::Affine {
                offset: 25.0,
                scale: 25.0,
            }),
    };
    let iris_csv = concat!(env!("CARGO_MANIFEST_DIR"), "/../resources/FisherIris.csv");
    let (training_set, test_set) = load_iris(iris_csv, config.seed)?;
    let mut classifier = BackpropClassifier::new(&training_set, &config)?;
    print_model_summary(classifier.network());
    let iris_acc = classifier.evaluate(&test_set)?;
    println!("Iris Accuracy: {:.2}%", iris_acc * 100.0);
    let cm = confusion_matrix(&mut classifier, &test_set)?;
    print_confusion_matrix(&cm, "Iris");
    Ok(())
}

/// Train on MNIST from `data/` for a single epoch.
#[cfg(feature = "mnist")]
fn run_mnist() -> Result<()> {
    use backprop_ml::datasets::{pixel_mean, TRAIN_SET_SIZE};
    use backprop_ml::{load_mnist, BackpropClassifier, ClassifierConfig, MnistFiles, Normalizer};

    println!("\n=== MNIST ===");
    let seed = 0;
    let (training_set, test_set) =
        load_mnist(&MnistFiles::in_dir("data"), TRAIN_SET_SIZE, Some(seed))?;

    // centre pixels around zero; the mean comes from the first 10000 images
    let scale = |x: f64| x / 255.0;
    let mean = pixel_mean(&training_set, 10000, scale);
    tracing::info!(mean, "pixel mean");

    let config = ClassifierConfig::new(70, 1).with_seed(seed);
    let mut classifier = BackpropClassifier::with_normalizer(
        &training_set,
        &config,
        Normalizer::new(move |x| scale(x) - mean),
    )?;
    let mnist_acc = classifier.evaluate(&test_set)?;
    println!("MNIST Accuracy: {:.2}%", mnist_acc * 100.0);
    Ok(())
}
