//! Dataset loading utilities for Iris and MNIST.
use crate::utils::seeded_rng;
use anyhow::{anyhow, ensure, Result};
use byteorder::{BigEndian, ReadBytesExt};
use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Class label and raw feature values.
pub type DataEntry = (usize, Vec<f64>);
pub type DataSet = Vec<DataEntry>;

pub const IMAGE_WIDTH: usize = 28;
pub const IMAGE_HEIGHT: usize = 28;
pub const IMAGE_SIZE: usize = IMAGE_WIDTH * IMAGE_HEIGHT;
pub const TRAIN_SET_SIZE: usize = 60000;
pub const TEST_SET_SIZE: usize = 10000;

const LABELS_MAGIC: i32 = 2049;
const IMAGES_MAGIC: i32 = 2051;

/// One-hot encode
pub fn one_hot(label: usize, num_classes: usize) -> Vec<f64> {
    let mut v = vec![0.0; num_classes];
    if label < num_classes {
        v[label] = 1.0;
    }
    v
}

/// Shuffle, then split into 2/3 training and 1/3 test.
pub fn split_shuffled(mut data: DataSet, seed: Option<u64>) -> (DataSet, DataSet) {
    let mut rng = seeded_rng(seed);
    data.shuffle(&mut rng);
    let training_size = data.len() * 2 / 3;
    let test_set = data.split_off(training_size);
    (data, test_set)
}

/// Parse CSV with a header row and columns `class, feature1, .., featureN`.
pub fn read_iris<R: Read>(reader: R) -> Result<DataSet> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut dataset = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| anyhow!("CSV parse error: {}", e))?;
        let mut fields = record.iter();
        let class_field = fields
            .next()
            .ok_or_else(|| anyhow!("Missing class value in row {}", row + 1))?;
        let class: usize = class_field
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid class value {:?} in row {}", class_field, row + 1))?;
        let features = fields
            .map(|s| {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| anyhow!("Invalid parameter value {:?} in row {}", s, row + 1))
            })
            .collect::<Result<Vec<f64>>>()?;
        dataset.push((class, features));
    }
    if dataset.is_empty() {
        return Err(anyhow!("No data loaded from Iris"));
    }
    Ok(dataset)
}

/// Load Iris from CSV and split it into training and test sets.
pub fn load_iris<P: AsRef<Path>>(filename: P, seed: Option<u64>) -> Result<(DataSet, DataSet)> {
    let filename = filename.as_ref();
    let file = File::open(filename)
        .map_err(|e| anyhow!("Failed to open {}: {}", filename.display(), e))?;
    let data = read_iris(file)?;
    let (training_set, test_set) = split_shuffled(data, seed);
    debug!(
        train = training_set.len(),
        test = test_set.len(),
        "loaded Iris"
    );
    Ok((training_set, test_set))
}

/// Read `set_size` labels from an IDX1 stream.
pub fn read_labels<R: Read>(r: &mut R, set_size: usize) -> Result<Vec<u8>> {
    let magic = r
        .read_i32::<BigEndian>()
        .map_err(|e| anyhow!("Read magic: {}", e))?;
    ensure!(magic == LABELS_MAGIC, "Invalid label magic: {}", magic);
    let count = r.read_i32::<BigEndian>()?;
    ensure!(
        count >= 0 && count as usize >= set_size,
        "Requested {} labels but the file holds {}",
        set_size,
        count
    );
    let mut labels = vec![0u8; set_size];
    r.read_exact(&mut labels)
        .map_err(|e| anyhow!("Read labels: {}", e))?;
    Ok(labels)
}

/// Read `set_size` 28x28 images from an IDX3 stream as raw pixel values.
pub fn read_images<R: Read>(r: &mut R, set_size: usize) -> Result<Vec<Vec<f64>>> {
    let magic = r
        .read_i32::<BigEndian>()
        .map_err(|e| anyhow!("Read magic: {}", e))?;
    ensure!(magic == IMAGES_MAGIC, "Invalid image magic: {}", magic);
    let count = r.read_i32::<BigEndian>()?;
    let rows = r.read_i32::<BigEndian>()?;
    let cols = r.read_i32::<BigEndian>()?;
    ensure!(
        rows as usize == IMAGE_HEIGHT && cols as usize == IMAGE_WIDTH,
        "Unexpected image shape {}x{}",
        rows,
        cols
    );
    ensure!(
        count >= 0 && count as usize >= set_size,
        "Requested {} images but the file holds {}",
        set_size,
        count
    );
    let mut buffer = [0u8; IMAGE_SIZE];
    let mut images = Vec::with_capacity(set_size);
    for _ in 0..set_size {
        r.read_exact(&mut buffer)
            .map_err(|e| anyhow!("Image data overflow: {}", e))?;
        images.push(buffer.iter().map(|&b| b as f64).collect());
    }
    Ok(images)
}

/// Paths of the four gzipped MNIST files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnistFiles {
    pub train_images: PathBuf,
    pub train_labels: PathBuf,
    pub test_images: PathBuf,
    pub test_labels: PathBuf,
}

impl MnistFiles {
    /// Standard file names inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            train_images: dir.join("train-images-idx3-ubyte.gz"),
            train_labels: dir.join("train-labels-idx1-ubyte.gz"),
            test_images: dir.join("t10k-images-idx3-ubyte.gz"),
            test_labels: dir.join("t10k-labels-idx1-ubyte.gz"),
        }
    }
}

fn open_gz(path: &Path) -> Result<GzDecoder<File>> {
    let file = File::open(path).map_err(|e| anyhow!("Failed to open {}: {}", path.display(), e))?;
    Ok(GzDecoder::new(file))
}

fn read_set(images: &Path, labels: &Path, set_size: usize) -> Result<DataSet> {
    let labels = read_labels(&mut open_gz(labels)?, set_size)?;
    let images = read_images(&mut open_gz(images)?, set_size)?;
    Ok(labels
        .into_iter()
        .map(|l| l as usize)
        .zip(images)
        .collect())
}

/// Mean of `scale(pixel)` over every pixel of the first `n_images` entries,
/// or 0.0 when there are none.
pub fn pixel_mean(data: &[DataEntry], n_images: usize, scale: impl Fn(f64) -> f64) -> f64 {
    let (sum, count) = data
        .iter()
        .take(n_images)
        .flat_map(|(_, image)| image.iter().copied())
        .map(scale)
        .fold((0.0, 0usize), |(sum, count), x| (sum + x, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Load `n_train_points` training images and the full test set; only the
/// training set is shuffled.
pub fn load_mnist(
    files: &MnistFiles,
    n_train_points: usize,
    seed: Option<u64>,
) -> Result<(DataSet, DataSet)> {
    let mut training_set = read_set(&files.train_images, &files.train_labels, n_train_points)?;
    let test_set = read_set(&files.test_images, &files.test_labels, TEST_SET_SIZE)?;
    training_set.shuffle(&mut seeded_rng(seed));
    debug!(
        train = training_set.len(),
        test = test_set.len(),
        "loaded MNIST"
    );
    Ok((training_set, test_set))
}
