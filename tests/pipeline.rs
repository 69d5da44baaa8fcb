use std::io::Write as _;
use std::path::Path;

use iris_nn::{
    prepare, run, run_with, Batch, BatchStats, ClassLabel, Classifier, EncodingPolicy, Error,
    PipelineConfig, Result, TrainSummary,
};
use tempfile::NamedTempFile;

const THREE_ROWS: &str = "\
sepal_length,sepal_width,petal_length,petal_width,species
5.1,3.5,1.4,0.2,setosa
7.0,3.2,4.7,1.4,versicolor
6.3,3.3,6.0,2.5,virginica
";

/// Records what the pipeline hands it and returns fixed scores.
#[derive(Default)]
struct FakeClassifier {
    feature_count: Option<usize>,
    batch_sizes: Vec<usize>,
    scored: Vec<Vec<f64>>,
}

impl Classifier for FakeClassifier {
    fn build(&mut self, feature_count: usize) -> Result<String> {
        self.feature_count = Some(feature_count);
        Ok(String::new())
    }

    fn fit(&mut self, batches: &[Batch], on_batch: &mut dyn FnMut(&BatchStats)) -> Result<TrainSummary> {
        for (i, batch) in batches.iter().enumerate() {
            self.batch_sizes.push(batch.len());
            on_batch(&BatchStats { epoch: 1, batch: i, total_epochs: 1, loss: 0.5 });
        }
        Ok(TrainSummary { epochs_completed: 1, last_loss: Some(0.5), stopped: false })
    }

    fn score(&mut self, features: &[f64]) -> Result<Vec<f64>> {
        self.scored.push(features.to_vec());
        Ok(vec![0.7, 0.1, 0.2])
    }
}

fn write_csv(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn config_for(path: &Path, batch_size: usize) -> PipelineConfig {
    PipelineConfig { data_path: path.to_path_buf(), batch_size, ..Default::default() }
}

#[test]
fn three_rows_in_batches_of_two() {
    let file = write_csv(THREE_ROWS);
    let data = prepare(&config_for(file.path(), 2)).unwrap();

    assert_eq!(data.feature_count(), 4);
    assert_eq!(data.batches.len(), 2);
    assert_eq!(data.batches[0].len(), 2);
    assert_eq!(data.batches[1].len(), 1);

    let rows: Vec<(&[f64], [f64; 3])> = data
        .batches
        .iter()
        .flat_map(|b| b.records.iter().map(|r| (r.features.as_slice(), r.target)))
        .collect();
    assert_eq!(rows[0], (&[5.1, 3.5, 1.4, 0.2][..], ClassLabel::Setosa.one_hot()));
    assert_eq!(rows[1], (&[7.0, 3.2, 4.7, 1.4][..], ClassLabel::Versicolor.one_hot()));
    assert_eq!(rows[2], (&[6.3, 3.3, 6.0, 2.5][..], ClassLabel::Virginica.one_hot()));
}

#[test]
fn run_reports_batches_and_prediction() {
    let file = write_csv(THREE_ROWS);
    let mut model = FakeClassifier::default();
    let mut out = Vec::new();

    let outcome = run_with(&config_for(file.path(), 2), &mut model, &mut out).unwrap();

    assert_eq!(model.feature_count, Some(4));
    assert_eq!(model.batch_sizes, vec![2, 1]);
    assert_eq!(model.scored, vec![vec![4.4, 2.9, 1.4, 0.2]]);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec!["Epoch: 1/1 Batch: 0 Loss: 0.5", "Epoch: 1/1 Batch: 1 Loss: 0.5", "Setosa"]
    );

    assert_eq!(outcome.record_count, 3);
    assert_eq!(outcome.batch_count, 2);
    assert_eq!(outcome.prediction.class, ClassLabel::Setosa);
    assert_eq!(outcome.prediction.index, 0);
}

#[test]
fn missing_file_is_a_data_access_error() {
    let config = config_for(Path::new("/no/such/dir/iris.csv"), 10);
    let err = run_with(&config, &mut FakeClassifier::default(), &mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::DataAccess { .. }));
}

#[test]
fn ragged_row_is_a_schema_error() {
    let file = write_csv("a,b,species\n1.0,2.0,setosa\n1.0,setosa\n");
    let err = prepare(&config_for(file.path(), 10)).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));
}

#[test]
fn non_finite_cell_fails_while_loading() {
    let file = write_csv("a,b,species\nnan,1.0,setosa\ninf,2.0,virginica\n");
    let err = prepare(&config_for(file.path(), 10)).unwrap_err();
    match err {
        Error::InvalidNumber { row, column, value } => {
            assert_eq!((row, column.as_str(), value.as_str()), (1, "a", "nan"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn misspelled_label_depends_on_policy() {
    let file = write_csv("a,species\n1.0,setosa\n2.0,virgincia\n");

    let strict = prepare(&config_for(file.path(), 10)).unwrap_err();
    assert!(matches!(strict, Error::LabelEncoding { row: 2, .. }));

    let permissive = PipelineConfig {
        encoding: EncodingPolicy::Permissive,
        ..config_for(file.path(), 10)
    };
    let data = prepare(&permissive).unwrap();
    assert_eq!(data.batches[0].records[1].target, [0.0, 0.0, 0.0]);
    assert_eq!(data.batches[0].records[0].target, [1.0, 0.0, 0.0]);
}

#[test]
fn invalid_config_fails_before_reading() {
    let config = PipelineConfig { batch_size: 0, ..Default::default() };
    let err = run_with(&config, &mut FakeClassifier::default(), &mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));

    let config = PipelineConfig { learning_rate: 0.0, ..Default::default() };
    let err = run(&config, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn bundled_dataset_prepares_cleanly() {
    let data = prepare(&PipelineConfig::default()).unwrap();
    assert_eq!(data.feature_count(), 4);
    assert_eq!(data.record_count(), 150);
    assert_eq!(data.batches.len(), 15);
    for batch in &data.batches {
        for target in batch.targets() {
            assert_eq!(target.iter().sum::<f64>(), 1.0);
        }
    }
}

#[test]
fn network_backend_learns_setosa() {
    let config = PipelineConfig { seed: Some(42), ..Default::default() };
    let mut out = Vec::new();

    let outcome = run(&config, &mut out).unwrap();

    assert_eq!(outcome.training.epochs_completed, 100);
    assert_eq!(outcome.prediction.class, ClassLabel::Setosa);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Total params: 43"));
    assert_eq!(text.lines().filter(|l| l.starts_with("Epoch: ")).count(), 100 * 15);
    assert_eq!(text.lines().last(), Some("Setosa"));
    assert!(text.contains("Epoch: 100/100 Batch: 14 Loss: "));
}

#[test]
fn run_trains_with_the_configured_settings() {
    let config = PipelineConfig { epochs: 2, hidden_size: 3, seed: Some(1), ..Default::default() };
    let mut out = Vec::new();

    let outcome = run(&config, &mut out).unwrap();

    assert_eq!(outcome.batch_count, 15);
    assert_eq!(outcome.training.epochs_completed, 2);
    assert!(!outcome.training.stopped);

    let text = String::from_utf8(out).unwrap();
    let progress: Vec<&str> = text.lines().filter(|l| l.starts_with("Epoch: ")).collect();
    assert_eq!(progress.len(), 2 * outcome.batch_count);
    assert!(progress[0].starts_with("Epoch: 1/2 Batch: 0 "));
    assert!(progress[29].starts_with("Epoch: 2/2 Batch: 14 "));
    // 4*3 + 3 + 3*3 + 3
    assert!(text.contains("Total params: 27"));
}

#[test]
fn seeded_runs_print_identical_output() {
    let config = PipelineConfig { epochs: 3, seed: Some(7), ..Default::default() };
    let mut first = Vec::new();
    let mut second = Vec::new();
    run(&config, &mut first).unwrap();
    run(&config, &mut second).unwrap();
    assert_eq!(first, second);
}
