//! Seed coordinator - drives one seeding run
//!
//! A run moves strictly forward through [`RunStage`]s:
//! `Idle → Loaded → Validated → (DryReported | Writing → Complete)`, with
//! `Failed` reachable from any stage. Batches are committed one at a time,
//! in input order; a failed commit ends the run and leaves earlier batches
//! applied.

use crate::adapters::database::DocumentStore;
use crate::config::SeedConfig;
use crate::core::seed::batch::{batch_count, batches};
use crate::core::seed::extract::extract_items;
use crate::core::seed::loader::load_seed_pack;
use crate::core::seed::summary::{SeedOutcome, SeedSummary};
use crate::core::seed::writer::{distinct_collections, BatchOutcome, BatchWriter};
use crate::domain::{BatchSize, Result, SeedItem, WriteMode};
use crate::{log_batch_committed, log_error_with_context};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Stage of a seeding run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Idle,
    Loaded,
    Validated,
    DryReported,
    Writing,
    Complete,
    Failed,
}

/// Resolved settings for one run
#[derive(Debug, Clone)]
pub struct SeedRun {
    /// Seed pack to load
    pub seed_pack_path: PathBuf,

    /// Documents per commit
    pub batch_size: BatchSize,

    /// Merge or overwrite
    pub mode: WriteMode,

    /// Validate only
    pub dry_run: bool,
}

impl SeedRun {
    /// Resolve run settings from the `[seed]` configuration
    pub fn from_config(config: &SeedConfig) -> Self {
        Self {
            seed_pack_path: PathBuf::from(&config.seed_pack_path),
            batch_size: config.batch_size(),
            mode: config.write_mode(),
            dry_run: config.dry_run,
        }
    }
}

/// Seed coordinator
pub struct SeedCoordinator {
    run: SeedRun,
    writer: BatchWriter,
    stage: RunStage,
}

impl SeedCoordinator {
    /// Create a coordinator writing through `store`
    pub fn new(run: SeedRun, store: Arc<dyn DocumentStore>) -> Self {
        let writer = BatchWriter::new(store, run.dry_run, run.mode);
        Self {
            run,
            writer,
            stage: RunStage::Idle,
        }
    }

    /// Current stage
    pub fn stage(&self) -> RunStage {
        self.stage
    }

    /// Execute the run
    ///
    /// Reports progress to the operator on stdout and returns a summary on
    /// success.
    ///
    /// # Errors
    ///
    /// Any load, validation or commit error; the stage is then
    /// [`RunStage::Failed`].
    pub async fn execute(&mut self) -> Result<SeedSummary> {
        let start_time = Instant::now();

        tracing::info!(
            seed_pack = %self.run.seed_pack_path.display(),
            batch_size = self.run.batch_size.get(),
            mode = %self.run.mode,
            dry_run = self.run.dry_run,
            "Starting seeding run"
        );

        match self.run_stages().await {
            Ok(summary) => {
                let summary = summary.with_duration(start_time.elapsed());
                summary.log();
                Ok(summary)
            }
            Err(e) => {
                let context = format!("Seeding failed at stage {:?}", self.stage);
                log_error_with_context!(&e, context.as_str());
                self.stage = RunStage::Failed;
                Err(e)
            }
        }
    }

    async fn run_stages(&mut self) -> Result<SeedSummary> {
        let value = load_seed_pack(&self.run.seed_pack_path)?;
        self.stage = RunStage::Loaded;

        let items = extract_items(value)?;
        self.stage = RunStage::Validated;

        if items.is_empty() {
            println!("No seed items found (nothing to write).");
            self.stage = RunStage::Complete;
            return Ok(SeedSummary::new(SeedOutcome::Empty, 0));
        }

        println!("Loaded {} documents from seed pack.", items.len());

        if let Some(collections) = self.writer.dry_run_report(&items) {
            return Ok(self.report_dry_run(items.len(), collections));
        }

        self.write_batches(&items).await
    }

    fn report_dry_run(&mut self, total: usize, collections: Vec<String>) -> SeedSummary {
        println!(
            "Dry run: would write to collections: {}",
            collections.join(", ")
        );
        self.stage = RunStage::DryReported;

        SeedSummary::new(SeedOutcome::DryRun, total).with_collections(collections)
    }

    async fn write_batches(&mut self, items: &[SeedItem]) -> Result<SeedSummary> {
        self.stage = RunStage::Writing;

        let total = items.len();
        tracing::info!(
            total,
            batches = batch_count(total, self.run.batch_size),
            "Writing seed items"
        );

        let mut summary = SeedSummary::new(SeedOutcome::Completed, total)
            .with_collections(distinct_collections(items));

        for (index, batch) in batches(items, self.run.batch_size).enumerate() {
            if let BatchOutcome::Committed { written, commit_time } =
                self.writer.write(batch).await?
            {
                summary.written += written;
                summary.batches_committed += 1;

                tracing::debug!(batch = index + 1, commit_time = ?commit_time, "Commit acknowledged");
                log_batch_committed!(index + 1, summary.written, total);
                println!("Committed batch: {}/{}", summary.written, total);
            }
        }

        println!("Database seeding complete.");
        self.stage = RunStage::Complete;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::database::{CommitResult, DocumentWrite};
    use crate::domain::{FirestoreError, SeedError};
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    #[derive(Default)]
    struct CountingStore {
        batch_sizes: Mutex<Vec<usize>>,
        fail_on: Option<usize>,
    }

    #[async_trait]
    impl DocumentStore for CountingStore {
        async fn commit(&self, writes: Vec<DocumentWrite>) -> Result<CommitResult> {
            let mut sizes = self.batch_sizes.lock().unwrap();
            if Some(sizes.len()) == self.fail_on {
                return Err(FirestoreError::CommitFailed {
                    status: 400,
                    message: "INVALID_ARGUMENT".to_string(),
                }
                .into());
            }
            sizes.push(writes.len());
            Ok(CommitResult {
                write_count: writes.len(),
                commit_time: None,
            })
        }

        fn target(&self) -> String {
            "counting".to_string()
        }
    }

    fn seed_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn run(path: &std::path::Path, batch_size: i64, dry_run: bool) -> SeedRun {
        SeedRun {
            seed_pack_path: path.to_path_buf(),
            batch_size: BatchSize::clamped(batch_size),
            mode: WriteMode::Merge,
            dry_run,
        }
    }

    const FIVE_ITEMS: &str = r#"{
        "a": [{"id": "1", "data": {}}, {"id": "2", "data": {}}, {"id": "3", "data": {}}],
        "b": [{"id": "4", "data": {}}, {"id": "5", "data": {}}]
    }"#;

    #[tokio::test]
    async fn test_writes_in_batches() {
        let file = seed_file(FIVE_ITEMS);
        let store = Arc::new(CountingStore::default());
        let mut coordinator = SeedCoordinator::new(run(file.path(), 2, false), store.clone());

        let summary = coordinator.execute().await.unwrap();

        assert_eq!(summary.outcome, SeedOutcome::Completed);
        assert_eq!(summary.written, 5);
        assert_eq!(summary.batches_committed, 3);
        assert_eq!(*store.batch_sizes.lock().unwrap(), vec![2, 2, 1]);
        assert_eq!(coordinator.stage(), RunStage::Complete);
    }

    #[tokio::test]
    async fn test_failed_commit_keeps_earlier_batches() {
        let file = seed_file(FIVE_ITEMS);
        let store = Arc::new(CountingStore {
            fail_on: Some(1),
            ..Default::default()
        });
        let mut coordinator = SeedCoordinator::new(run(file.path(), 2, false), store.clone());

        let err = coordinator.execute().await.unwrap_err();

        assert!(matches!(err, SeedError::Commit(_)));
        assert_eq!(*store.batch_sizes.lock().unwrap(), vec![2]);
        assert_eq!(coordinator.stage(), RunStage::Failed);
    }

    #[tokio::test]
    async fn test_dry_run_stage() {
        let file = seed_file(FIVE_ITEMS);
        let store = Arc::new(CountingStore::default());
        let mut coordinator = SeedCoordinator::new(run(file.path(), 450, true), store.clone());

        let summary = coordinator.execute().await.unwrap();

        assert_eq!(summary.outcome, SeedOutcome::DryRun);
        assert_eq!(summary.collections, vec!["a", "b"]);
        assert!(store.batch_sizes.lock().unwrap().is_empty());
        assert_eq!(coordinator.stage(), RunStage::DryReported);
    }

    #[tokio::test]
    async fn test_shape_error_fails_before_writing() {
        let file = seed_file(r#"{"a": [{"id": "1", "data": {}}, {"id": "", "data": {}}]}"#);
        let store = Arc::new(CountingStore::default());
        let mut coordinator = SeedCoordinator::new(run(file.path(), 1, false), store.clone());

        let err = coordinator.execute().await.unwrap_err();

        assert!(matches!(err, SeedError::Shape(_)));
        assert!(store.batch_sizes.lock().unwrap().is_empty());
        assert_eq!(coordinator.stage(), RunStage::Failed);
    }

    #[tokio::test]
    async fn test_missing_seed_pack() {
        let store = Arc::new(CountingStore::default());
        let mut coordinator = SeedCoordinator::new(
            run(std::path::Path::new("/nonexistent/seed_pack.json"), 450, false),
            store,
        );

        let err = coordinator.execute().await.unwrap_err();
        assert!(matches!(err, SeedError::NotFound { .. }));
    }

    #[test]
    fn test_seed_run_from_config() {
        let config = SeedConfig {
            batch_size: 0,
            merge: false,
            dry_run: true,
            ..Default::default()
        };
        let run = SeedRun::from_config(&config);
        assert_eq!(run.batch_size.get(), 1);
        assert_eq!(run.mode, WriteMode::Overwrite);
        assert!(run.dry_run);
        assert_eq!(run.seed_pack_path, PathBuf::from("seed_pack.json"));
    }
}
