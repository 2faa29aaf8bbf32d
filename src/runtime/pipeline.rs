use std::{path::PathBuf, sync::Arc};

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, trace};

use crate::{
    checkin::{
        classifier::{ClassifierState, DuplicateScope},
        events::ClassifiedEvent,
        source::CheckinSource,
    },
    engine::traits::Aggregator,
    error::{Error, Result},
    roster::Roster,
};

/// Tuning for [`spawn_pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Capacity of both hand-off channels; 1 gives a single-slot hand-off.
    pub channel_bound: usize,
    /// Duplicate scope used by the classifier stage.
    pub scope: DuplicateScope,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channel_bound: 1,
            scope: DuplicateScope::Session,
        }
    }
}

/// Running reader → classifier pipeline; consume it with [`CheckinPipeline::recv`]
/// or [`CheckinPipeline::fold`].
pub struct CheckinPipeline {
    events_rx: mpsc::Receiver<ClassifiedEvent>,
    producer: JoinHandle<Result<()>>,
    classifier: JoinHandle<()>,
}

/// Spawns a producer over `tokens` and a classifier stage behind it.
///
/// Both stages block on the bounded channels, so the classifier never runs
/// more than `channel_bound` items ahead of the consumer. Order is preserved.
pub fn spawn_pipeline<I>(roster: Arc<Roster>, tokens: I, config: PipelineConfig) -> CheckinPipeline
where
    I: IntoIterator<Item = String>,
    I::IntoIter: Send + 'static,
{
    let tokens = tokens.into_iter();
    spawn_stages(roster, config, move |tx| {
        for token in tokens {
            if tx.blocking_send(token).is_err() {
                break;
            }
        }
        Ok(())
    })
}

/// Spawns a pipeline reading the check-in log at `path`.
pub fn spawn_file_pipeline(
    roster: Arc<Roster>,
    path: impl Into<PathBuf>,
    config: PipelineConfig,
) -> Result<CheckinPipeline> {
    let path = path.into();
    let mut source = CheckinSource::open(&path)?;
    debug!(path = %path.display(), "starting check-in pipeline");
    Ok(spawn_stages(roster, config, move |tx| {
        for token in source.by_ref() {
            if tx.blocking_send(token).is_err() {
                break;
            }
        }
        source.finish()
    }))
}

fn spawn_stages<F>(roster: Arc<Roster>, config: PipelineConfig, produce: F) -> CheckinPipeline
where
    F: FnOnce(mpsc::Sender<String>) -> Result<()> + Send + 'static,
{
    let bound = config.channel_bound.max(1);
    let (token_tx, mut token_rx) = mpsc::channel::<String>(bound);
    let (events_tx, events_rx) = mpsc::channel::<ClassifiedEvent>(bound);

    let producer = tokio::task::spawn_blocking(move || produce(token_tx));

    let classifier = tokio::spawn(async move {
        let mut state = ClassifierState::new(config.scope);
        while let Some(token) = token_rx.recv().await {
            let event = state.classify_token(&roster, &token);
            trace!(?event, "classified");
            if events_tx.send(event).await.is_err() {
                return;
            }
        }
        let _ = events_tx.send(state.finish()).await;
    });

    CheckinPipeline {
        events_rx,
        producer,
        classifier,
    }
}

impl CheckinPipeline {
    /// Next classified event, or `None` once the trailing boundary was delivered.
    pub async fn recv(&mut self) -> Option<ClassifiedEvent> {
        self.events_rx.recv().await
    }

    /// Drains the pipeline into `aggregator`, then surfaces any reader failure.
    pub async fn fold<A: Aggregator>(mut self, mut aggregator: A) -> Result<A::Output> {
        while let Some(event) = self.events_rx.recv().await {
            aggregator.observe(&event);
        }
        self.join().await?;
        Ok(aggregator.finish())
    }

    /// Drains remaining events and waits for both stages.
    pub async fn join(mut self) -> Result<()> {
        while self.events_rx.recv().await.is_some() {}
        self.classifier
            .await
            .map_err(|e| Error::Pipeline(format!("classifier task failed: {e}")))?;
        self.producer
            .await
            .map_err(|e| Error::Pipeline(format!("reader task failed: {e}")))?
    }
}
