// THEORY:
// Area searches are independent of each other: nothing is shared between two calls
// except read-only inputs. The `ParallelMatcher` takes advantage of that when the
// automation layer has several reference patterns to check against one capture. It
// owns a small pool of worker tasks fed round-robin by a dispatcher, and each worker
// hands the CPU-bound search to tokio's blocking pool so the async runtime stays free.
//
// Bitmaps and patterns travel as `Arc`s; no pixel data is copied per request.

use std::sync::Arc;

use futures::future::try_join_all;
use log::{debug, error, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::core_modules::area_search::{search_area, AreaMatch};
use crate::core_modules::chunk::chunk::Region;
use crate::core_modules::pixel::pixel::Bitmap;
use crate::core_modules::reference_pattern::ReferencePattern;
use crate::core_modules::similarity::IgnoredChannels;
use crate::error::MatchError;

const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// Configuration for the worker pool.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Number of worker tasks. Zero is treated as one.
    pub worker_count: usize,
    /// Pending requests each worker buffers before the dispatcher waits.
    pub queue_capacity: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            worker_count: num_cpus::get(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// One pattern to look for in one capture.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub pattern: Arc<ReferencePattern>,
    pub bitmap: Arc<Bitmap>,
    pub area: Region,
    pub threshold: f64,
    pub ignored: IgnoredChannels,
}

impl SearchRequest {
    fn run(&self) -> AreaMatch {
        search_area(
            &self.pattern,
            &self.bitmap,
            self.area,
            self.threshold,
            self.ignored,
        )
    }
}

struct SearchTask {
    request: SearchRequest,
    result_sender: oneshot::Sender<AreaMatch>,
}

enum WorkerMessage {
    Search(SearchTask),
    Shutdown,
}

/// A pool of search workers. Must be created from within a tokio runtime.
pub struct ParallelMatcher {
    config: MatcherConfig,
    task_sender: mpsc::UnboundedSender<WorkerMessage>,
    dispatcher: Option<JoinHandle<()>>,
    workers: Vec<JoinHandle<()>>,
}

impl ParallelMatcher {
    pub fn new(mut config: MatcherConfig) -> Self {
        config.worker_count = config.worker_count.max(1);
        config.queue_capacity = config.queue_capacity.max(1);

        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<WorkerMessage>();
        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..config.worker_count)
            .map(|_| mpsc::channel::<WorkerMessage>(config.queue_capacity))
            .unzip();

        let workers = worker_receivers
            .into_iter()
            .enumerate()
            .map(|(worker_id, receiver)| tokio::spawn(Self::run_worker(worker_id, receiver)))
            .collect();

        let dispatcher = tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(message) = task_receiver.recv().await {
                match message {
                    WorkerMessage::Search(task) => {
                        if worker_senders[worker_idx]
                            .send(WorkerMessage::Search(task))
                            .await
                            .is_err()
                        {
                            warn!("search worker {worker_idx} is gone; request dropped");
                        }
                        worker_idx = (worker_idx + 1) % worker_senders.len();
                    }
                    WorkerMessage::Shutdown => {
                        for sender in &worker_senders {
                            let _ = sender.send(WorkerMessage::Shutdown).await;
                        }
                        break;
                    }
                }
            }
        });

        debug!("started {} search workers", config.worker_count);

        Self {
            config,
            task_sender,
            dispatcher: Some(dispatcher),
            workers,
        }
    }

    async fn run_worker(worker_id: usize, mut receiver: mpsc::Receiver<WorkerMessage>) {
        while let Some(message) = receiver.recv().await {
            match message {
                WorkerMessage::Search(task) => {
                    let request = task.request;
                    match tokio::task::spawn_blocking(move || request.run()).await {
                        Ok(result) => {
                            let _ = task.result_sender.send(result);
                        }
                        Err(err) => error!("search worker {worker_id} failed: {err}"),
                    }
                }
                WorkerMessage::Shutdown => break,
            }
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Runs one search on the pool.
    pub async fn search(&self, request: SearchRequest) -> Result<AreaMatch, MatchError> {
        let (result_sender, result_receiver) = oneshot::channel();
        self.task_sender
            .send(WorkerMessage::Search(SearchTask {
                request,
                result_sender,
            }))
            .map_err(|_| MatchError::WorkerUnavailable)?;

        result_receiver.await.map_err(|_| MatchError::WorkerDropped)
    }

    /// Runs every search concurrently. Results keep the order of `requests`.
    pub async fn search_all(
        &self,
        requests: Vec<SearchRequest>,
    ) -> Result<Vec<AreaMatch>, MatchError> {
        try_join_all(requests.into_iter().map(|request| self.search(request))).await
    }

    /// Stops the dispatcher and every worker, waiting for in-flight searches.
    pub async fn shutdown(&mut self) {
        let _ = self.task_sender.send(WorkerMessage::Shutdown);
        if let Some(dispatcher) = self.dispatcher.take() {
            let _ = dispatcher.await;
        }
        for worker in self.workers.drain(..) {
            let _ = worker.await;
        }
    }
}

impl Drop for ParallelMatcher {
    fn drop(&mut self) {
        // Best effort shutdown on drop
        let _ = self.task_sender.send(WorkerMessage::Shutdown);
    }
}
