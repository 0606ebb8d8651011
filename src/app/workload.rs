//! Producer/consumer stress workload
//!
//! Producer threads append tagged items; consumer tasks pop until they see
//! `miss_limit` consecutive empty polls after all producers have finished.
//! Between polls a consumer waits on the readiness signal, raced against an
//! idle timeout and the shutdown broadcast. The run is then verified: every
//! item delivered once, and each producer's items at a given level observed
//! in append order by every consumer.

use crate::core::shutdown::ShutdownCoordinator;
use crate::queue::{Priority, PriorityQueue, LEVEL_COUNT};
use rand::Rng;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use strum::IntoEnumIterator;
use tokio::task::JoinSet;

#[derive(Debug, thiserror::Error)]
pub enum WorkloadError {
    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Lost items: produced {produced}, received {received}, still queued {remaining}")]
    Lost {
        produced: usize,
        received: usize,
        remaining: usize,
    },

    #[error("{count} item(s) delivered more than once")]
    Duplicated { count: usize },

    #[error(
        "Order violation: producer {producer} at {priority} delivered sequence {sequence} after {previous}"
    )]
    OrderViolation {
        producer: usize,
        priority: Priority,
        previous: usize,
        sequence: usize,
    },
}

pub type WorkloadResult<T> = Result<T, WorkloadError>;

/// How producers choose item priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityMode {
    Random,
    Fixed(Priority),
}

impl PriorityMode {
    fn pick(&self, rng: &mut impl Rng) -> Priority {
        match self {
            Self::Fixed(priority) => *priority,
            Self::Random => {
                let index = rng.random_range(0..LEVEL_COUNT);
                Priority::iter().nth(index).unwrap_or_default()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkloadSettings {
    pub producers: usize,
    pub consumers: usize,
    pub items_per_producer: usize,
    pub miss_limit: usize,
    pub idle_timeout: Duration,
    pub priority_mode: PriorityMode,
}

/// Item carried through the queue during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkItem {
    pub producer: usize,
    pub sequence: usize,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkloadReport {
    pub producers: usize,
    pub consumers: usize,
    pub produced: usize,
    pub received: usize,
    pub remaining: usize,
    pub per_priority: BTreeMap<Priority, usize>,
    pub per_consumer: Vec<usize>,
    pub elapsed_ms: u64,
    pub interrupted: bool,
}

impl WorkloadReport {
    pub fn render_text(&self, color: bool) -> String {
        use colored::Colorize;

        let status = match (self.interrupted, color) {
            (true, true) => "interrupted".yellow().to_string(),
            (true, false) => "interrupted".to_string(),
            (false, true) => "verified".green().to_string(),
            (false, false) => "verified".to_string(),
        };

        let mut out = format!(
            "{} producers, {} consumers: {} produced, {} received in {} ms ({})\n",
            self.producers, self.consumers, self.produced, self.received, self.elapsed_ms, status
        );
        for priority in Priority::highest_first() {
            let count = self.per_priority.get(&priority).copied().unwrap_or(0);
            out.push_str(&format!("  {:<8} {}\n", priority.name(), count));
        }
        for (index, count) in self.per_consumer.iter().enumerate() {
            out.push_str(&format!("  consumer-{} {}\n", index, count));
        }
        if self.remaining > 0 {
            out.push_str(&format!("  still queued {}\n", self.remaining));
        }
        out
    }
}

/// Run the workload until it drains or `coordinator` requests shutdown
pub async fn run(
    settings: WorkloadSettings,
    coordinator: ShutdownCoordinator,
) -> WorkloadResult<WorkloadReport> {
    let started = Instant::now();
    let queue = Arc::new(PriorityQueue::new());
    let producers_done = Arc::new(AtomicBool::new(false));

    log::info!(
        "starting run: {} producers x {} items, {} consumers, priorities {:?}",
        settings.producers,
        settings.items_per_producer,
        settings.consumers,
        settings.priority_mode
    );

    let mut consumers = JoinSet::new();
    for consumer_id in 0..settings.consumers {
        consumers.spawn(consume(
            consumer_id,
            Arc::clone(&queue),
            Arc::clone(&producers_done),
            coordinator.clone(),
            settings.miss_limit,
            settings.idle_timeout,
        ));
    }

    let mut producers = JoinSet::new();
    for producer_id in 0..settings.producers {
        let queue = Arc::clone(&queue);
        let coordinator = coordinator.clone();
        let items = settings.items_per_producer;
        let mode = settings.priority_mode;
        producers.spawn_blocking(move || produce(producer_id, &queue, &coordinator, items, mode));
    }

    let mut produced = 0;
    while let Some(result) = producers.join_next().await {
        produced += result?;
    }
    producers_done.store(true, Ordering::Release);
    log::debug!("producers finished after {} items", produced);

    let mut per_consumer_items = Vec::with_capacity(settings.consumers);
    while let Some(result) = consumers.join_next().await {
        per_consumer_items.push(result?);
    }
    per_consumer_items.sort_by_key(|(consumer_id, _)| *consumer_id);

    let interrupted = coordinator.is_shutdown_requested();
    let received: Vec<&[WorkItem]> = per_consumer_items
        .iter()
        .map(|(_, items)| items.as_slice())
        .collect();
    verify(&received, produced, queue.len(), interrupted)?;

    let mut per_priority: BTreeMap<Priority, usize> = Priority::iter().map(|p| (p, 0)).collect();
    for item in received.iter().flat_map(|items| items.iter()) {
        *per_priority.entry(item.priority).or_insert(0) += 1;
    }

    let report = WorkloadReport {
        producers: settings.producers,
        consumers: settings.consumers,
        produced,
        received: received.iter().map(|items| items.len()).sum(),
        remaining: queue.len(),
        per_priority,
        per_consumer: received.iter().map(|items| items.len()).collect(),
        elapsed_ms: started.elapsed().as_millis() as u64,
        interrupted,
    };
    log::info!(
        "run finished: {} received in {} ms",
        report.received,
        report.elapsed_ms
    );
    Ok(report)
}

fn produce(
    producer_id: usize,
    queue: &PriorityQueue<WorkItem>,
    coordinator: &ShutdownCoordinator,
    items: usize,
    mode: PriorityMode,
) -> usize {
    let mut rng = rand::rng();
    for sequence in 0..items {
        if coordinator.is_shutdown_requested() {
            log::debug!("producer {} stopped at {}", producer_id, sequence);
            return sequence;
        }
        let priority = mode.pick(&mut rng);
        queue.append_priority(
            WorkItem {
                producer: producer_id,
                sequence,
                priority,
            },
            priority,
        );
    }
    items
}

async fn consume(
    consumer_id: usize,
    queue: Arc<PriorityQueue<WorkItem>>,
    producers_done: Arc<AtomicBool>,
    coordinator: ShutdownCoordinator,
    miss_limit: usize,
    idle_timeout: Duration,
) -> (usize, Vec<WorkItem>) {
    let ready = queue.signal();
    let mut shutdown_rx = coordinator.subscribe();
    let mut received = Vec::new();
    let mut misses = 0;

    loop {
        if let Some(item) = queue.next() {
            received.push(item);
            misses = 0;
            if received.len() % 1024 == 0 {
                tokio::task::yield_now().await;
            }
            continue;
        }

        if producers_done.load(Ordering::Acquire) {
            misses += 1;
            if misses >= miss_limit {
                break;
            }
        }

        tokio::select! {
            _ = coordinator.wait(&mut shutdown_rx) => {
                log::debug!("consumer {} cancelled", consumer_id);
                break;
            }
            woke = tokio::time::timeout(idle_timeout, ready.wait_async()) => {
                if let Ok(false) = woke {
                    break;
                }
            }
        }
    }

    log::debug!("consumer {} done with {} items", consumer_id, received.len());
    (consumer_id, received)
}

/// Check delivery counts, uniqueness and per-producer level ordering
pub fn verify(
    received: &[&[WorkItem]],
    produced: usize,
    remaining: usize,
    interrupted: bool,
) -> WorkloadResult<()> {
    for items in received {
        let mut last_seen: HashMap<(usize, Priority), usize> = HashMap::new();
        for item in items.iter() {
            if let Some(previous) = last_seen.insert((item.producer, item.priority), item.sequence)
            {
                if previous >= item.sequence {
                    return Err(WorkloadError::OrderViolation {
                        producer: item.producer,
                        priority: item.priority,
                        previous,
                        sequence: item.sequence,
                    });
                }
            }
        }
    }

    let total: usize = received.iter().map(|items| items.len()).sum();
    let unique: HashSet<&WorkItem> = received.iter().flat_map(|items| items.iter()).collect();
    if unique.len() != total {
        return Err(WorkloadError::Duplicated {
            count: total - unique.len(),
        });
    }

    // An interrupted run may legitimately leave items queued
    let accounted = if interrupted { total + remaining } else { total };
    if accounted != produced {
        return Err(WorkloadError::Lost {
            produced,
            received: total,
            remaining,
        });
    }
    Ok(())
}
