//! A fixed group of workers, one scoped thread per rank.  Workers
//! share nothing mutable; the only way for them to talk is the
//! one-way channel from every other rank to the root.  The root holds
//! the only receiver and no sender, so if a worker goes away without
//! contributing, the root finds out when the channel disconnects
//! instead of waiting forever.

use crossbeam::channel::{self, Receiver, Sender};

use crate::errors::RenderError;

/// The rank that receives everything.
pub const ROOT: usize = 0;

/// One worker's bytes, tagged with who sent them.
#[derive(Debug)]
pub struct Contribution {
    /// The sender.
    pub rank: usize,
    /// Whatever it sent.
    pub bytes: Vec<u8>,
}

/// A worker's view of the group: who it is, how many of them there
/// are, and its end of the channel to the root.
#[derive(Debug)]
pub struct Endpoint {
    rank: usize,
    size: usize,
    to_root: Option<Sender<Contribution>>,
    inbox: Option<Receiver<Contribution>>,
}

impl Endpoint {
    /// This worker's index.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of workers in the group.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether this worker is the one that assembles the image.
    pub fn is_root(&self) -> bool {
        self.rank == ROOT
    }

    /// Sends bytes to the root.  Fails if the root has already given
    /// up on the gather.
    pub(crate) fn send_to_root(&self, bytes: Vec<u8>) -> Result<(), RenderError> {
        match self.to_root {
            Some(ref tx) => tx
                .send(Contribution {
                    rank: self.rank,
                    bytes,
                })
                .map_err(|_| RenderError::WorkerUnreachable(ROOT)),
            None => Err(RenderError::Config(
                "The root cannot send to itself.".to_string(),
            )),
        }
    }

    /// The root's receiving end; `None` everywhere else.
    pub(crate) fn inbox(&self) -> Option<&Receiver<Contribution>> {
        self.inbox.as_ref()
    }
}

/// Starts and stops the workers.
#[derive(Debug)]
pub struct WorkerGroup {
    endpoints: Vec<Endpoint>,
}

impl WorkerGroup {
    /// Wires up `size` endpoints.  Rank 0 is the root.
    pub fn new(size: usize) -> Result<Self, RenderError> {
        if size == 0 {
            return Err(RenderError::Config(
                "At least one worker is required.".to_string(),
            ));
        }

        let (tx, rx) = channel::unbounded();
        let mut inbox = Some(rx);
        let endpoints = (0..size)
            .map(|rank| {
                if rank == ROOT {
                    Endpoint {
                        rank,
                        size,
                        to_root: None,
                        inbox: inbox.take(),
                    }
                } else {
                    Endpoint {
                        rank,
                        size,
                        to_root: Some(tx.clone()),
                        inbox: None,
                    }
                }
            })
            .collect();
        // Only the workers keep senders.
        drop(tx);

        Ok(WorkerGroup { endpoints })
    }

    /// Number of workers.
    pub fn size(&self) -> usize {
        self.endpoints.len()
    }

    /// Runs `task` once per rank, each on its own thread, and blocks
    /// until every one of them has finished.  Results come back in
    /// rank order.  A panicking worker fails the whole group.
    pub fn run<F, T>(self, task: F) -> Result<Vec<T>, RenderError>
    where
        F: Fn(Endpoint) -> T + Sync,
        T: Send,
    {
        let size = self.endpoints.len();
        debug!("starting {} workers", size);
        let task = &task;
        let joined = crossbeam::scope(|spawner| {
            let handles: Vec<_> = self
                .endpoints
                .into_iter()
                .map(|endpoint| spawner.spawn(move |_| task(endpoint)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Vec<_>>()
        })
        // Every handle is joined above; only a panic in the scope
        // closure itself ends up here.
        .map_err(|_| RenderError::WorkerPanicked(ROOT))?;

        let mut results = Vec::with_capacity(size);
        for (rank, outcome) in joined.into_iter().enumerate() {
            match outcome {
                Ok(result) => results.push(result),
                Err(_) => {
                    warn!("worker {} panicked", rank);
                    return Err(RenderError::WorkerPanicked(rank));
                }
            }
        }
        debug!("all {} workers finished", size);
        Ok(results)
    }
}
