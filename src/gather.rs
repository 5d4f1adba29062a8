//! The one synchronization point of a render.  Every worker hands in
//! its band of pixels, and the root copies each band into its slice
//! of the final image.
//!
//! The bands are not all the same size.  When the height doesn't
//! divide evenly by the number of workers, the last worker's band is
//! taller than the rest, so the gather is driven by a per-worker byte
//! count and displacement rather than one shared chunk size.  Sizing
//! every slot by the first worker's band would drop the leftover rows
//! on the floor.

use crate::buffer::PixelBuffer;
use crate::errors::RenderError;
use crate::group::{Endpoint, ROOT};
use crate::partition::WorkerAssignment;
use crate::planes::RenderConfig;

/// Variable-count gather.  Every rank passes the bytes it is
/// contributing.  On the root, `counts[r]` is the number of bytes
/// rank `r` must send and `displs[r]` is where they go in the
/// receive buffer, which is `counts.iter().sum()` bytes long.
///
/// Contributions are placed by their sender's rank, so the order in
/// which they happen to arrive doesn't matter.  The root returns the
/// assembled bytes; everyone else returns `None` as soon as their
/// bytes are on their way.
pub fn gatherv(
    endpoint: &Endpoint,
    send: &[u8],
    counts: &[usize],
    displs: &[usize],
) -> Result<Option<Vec<u8>>, RenderError> {
    let inbox = match endpoint.inbox() {
        Some(inbox) => inbox,
        None => {
            endpoint.send_to_root(send.to_vec())?;
            return Ok(None);
        }
    };

    let size = endpoint.size();
    if counts.len() != size || displs.len() != size {
        return Err(RenderError::Config(format!(
            "Gathering from {} workers needs {} counts and displacements, got {} and {}.",
            size,
            size,
            counts.len(),
            displs.len()
        )));
    }

    // The slots must tile the receive buffer: no gaps, no overlaps.
    let total: usize = counts.iter().sum();
    let mut slots: Vec<usize> = (0..size).collect();
    slots.sort_by_key(|&rank| (displs[rank], counts[rank]));
    let mut next = 0;
    for rank in slots {
        if displs[rank] != next {
            return Err(RenderError::Config(format!(
                "Worker {}'s slot starts at byte {}, but the slots before it end at {}.",
                rank, displs[rank], next
            )));
        }
        next += counts[rank];
    }

    let mut received = vec![0 as u8; total];
    let mut arrived = vec![false; size];
    let mut place = |rank: usize, bytes: &[u8]| -> Result<(), RenderError> {
        if bytes.len() != counts[rank] {
            return Err(RenderError::AssemblyMismatch {
                rank,
                expected: counts[rank],
                received: bytes.len(),
            });
        }
        received[displs[rank]..displs[rank] + counts[rank]].copy_from_slice(bytes);
        trace!("placed {} bytes from worker {}", bytes.len(), rank);
        Ok(())
    };

    place(ROOT, send)?;
    arrived[ROOT] = true;

    let mut pending = size - 1;
    while pending > 0 {
        let contribution = match inbox.recv() {
            Ok(contribution) => contribution,
            Err(_) => {
                let missing = arrived.iter().position(|&a| !a).unwrap_or(ROOT);
                warn!("worker {} left before contributing", missing);
                return Err(RenderError::WorkerUnreachable(missing));
            }
        };
        let rank = contribution.rank;
        match arrived.get(rank) {
            None => {
                return Err(RenderError::Config(format!(
                    "Worker {} is not part of a group of {}.",
                    rank, size
                )))
            }
            Some(true) => return Err(RenderError::DuplicateContribution(rank)),
            Some(false) => {}
        }
        place(rank, &contribution.bytes)?;
        arrived[rank] = true;
        pending -= 1;
    }

    Ok(Some(received))
}

/// Turns the row assignments into the counts and displacements the
/// gather needs, and the gathered bytes back into an image.
#[derive(Debug)]
pub struct GatherCoordinator {
    width: usize,
    height: usize,
    counts: Vec<usize>,
    displs: Vec<usize>,
}

impl GatherCoordinator {
    /// Each worker owes `rows * width * 3` bytes, which belong at
    /// `start_row * width * 3` in the final image.
    pub fn new(config: &RenderConfig, assignments: &[WorkerAssignment]) -> Self {
        let row_len = PixelBuffer::row_len(config.width());
        GatherCoordinator {
            width: config.width(),
            height: config.height(),
            counts: assignments.iter().map(|a| a.rows() * row_len).collect(),
            displs: assignments.iter().map(|a| a.start_row * row_len).collect(),
        }
    }

    /// Bytes owed by each worker.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Where each worker's bytes land.
    pub fn displacements(&self) -> &[usize] {
        &self.displs
    }

    /// Collective: every worker must call this exactly once with the
    /// buffer it rendered.  The root blocks until every band has
    /// arrived and gets back the whole image; everyone else gets
    /// `None`.
    pub fn assemble(
        &self,
        endpoint: &Endpoint,
        local: PixelBuffer,
    ) -> Result<Option<PixelBuffer>, RenderError> {
        match gatherv(endpoint, local.as_bytes(), &self.counts, &self.displs)? {
            Some(bytes) => {
                debug!(
                    "assembled {} rows from {} workers",
                    self.height,
                    endpoint.size()
                );
                PixelBuffer::from_bytes(self.width, self.height, bytes).map(Some)
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::WorkerGroup;
    use crate::partition::partition;
    use crate::planes::ComplexPlaneWindow;

    fn config(width: usize, height: usize) -> RenderConfig {
        let w = ComplexPlaneWindow::new(-2.0, 1.0, -1.5, 1.5).unwrap();
        RenderConfig::new(width, height, 50, w).unwrap()
    }

    #[test]
    fn counts_follow_uneven_bands() {
        let c = config(2, 10);
        let coordinator = GatherCoordinator::new(&c, &partition(10, 3).unwrap());
        assert_eq!(coordinator.counts(), &[18, 18, 24]);
        assert_eq!(coordinator.displacements(), &[0, 18, 36]);
    }

    #[test]
    fn gatherv_places_by_rank() {
        let counts = [1, 2, 3];
        let displs = [0, 1, 3];
        let group = WorkerGroup::new(3).unwrap();
        let results = group
            .run(|endpoint| {
                let rank = endpoint.rank();
                let bytes = vec![rank as u8 + 1; counts[rank]];
                gatherv(&endpoint, &bytes, &counts, &displs)
            })
            .unwrap();
        let mut results = results.into_iter();
        assert_eq!(
            results.next().unwrap().unwrap(),
            Some(vec![1, 2, 2, 3, 3, 3])
        );
        assert!(results.all(|r| r.unwrap().is_none()));
    }

    #[test]
    fn short_contribution_is_a_mismatch() {
        let counts = [4, 4, 6];
        let displs = [0, 4, 8];
        let group = WorkerGroup::new(3).unwrap();
        let results = group
            .run(|endpoint| {
                // Every worker sends the first worker's count, which is
                // too short for the last one.
                let bytes = vec![7; counts[0]];
                gatherv(&endpoint, &bytes, &counts, &displs)
            })
            .unwrap();
        match results.into_iter().next().unwrap() {
            Err(RenderError::AssemblyMismatch {
                rank: 2,
                expected: 6,
                received: 4,
            }) => {}
            other => panic!("expected a mismatch from worker 2, got {:?}", other),
        }
    }

    #[test]
    fn missing_worker_is_unreachable() {
        let counts = [1, 1, 1];
        let displs = [0, 1, 2];
        let group = WorkerGroup::new(3).unwrap();
        let results = group
            .run(|endpoint| {
                if endpoint.rank() == 1 {
                    return Ok(None);
                }
                gatherv(&endpoint, &[9], &counts, &displs)
            })
            .unwrap();
        match results.into_iter().next().unwrap() {
            Err(RenderError::WorkerUnreachable(1)) => {}
            other => panic!("expected worker 1 to be missing, got {:?}", other),
        }
    }

    #[test]
    fn bad_displacements_are_rejected() {
        let group = WorkerGroup::new(1).unwrap();
        let results = group
            .run(|endpoint| gatherv(&endpoint, &[1, 2], &[2], &[1]))
            .unwrap();
        match results.into_iter().next().unwrap() {
            Err(RenderError::Config(_)) => {}
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_contribution_is_rejected() {
        let counts = [1, 1, 1];
        let displs = [0, 1, 2];
        let group = WorkerGroup::new(3).unwrap();
        let results = group
            .run(|endpoint| match endpoint.rank() {
                // Worker 1 sends twice and worker 2 never does, so the
                // second copy from worker 1 is what arrives next.
                1 => {
                    gatherv(&endpoint, &[1], &counts, &displs)?;
                    gatherv(&endpoint, &[1], &counts, &displs)
                }
                2 => Ok(None),
                _ => gatherv(&endpoint, &[0], &counts, &displs),
            })
            .unwrap();
        match results.into_iter().next().unwrap() {
            Err(RenderError::DuplicateContribution(1)) => {}
            other => panic!("expected worker 1 twice, got {:?}", other),
        }
    }

    #[test]
    fn counts_must_cover_the_group() {
        let group = WorkerGroup::new(3).unwrap();
        let results = group
            .run(|endpoint| gatherv(&endpoint, &[1], &[1, 1], &[0, 1]))
            .unwrap();
        match results.into_iter().next().unwrap() {
            Err(RenderError::Config(_)) => {}
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn overlapping_slots_are_rejected() {
        let group = WorkerGroup::new(3).unwrap();
        let results = group
            .run(|endpoint| gatherv(&endpoint, &[1, 2], &[2, 2, 2], &[0, 1, 4]))
            .unwrap();
        match results.into_iter().next().unwrap() {
            Err(RenderError::Config(_)) => {}
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn empty_slots_may_share_a_displacement() {
        let counts = [0, 0, 2];
        let displs = [0, 0, 0];
        let group = WorkerGroup::new(3).unwrap();
        let results = group
            .run(|endpoint| {
                let bytes = vec![5; counts[endpoint.rank()]];
                gatherv(&endpoint, &bytes, &counts, &displs)
            })
            .unwrap();
        assert_eq!(
            results.into_iter().next().unwrap().unwrap(),
            Some(vec![5, 5])
        );
    }

    #[test]
    fn single_worker_assembles_its_own_rows() {
        let c = config(3, 2);
        let assignments = partition(2, 1).unwrap();
        let coordinator = GatherCoordinator::new(&c, &assignments);
        let group = WorkerGroup::new(1).unwrap();
        let local = PixelBuffer::from_bytes(3, 2, (0..18).collect()).unwrap();
        let expected = local.clone();
        let results = group
            .run(|endpoint| coordinator.assemble(&endpoint, local.clone()))
            .unwrap();
        assert_eq!(results[0].as_ref().unwrap(), &Some(expected));
    }
}
