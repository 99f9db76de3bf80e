//! Rank 0's manager role: tracks every worker's reported queue size and
//! sharing count, and picks a donor when a worker runs dry.
//!
//! Grounded on `original_source/MPI/src/main.c:manager_consume_message`.

use log::{debug, info};

use crate::message::{Message, MessageKind};
use crate::transport::{Envelope, PeerChannels};

/// `queue_size` sentinel for a follower: it owns no independently giveable
/// subspace of its own, only a shared residue of its master's.
const SATURATED: i64 = -2;

/// What the manager currently believes about one worker. Updated both by
/// the worker's own `STATUS_UPDATE` reports and optimistically by the
/// manager itself the moment it dispatches a split, so it never hands the
/// same donor to two askers before the donor's next report lands.
#[derive(Debug, Clone, Copy)]
pub struct WorkerStatus {
    pub queue_size: i64,
    pub sharing_count: i64,
    /// Rank of the worker this one is following in a shared subspace, or
    /// `-1` if it owns its own work (including while acting as a master).
    pub master: i64,
}

impl WorkerStatus {
    fn fresh() -> Self {
        WorkerStatus { queue_size: 0, sharing_count: 0, master: -1 }
    }
}

pub struct Manager {
    statuses: Vec<WorkerStatus>,
    finished: Vec<bool>,
    channels: PeerChannels,
}

impl Manager {
    pub fn new(num_workers: usize, channels: PeerChannels, initial_queue_sizes: &[i64]) -> Self {
        let mut statuses = vec![WorkerStatus::fresh(); num_workers];
        for (rank, status) in statuses.iter_mut().enumerate().skip(1) {
            if let Some(&seed) = initial_queue_sizes.get(rank) {
                status.queue_size = seed;
            }
        }
        Manager { statuses, finished: vec![false; num_workers], channels }
    }

    /// Runs the manager's message loop until every worker has reported
    /// finished or a `TERMINATE` has been observed. Returns `true` if the
    /// cluster terminated because a solution was found.
    pub fn run(&mut self) -> bool {
        let rx = self.channels.w2m_rx.take().expect("manager channel missing");
        loop {
            if self.finished.iter().skip(1).all(|&f| f) {
                self.broadcast_terminate(-1);
                return false;
            }
            let Ok(env) = rx.recv_timeout(std::time::Duration::from_millis(50)) else {
                continue;
            };
            if self.handle(env) {
                return true;
            }
        }
    }

    /// Returns `true` the moment a worker reports `TERMINATE` (a solution
    /// was found somewhere in the cluster).
    fn handle(&mut self, env: Envelope<Message>) -> bool {
        let source = env.from;
        debug!("manager got {:?} from rank {source}", env.payload.kind);
        match env.payload.kind {
            MessageKind::Terminate => {
                self.broadcast_terminate(source as i64);
                return true;
            }
            MessageKind::StatusUpdate => {
                self.statuses[source].queue_size = env.payload.data1;
                self.statuses[source].sharing_count = env.payload.data2;
                if env.payload.data1 < 0 {
                    self.finished[source] = true;
                }
            }
            MessageKind::FinishedSolutionSpace => {
                self.finished[source] = true;
            }
            MessageKind::AskForWork => self.dispatch(source),
            _ => {}
        }
        false
    }

    fn broadcast_terminate(&self, found_by: i64) {
        if let Some(m2w) = &self.channels.m2w_tx {
            for tx in m2w {
                let _ = tx.send(Message::new(MessageKind::Terminate, found_by, -1));
            }
        }
        info!("manager broadcasting termination (found_by={found_by})");
    }

    /// Picks the donor with the smallest positive queue size, breaking ties
    /// by the smallest sharing count, and tells it to send work to
    /// `asker`. Optimistically updates both rows so a second `ASK_FOR_WORK`
    /// landing before either side's next report doesn't pick, or revisit,
    /// the same donor inconsistently.
    fn dispatch(&mut self, asker: usize) {
        let previous_master = self.statuses[asker].master;
        self.statuses[asker] = WorkerStatus { queue_size: 0, sharing_count: 0, master: -1 };

        let donor = self
            .statuses
            .iter()
            .enumerate()
            .filter(|(rank, status)| *rank != asker && status.queue_size > 0 && status.master < 0)
            .min_by_key(|(_, status)| (status.queue_size, status.sharing_count))
            .map(|(rank, _)| rank);

        let Some(donor) = donor else {
            debug!("manager has no donor for rank {asker}, sending it TERMINATE");
            if let Some(m2w) = &self.channels.m2w_tx {
                let _ = m2w[asker].send(Message::new(MessageKind::Terminate, asker as i64, -1));
            }
            self.finished[asker] = true;
            return;
        };

        let donor_queue_size = self.statuses[donor].queue_size;
        if donor_queue_size == 1 {
            self.statuses[donor].sharing_count += 1;
            self.statuses[asker].master = donor as i64;
            self.statuses[asker].queue_size = SATURATED;
            self.statuses[asker].sharing_count = self.statuses[donor].sharing_count;
        } else {
            self.statuses[donor].queue_size -= 1;
            self.statuses[asker].queue_size = 1;
            self.statuses[asker].sharing_count = 1;
            self.statuses[asker].master = -1;
        }
        self.finished[asker] = false;

        if let Some(m2w) = &self.channels.m2w_tx {
            let _ = m2w[donor].send(Message::new(MessageKind::SendWork, asker as i64, donor_queue_size));
            let _ = m2w[asker].send(Message::new(MessageKind::ReceiveWork, donor as i64, 0));

            if previous_master >= 0 {
                let previous_master = previous_master as usize;
                if !self.finished[previous_master] {
                    let _ = m2w[previous_master]
                        .send(Message::new(MessageKind::FinishedSolutionSpace, asker as i64, -1));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport;

    #[test]
    fn dispatch_splits_a_donor_with_spare_queue_depth() {
        let peers = transport::build(3);
        let manager_channels = peers.into_iter().next().unwrap();
        let mut manager = Manager::new(3, manager_channels, &[]);
        manager.statuses[1] = WorkerStatus { queue_size: 3, sharing_count: 0, master: -1 };
        manager.statuses[2] = WorkerStatus { queue_size: 5, sharing_count: 2, master: -1 };

        manager.dispatch(0);
        assert_eq!(manager.statuses[1].queue_size, 2);
        assert_eq!(manager.statuses[0].queue_size, 1);
        assert_eq!(manager.statuses[0].sharing_count, 1);
        assert_eq!(manager.statuses[0].master, -1);
    }

    #[test]
    fn dispatch_turns_a_single_item_donor_into_a_sharing_master() {
        let peers = transport::build(3);
        let manager_channels = peers.into_iter().next().unwrap();
        let mut manager = Manager::new(3, manager_channels, &[]);
        manager.statuses[1] = WorkerStatus { queue_size: 1, sharing_count: 0, master: -1 };

        manager.dispatch(0);
        assert_eq!(manager.statuses[1].queue_size, 1, "the master keeps its one active subspace");
        assert_eq!(manager.statuses[1].sharing_count, 1);
        assert_eq!(manager.statuses[0].master, 1);
        assert_eq!(manager.statuses[0].queue_size, SATURATED);
        assert_eq!(manager.statuses[0].sharing_count, 1);
    }

    #[test]
    fn dispatch_skips_followers_when_picking_a_donor() {
        let peers = transport::build(3);
        let manager_channels = peers.into_iter().next().unwrap();
        let mut manager = Manager::new(3, manager_channels, &[]);
        // Rank 1 nominally reports a positive queue size but is a follower
        // of rank 2, so it must not be picked as a donor.
        manager.statuses[1] = WorkerStatus { queue_size: 4, sharing_count: 1, master: 2 };
        manager.statuses[2] = WorkerStatus { queue_size: 0, sharing_count: 1, master: -1 };

        manager.dispatch(0);
        assert_eq!(manager.statuses[0].master, -1, "no eligible donor exists");
    }

    #[test]
    fn dispatch_notifies_a_previous_master_when_its_follower_is_reassigned() {
        let mut peers = transport::build(4);
        let manager_channels = peers.remove(0);
        let mut manager = Manager::new(4, manager_channels, &[]);
        manager.statuses[0].master = 1; // rank 0 was following rank 1
        manager.statuses[2] = WorkerStatus { queue_size: 4, sharing_count: 0, master: -1 };

        manager.dispatch(0);
        assert_eq!(manager.statuses[0].master, -1, "rank 0 now owns its own queue item outright");

        let notified = peers[0].m2w_rx.try_recv().expect("rank 1 should be notified its follower left");
        assert_eq!(notified.kind, MessageKind::FinishedSolutionSpace);
        assert_eq!(notified.data1, 0);
    }

    #[test]
    fn no_donor_sends_terminate_and_marks_the_requester_finished() {
        let peers = transport::build(2);
        let manager_channels = peers.into_iter().next().unwrap();
        let mut manager = Manager::new(2, manager_channels, &[]);
        manager.dispatch(1);
        assert_eq!(manager.statuses[0].sharing_count, 0);
        assert!(manager.finished[1]);
    }
}
