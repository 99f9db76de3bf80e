//! A single solver peer: drives the backtracking search over its own
//! queue of BCBs, asks the manager for more when it runs dry, and donates
//! work directly to another worker when the manager tells it to.
//!
//! Grounded on `original_source/MPI/src/main.c`'s worker loop
//! (`worker_check_messages`, `worker_receive_work`, `worker_send_work`).

use std::time::Duration;

use log::{debug, info};

use crate::backtrack::{build_leaf, next_leaf, Stride};
use crate::bcb::Bcb;
use crate::board::{Grid, SolutionGrid};
use crate::message::{Message, MessageKind};
use crate::queue::Queue;
use crate::transport::{BulkTransfer, Envelope, PeerChannels};
use crate::unknowns::UnknownIndex;
use crate::validator::check_hitori_conditions;

/// How long an idle worker sleeps between inbox polls, so the whole cluster
/// doesn't spin a CPU core per idle rank.
const IDLE_POLL: Duration = Duration::from_micros(200);

/// How many leaves a worker advances through before yielding back to check
/// its inboxes, so a long search doesn't starve the protocol.
const LEAVES_PER_SLICE: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Actively enumerating leaves of the BCB at the front of its queue.
    LocalWork,
    /// Queue is empty, waiting on the manager to send more work (or the
    /// TERMINATE signal).
    Idle,
    /// Sharing its current subspace with one or more followers: still
    /// enumerates leaves itself, using the stride to skip the leaves the
    /// followers own.
    SharingMaster,
    /// A follower in a shared subspace: enumerates leaves with a stride
    /// offset from the master.
    SharingFollower,
    Terminated,
}

/// Outcome of running a worker to completion.
#[derive(Debug, Clone)]
pub enum Outcome {
    Solved(SolutionGrid),
    Exhausted,
}

pub struct Worker {
    rank: usize,
    grid: Grid,
    unknowns: UnknownIndex,
    queue: Queue,
    current: Option<(Bcb, Stride, usize, usize)>, // (bcb, stride, uk_row, uk_idx) cursor for next_leaf resumption
    state: WorkerState,
    channels: PeerChannels,
    /// Whether the manager has already been told this worker has nothing
    /// left to do, so it isn't told twice in a row while waiting.
    reported_finished: bool,
    /// While [`WorkerState::SharingMaster`], the ranks currently following
    /// this worker's active subspace, paired with the stride residue each
    /// was assigned when it joined.
    followers: Vec<(usize, i64)>,
}

impl Worker {
    pub fn new(
        rank: usize,
        grid: Grid,
        unknowns: UnknownIndex,
        queue_capacity: usize,
        channels: PeerChannels,
    ) -> Self {
        Worker {
            rank,
            grid,
            unknowns,
            queue: Queue::new(queue_capacity),
            current: None,
            state: WorkerState::Idle,
            channels,
            reported_finished: false,
            followers: Vec::new(),
        }
    }

    /// Seeds this worker's queue with a subspace to start from.
    pub fn seed(&mut self, bcb: Bcb) {
        self.queue.push(bcb);
    }

    /// Runs the worker until it either finds a solution, observes
    /// termination, or (single-worker case) exhausts its own queue.
    pub fn run(&mut self) -> Outcome {
        loop {
            self.drain_inboxes();
            if self.state == WorkerState::Terminated {
                return Outcome::Exhausted;
            }

            match self.state {
                WorkerState::Idle => {
                    if self.queue.is_empty() && self.current.is_none() {
                        if !self.reported_finished {
                            self.report_finished();
                            self.reported_finished = true;
                        }
                        self.ask_for_work();
                        std::thread::sleep(IDLE_POLL);
                        continue;
                    }
                    self.begin_next_subspace();
                }
                WorkerState::LocalWork | WorkerState::SharingMaster | WorkerState::SharingFollower => {
                    if let Some(solution) = self.work_slice() {
                        self.broadcast_terminate();
                        return Outcome::Solved(solution);
                    }
                }
                WorkerState::Terminated => unreachable!(),
            }
        }
    }

    /// Runs the worker with no manager/peers at all: a single-rank
    /// solve-the-whole-board loop, used for `--workers 1`.
    pub fn run_solo(&mut self, bcb: Bcb) -> Outcome {
        let mut stride = Stride::solo();
        let mut bcb = bcb;
        let mut ok = build_leaf(&self.grid, &mut bcb, &self.unknowns, 0, 0, &mut stride);
        loop {
            if ok {
                if check_hitori_conditions(&self.grid, &bcb.solution) {
                    return Outcome::Solved(bcb.solution);
                }
                ok = next_leaf(&self.grid, &mut bcb, &self.unknowns, &mut stride);
            } else {
                return Outcome::Exhausted;
            }
        }
    }

    fn begin_next_subspace(&mut self) {
        if let Some(bcb) = self.queue.pop_front() {
            self.current = Some((bcb, Stride::solo(), 0, 0));
            self.state = WorkerState::LocalWork;
            self.reported_finished = false;
            self.report_status();
        }
    }

    /// Advances up to [`LEAVES_PER_SLICE`] leaves of the current subspace.
    /// Returns `Some(solution)` the moment a legal complete assignment is
    /// found.
    fn work_slice(&mut self) -> Option<SolutionGrid> {
        let Some((mut bcb, mut stride, uk_row, uk_idx)) = self.current.take() else {
            self.state = WorkerState::Idle;
            return None;
        };

        let mut ok = build_leaf(&self.grid, &mut bcb, &self.unknowns, uk_row, uk_idx, &mut stride);
        for _ in 0..LEAVES_PER_SLICE {
            if !ok {
                break;
            }
            if check_hitori_conditions(&self.grid, &bcb.solution) {
                return Some(bcb.solution);
            }
            ok = next_leaf(&self.grid, &mut bcb, &self.unknowns, &mut stride);
        }

        if ok {
            self.current = Some((bcb, stride, 0, 0));
        } else {
            info!("rank {} exhausted its current solution space", self.rank);
            self.current = None;
            self.followers.clear();
            self.state = WorkerState::Idle;
            self.report_status();
        }
        None
    }

    fn ask_for_work(&self) {
        let _ = self.channels.w2m_tx.send(Envelope {
            from: self.rank,
            payload: Message::new(MessageKind::AskForWork, 0, 0),
        });
    }

    /// This worker's current queue depth as the manager counts it: queued
    /// subspaces plus the one actively being enumerated, if any.
    fn current_queue_size(&self) -> i64 {
        self.queue.len() as i64 + if self.current.is_some() { 1 } else { 0 }
    }

    /// How many peers (including this one) are cooperating on the subspace
    /// currently being enumerated; `0` while idle.
    fn current_sharing_count(&self) -> i64 {
        match &self.current {
            Some((_, stride, _, _)) => stride.total_peers() as i64,
            None => 0,
        }
    }

    /// Reports this worker's current queue size and sharing count to the
    /// manager. Called every time either one changes.
    fn report_status(&self) {
        let _ = self.channels.w2m_tx.send(Envelope {
            from: self.rank,
            payload: Message::new(
                MessageKind::StatusUpdate,
                self.current_queue_size(),
                self.current_sharing_count(),
            ),
        });
    }

    fn report_finished(&self) {
        let _ = self.channels.w2m_tx.send(Envelope {
            from: self.rank,
            payload: Message::new(MessageKind::FinishedSolutionSpace, self.rank as i64, -1),
        });
    }

    fn broadcast_terminate(&self) {
        let _ = self.channels.w2m_tx.send(Envelope {
            from: self.rank,
            payload: Message::new(MessageKind::Terminate, self.rank as i64, -1),
        });
    }

    /// Drains every inbox this worker owns without blocking, applying each
    /// message's effect.
    fn drain_inboxes(&mut self) {
        while let Ok(msg) = self.channels.m2w_rx.try_recv() {
            self.handle_manager_message(msg);
        }
        while let Ok(env) = self.channels.w2w_control_rx.try_recv() {
            self.handle_control_message(env);
        }
        while let Ok(env) = self.channels.w2w_bulk_rx.try_recv() {
            self.handle_bulk_transfer(env);
        }
    }

    fn handle_manager_message(&mut self, msg: Message) {
        debug!("rank {} got manager message {:?}", self.rank, msg.kind);
        match msg.kind {
            MessageKind::Terminate => self.state = WorkerState::Terminated,
            MessageKind::SendWork => self.donate_work(msg.data1 as usize),
            MessageKind::ReceiveWork => { /* the actual BCB arrives on the bulk channel */ }
            MessageKind::FinishedSolutionSpace => self.remove_follower(msg.data1 as usize),
            _ => {}
        }
    }

    /// A follower this worker was acting as master for has been reassigned
    /// elsewhere: drop it from the follower list and shrink the stride.
    fn remove_follower(&mut self, follower: usize) {
        self.followers.retain(|&(rank, _)| rank != follower);
        if let Some((_, stride, _, _)) = self.current.as_mut() {
            *stride = Stride::shared(self.followers.len() + 1, 0);
        }
        if self.followers.is_empty() && self.state == WorkerState::SharingMaster {
            self.state = WorkerState::LocalWork;
        }
        self.report_status();
    }

    fn handle_control_message(&mut self, env: Envelope<Message>) {
        if env.payload.kind == MessageKind::RefreshSolutionSpace {
            if let Some((_, stride, _, _)) = self.current.as_mut() {
                *stride = Stride::shared(env.payload.data2 as usize, env.payload.data1 as usize);
            }
        }
    }

    fn handle_bulk_transfer(&mut self, env: Envelope<BulkTransfer>) {
        let bcb = Bcb::from_wire(&env.payload.wire, self.grid.side(), &self.unknowns);
        let stride = Stride::shared(env.payload.stride_total as usize, env.payload.stride_skip as usize);
        if self.current.is_none() && self.queue.is_empty() {
            self.current = Some((bcb, stride, 0, 0));
            self.state = if stride.total_peers() > 1 {
                WorkerState::SharingFollower
            } else {
                WorkerState::LocalWork
            };
        } else {
            self.queue.push(bcb);
        }
        self.reported_finished = false;
        self.report_status();
    }

    /// Donates work to `destination`: if the queue has spare subspaces,
    /// hands one over outright; otherwise splits the currently active
    /// subspace and starts sharing it by stride, refreshing every follower
    /// already cooperating on it so their stride stays disjoint from the
    /// new joiner's.
    fn donate_work(&mut self, destination: usize) {
        if let Some(bcb) = self.queue.pop_back() {
            let wire = bcb.to_wire(&self.unknowns);
            let _ = self.channels.w2w_bulk_tx[destination].send(Envelope {
                from: self.rank,
                payload: BulkTransfer { wire, stride_skip: 0, stride_total: 1 },
            });
            self.report_status();
            return;
        }

        if let Some((bcb, stride, _, _)) = self.current.as_mut() {
            let joiner_skip = stride.total_peers() as i64;
            let total = stride.total_peers() + 1;
            *stride = Stride::shared(total, 0);
            self.state = WorkerState::SharingMaster;

            let wire = bcb.to_wire(&self.unknowns);
            let _ = self.channels.w2w_bulk_tx[destination].send(Envelope {
                from: self.rank,
                payload: BulkTransfer { wire, stride_skip: joiner_skip, stride_total: total as i64 },
            });

            for &(follower, skip) in &self.followers {
                let _ = self.channels.w2w_control_tx[follower].send(Envelope {
                    from: self.rank,
                    payload: Message::new(MessageKind::RefreshSolutionSpace, skip, total as i64),
                });
            }
            self.followers.push((destination, joiner_skip));
        }
        self.report_status();
    }
}
