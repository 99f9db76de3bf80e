//! Simulates the four logical MPI channels (W2M, M2W, W2W-control,
//! W2W-bulk) of `original_source/MPI/src/main.c` with
//! `crossbeam-channel`s between OS threads, one thread per simulated rank.
//!
//! Channel *identity* plays the role MPI tags play in the source: each
//! logical channel gets its own `crossbeam_channel`, so a rank never has to
//! disambiguate what a message means by inspecting anything beyond which
//! inbox it arrived on plus the `MessageKind` already carried inside it.
//! Every channel is unbounded and polled with `try_recv`, matching the
//! source's non-blocking `MPI_Irecv`/`MPI_Test` pattern without actually
//! blocking a thread on a handshake.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::message::Message;

/// A message tagged with the rank that sent it — MPI's `MPI_Status.source`
/// has no channel-native equivalent here, so it travels alongside the
/// payload instead.
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    pub from: usize,
    pub payload: T,
}

/// A BCB in flight over the W2W-bulk channel, serialized the way
/// [`crate::bcb::Bcb::to_wire`] produces it, plus the stride state the
/// receiving worker should adopt for the subspace.
#[derive(Debug, Clone)]
pub struct BulkTransfer {
    pub wire: Vec<i32>,
    pub stride_skip: i64,
    pub stride_total: i64,
}

/// This rank's end of every channel it participates in.
pub struct PeerChannels {
    pub rank: usize,

    /// Send a status/work-request message to the manager (rank 0).
    pub w2m_tx: Sender<Envelope<Message>>,
    /// The manager's inbox; `None` for every rank but 0.
    pub w2m_rx: Option<Receiver<Envelope<Message>>>,

    /// The manager's per-worker outboxes; only rank 0 uses this.
    pub m2w_tx: Option<Vec<Sender<Message>>>,
    /// This worker's inbox for manager dispatches.
    pub m2w_rx: Receiver<Message>,

    /// Send a control message (stride refresh) directly to another worker.
    pub w2w_control_tx: Vec<Sender<Envelope<Message>>>,
    /// This worker's control inbox.
    pub w2w_control_rx: Receiver<Envelope<Message>>,

    /// Send a BCB directly to another worker.
    pub w2w_bulk_tx: Vec<Sender<Envelope<BulkTransfer>>>,
    /// This worker's bulk inbox.
    pub w2w_bulk_rx: Receiver<Envelope<BulkTransfer>>,
}

/// Builds the full mesh of channels for `num_workers` simulated ranks (rank
/// 0 doubles as the manager) and returns one [`PeerChannels`] per rank, in
/// rank order.
pub fn build(num_workers: usize) -> Vec<PeerChannels> {
    let (w2m_tx, w2m_rx) = unbounded::<Envelope<Message>>();

    let mut m2w_txs = Vec::with_capacity(num_workers);
    let mut m2w_rxs = Vec::with_capacity(num_workers);
    for _ in 0..num_workers {
        let (tx, rx) = unbounded::<Message>();
        m2w_txs.push(tx);
        m2w_rxs.push(rx);
    }

    let mut control_txs = vec![Vec::with_capacity(num_workers); num_workers];
    let mut control_rxs = Vec::with_capacity(num_workers);
    let mut bulk_txs = vec![Vec::with_capacity(num_workers); num_workers];
    let mut bulk_rxs = Vec::with_capacity(num_workers);
    for dest in 0..num_workers {
        let (ctx, crx) = unbounded::<Envelope<Message>>();
        let (btx, brx) = unbounded::<Envelope<BulkTransfer>>();
        control_rxs.push(crx);
        bulk_rxs.push(brx);
        for src in 0..num_workers {
            if src != dest {
                control_txs[src].push(ctx.clone());
                bulk_txs[src].push(btx.clone());
            } else {
                // keep indices aligned to rank even though a rank never
                // sends itself a message
                control_txs[src].push(ctx.clone());
                bulk_txs[src].push(btx.clone());
            }
        }
    }

    let mut peers = Vec::with_capacity(num_workers);
    for (rank, (m2w_rx, (control_rx, bulk_rx))) in m2w_rxs
        .into_iter()
        .zip(control_rxs.into_iter().zip(bulk_rxs))
        .enumerate()
    {
        peers.push(PeerChannels {
            rank,
            w2m_tx: w2m_tx.clone(),
            w2m_rx: if rank == 0 { Some(w2m_rx.clone()) } else { None },
            m2w_tx: if rank == 0 { Some(m2w_txs.clone()) } else { None },
            m2w_rx,
            w2w_control_tx: control_txs[rank].clone(),
            w2w_control_rx: control_rx,
            w2w_bulk_tx: bulk_txs[rank].clone(),
            w2w_bulk_rx: bulk_rx,
        });
    }
    peers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageKind;

    #[test]
    fn worker_can_reach_manager_and_back() {
        let mut peers = build(3);
        let worker1 = peers.remove(1);
        worker1
            .w2m_tx
            .send(Envelope { from: 1, payload: Message::new(MessageKind::AskForWork, 0, 0) })
            .unwrap();

        let manager = &peers[0];
        let received = manager.w2m_rx.as_ref().unwrap().recv().unwrap();
        assert_eq!(received.from, 1);
        assert_eq!(received.payload.kind, MessageKind::AskForWork);

        manager.m2w_tx.as_ref().unwrap()[1]
            .send(Message::new(MessageKind::ReceiveWork, 2, 0))
            .unwrap();
    }

    #[test]
    fn workers_can_reach_each_other_directly() {
        let peers = build(3);
        peers[1].w2w_control_tx[2]
            .send(Envelope { from: 1, payload: Message::new(MessageKind::RefreshSolutionSpace, 0, 2) })
            .unwrap();
        let received = peers[2].w2w_control_rx.recv().unwrap();
        assert_eq!(received.from, 1);
    }
}
