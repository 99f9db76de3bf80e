//! The wire messages exchanged over the four logical channels.
//!
//! Grounded on `original_source/MPI/include/common.h`'s `MessageType` and
//! `Message` struct: a small fixed-shape envelope reused for every message
//! kind, with `data1`/`data2` meaning different things depending on `kind`.

/// Discriminates what a [`Message`]'s `data1`/`data2` fields mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Sent worker → manager (or manager → worker, to fan it out) to signal
    /// that a solution was found or the search is over everywhere.
    /// `data1`: the rank that first observed termination.
    Terminate,
    /// Worker → manager: `data1` = current queue size (`-1` if finished),
    /// `data2` = number of peers sharing this worker's current subspace.
    StatusUpdate,
    /// Worker → manager: this worker's queue is empty, send it work.
    AskForWork,
    /// Manager → worker: split your queue and mail a BCB to `data1`;
    /// `data2` is the queue size the manager last believed this worker had.
    SendWork,
    /// Manager → worker: `data1` is the rank that will send you a BCB next.
    ReceiveWork,
    /// Worker → manager: `data1` finished exploring its solution space.
    /// Manager → worker: a peer this worker was acting as master for has
    /// left; `data1` is that peer's rank.
    FinishedSolutionSpace,
    /// Worker → worker, over the dedicated bulk channel: hands over a BCB.
    /// `data1`/`data2` carry the stride state ([`crate::backtrack::Stride`])
    /// for the subspace being split.
    WorkerSendWork,
    /// Worker → worker, over the dedicated control channel: refreshes the
    /// stride state for a subspace both peers are now sharing. `data1` is
    /// the receiver's skip, `data2` is the new total peer count.
    RefreshSolutionSpace,
}

/// A fixed-shape message envelope. `invalid` mirrors the source's sentinel
/// for "this status update is now stale, ignore it" rather than using a
/// separate out-of-band cancellation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub data1: i64,
    pub data2: i64,
    pub invalid: bool,
}

impl Message {
    pub fn new(kind: MessageKind, data1: i64, data2: i64) -> Self {
        Message { kind, data1, data2, invalid: false }
    }
}
