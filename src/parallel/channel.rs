//! Transport between the master and its workers.
//!
//! The coordinator and workers only see the [`MasterLink`] and
//! [`WorkerLink`] traits. [`create_channels`] provides the in-process
//! implementation on top of `crossbeam-channel`, with one channel per
//! message kind so that a worker's readiness signal and its result batch
//! can be received independently:
//!
//! ```text
//!   workers ──readiness / abort (rank)──▶ master     shared, any-source
//!   worker i ──────── result batch ─────▶ master     one per worker
//!   master ───────── partial solution ──▶ worker i   one per worker
//!   master ──── params / terminate ─────▶ worker i   one per worker
//! ```
//!
//! Every channel is FIFO per sender, which is all the protocol relies on.
//! A worker queues its batch after the readiness signal announcing it, so a
//! batch still queued once that signal has been handled was never announced.

use crate::board::Column;
use crate::error::{QueensError, Result};
use crate::parallel::messages::{Control, Incoming, ProblemParams, Rank, Readiness, MASTER_RANK};
use crossbeam_channel::{select, unbounded, Receiver, Sender, TryRecvError};

/// Master side of the transport.
pub trait MasterLink {
    /// Ranks of every worker, in increasing order.
    fn worker_ranks(&self) -> Vec<Rank>;

    fn send_params(&self, to: Rank, params: ProblemParams) -> Result<()>;

    /// Block until any worker sends a readiness signal.
    fn recv_readiness(&self) -> Result<(Rank, Readiness)>;

    /// Block until `from` sends its result batch.
    fn recv_batch(&self, from: Rank) -> Result<Vec<Column>>;

    /// Take a batch already queued by `from`, without blocking.
    fn pending_batch(&self, from: Rank) -> Result<Option<Vec<Column>>>;

    fn send_work(&self, to: Rank, partial: &[Column]) -> Result<()>;

    fn send_terminate(&self, to: Rank) -> Result<()>;
}

/// Worker side of the transport.
pub trait WorkerLink {
    fn rank(&self) -> Rank;

    /// Block until either a control message or a work unit arrives.
    fn recv_incoming(&self) -> Result<Incoming>;

    fn try_recv_control(&self) -> Result<Option<Control>>;

    fn try_recv_work(&self) -> Result<Option<Vec<Column>>>;

    fn send_readiness(&self, readiness: Readiness) -> Result<()>;

    fn send_batch(&self, batch: Vec<Column>) -> Result<()>;

    /// Tell the master this worker is stopping on a fatal error.
    fn send_abort(&self, reason: &str) -> Result<()>;
}

impl<T: MasterLink + ?Sized> MasterLink for &T {
    fn worker_ranks(&self) -> Vec<Rank> {
        (**self).worker_ranks()
    }

    fn send_params(&self, to: Rank, params: ProblemParams) -> Result<()> {
        (**self).send_params(to, params)
    }

    fn recv_readiness(&self) -> Result<(Rank, Readiness)> {
        (**self).recv_readiness()
    }

    fn recv_batch(&self, from: Rank) -> Result<Vec<Column>> {
        (**self).recv_batch(from)
    }

    fn pending_batch(&self, from: Rank) -> Result<Option<Vec<Column>>> {
        (**self).pending_batch(from)
    }

    fn send_work(&self, to: Rank, partial: &[Column]) -> Result<()> {
        (**self).send_work(to, partial)
    }

    fn send_terminate(&self, to: Rank) -> Result<()> {
        (**self).send_terminate(to)
    }
}

/// What travels on the shared worker-to-master channel.
#[derive(Debug)]
enum Signal {
    Ready(Readiness),
    Abort(String),
}

/// Channel endpoints held by the master.
pub struct ChannelMasterLink {
    readiness: Receiver<(Rank, Signal)>,
    batches: Vec<Receiver<Vec<Column>>>,
    work: Vec<Sender<Vec<Column>>>,
    control: Vec<Sender<Control>>,
}

/// Channel endpoints held by one worker.
pub struct ChannelWorkerLink {
    rank: Rank,
    readiness: Sender<(Rank, Signal)>,
    batch: Sender<Vec<Column>>,
    work: Receiver<Vec<Column>>,
    control: Receiver<Control>,
}

/// Create the transport for a master and `num_workers` workers.
///
/// Worker links are returned in rank order, starting at rank 1.
pub fn create_channels(num_workers: usize) -> (ChannelMasterLink, Vec<ChannelWorkerLink>) {
    let (readiness_tx, readiness_rx) = unbounded();

    let mut batches = Vec::with_capacity(num_workers);
    let mut work = Vec::with_capacity(num_workers);
    let mut control = Vec::with_capacity(num_workers);
    let mut workers = Vec::with_capacity(num_workers);

    for index in 0..num_workers {
        let (batch_tx, batch_rx) = unbounded();
        let (work_tx, work_rx) = unbounded();
        let (control_tx, control_rx) = unbounded();
        batches.push(batch_rx);
        work.push(work_tx);
        control.push(control_tx);
        workers.push(ChannelWorkerLink {
            rank: index + 1,
            readiness: readiness_tx.clone(),
            batch: batch_tx,
            work: work_rx,
            control: control_rx,
        });
    }

    let master = ChannelMasterLink {
        readiness: readiness_rx,
        batches,
        work,
        control,
    };

    (master, workers)
}

impl ChannelMasterLink {
    fn slot<'a, T>(items: &'a [T], rank: Rank) -> Result<&'a T> {
        rank.checked_sub(1)
            .and_then(|index| items.get(index))
            .ok_or_else(|| QueensError::protocol(rank, "no worker with this rank"))
    }
}

impl MasterLink for ChannelMasterLink {
    fn worker_ranks(&self) -> Vec<Rank> {
        (1..=self.work.len()).collect()
    }

    fn send_params(&self, to: Rank, params: ProblemParams) -> Result<()> {
        Self::slot(&self.control, to)?
            .send(Control::Params(params))
            .map_err(|_| QueensError::Disconnected { rank: to })
    }

    fn recv_readiness(&self) -> Result<(Rank, Readiness)> {
        match self.readiness.recv() {
            Ok((rank, Signal::Ready(readiness))) => Ok((rank, readiness)),
            Ok((rank, Signal::Abort(reason))) => Err(QueensError::WorkerAborted { rank, reason }),
            Err(_) => Err(QueensError::WorkersDisconnected),
        }
    }

    fn recv_batch(&self, from: Rank) -> Result<Vec<Column>> {
        Self::slot(&self.batches, from)?
            .recv()
            .map_err(|_| QueensError::Disconnected { rank: from })
    }

    fn pending_batch(&self, from: Rank) -> Result<Option<Vec<Column>>> {
        match Self::slot(&self.batches, from)?.try_recv() {
            Ok(batch) => Ok(Some(batch)),
            // A worker that hung up with nothing queued has nothing pending.
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => Ok(None),
        }
    }

    fn send_work(&self, to: Rank, partial: &[Column]) -> Result<()> {
        Self::slot(&self.work, to)?
            .send(partial.to_vec())
            .map_err(|_| QueensError::Disconnected { rank: to })
    }

    fn send_terminate(&self, to: Rank) -> Result<()> {
        Self::slot(&self.control, to)?
            .send(Control::Terminate)
            .map_err(|_| QueensError::Disconnected { rank: to })
    }
}

fn master_gone() -> QueensError {
    QueensError::Disconnected { rank: MASTER_RANK }
}

fn try_recv_from<T>(rx: &Receiver<T>) -> Result<Option<T>> {
    match rx.try_recv() {
        Ok(value) => Ok(Some(value)),
        Err(TryRecvError::Empty) => Ok(None),
        Err(TryRecvError::Disconnected) => Err(master_gone()),
    }
}

impl WorkerLink for ChannelWorkerLink {
    fn rank(&self) -> Rank {
        self.rank
    }

    fn recv_incoming(&self) -> Result<Incoming> {
        select! {
            recv(self.control) -> msg => msg.map(Incoming::Control).map_err(|_| master_gone()),
            recv(self.work) -> msg => msg.map(Incoming::Work).map_err(|_| master_gone()),
        }
    }

    fn try_recv_control(&self) -> Result<Option<Control>> {
        try_recv_from(&self.control)
    }

    fn try_recv_work(&self) -> Result<Option<Vec<Column>>> {
        try_recv_from(&self.work)
    }

    fn send_readiness(&self, readiness: Readiness) -> Result<()> {
        self.readiness
            .send((self.rank, Signal::Ready(readiness)))
            .map_err(|_| master_gone())
    }

    fn send_batch(&self, batch: Vec<Column>) -> Result<()> {
        self.batch.send(batch).map_err(|_| master_gone())
    }

    fn send_abort(&self, reason: &str) -> Result<()> {
        self.readiness
            .send((self.rank, Signal::Abort(reason.to_string())))
            .map_err(|_| master_gone())
    }
}
