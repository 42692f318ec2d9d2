//! Engine runtime: serializes commands and gravity onto one task.
//!
//! The loop owns the [`GameState`]. Player commands arrive on a bounded queue; gravity
//! comes from a [`GravityClock`] that is re-armed whenever the game starts, clears
//! lines or changes speed, and disarmed whenever it stops playing. After every
//! transition queued notifications go to the sink and a fresh snapshot is published.

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clock::GravityClock;
use crate::config::EngineConfig;
use crate::core::{Board, EventSink, GameSnapshot, GameState};
use crate::types::{GameAction, GameEvent};

/// Message delivered to the engine loop.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    Action(GameAction),
    /// Start on a prepared board (ignored while playing).
    StartWithBoard(Board),
    Reset,
    Shutdown,
}

/// Cloneable handle for talking to a running engine loop.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
}

impl EngineHandle {
    /// Queue a command without blocking.
    ///
    /// Returns false if the queue is full or the loop has stopped; the command is dropped.
    pub fn send(&self, cmd: EngineCommand) -> bool {
        match self.cmd_tx.try_send(cmd) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(cmd)) => {
                warn!(?cmd, "command queue full; dropping command");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    pub fn send_action(&self, action: GameAction) -> bool {
        self.send(EngineCommand::Action(action))
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        *self.snapshot_rx.borrow()
    }

    /// Wait until a newer snapshot is published. Errors once the loop has exited.
    pub async fn changed(&mut self) -> anyhow::Result<GameSnapshot> {
        self.snapshot_rx
            .changed()
            .await
            .context("engine loop stopped")?;
        Ok(*self.snapshot_rx.borrow_and_update())
    }
}

/// Spawn the engine loop on the current tokio runtime.
///
/// The join handle yields the final state once the loop receives
/// [`EngineCommand::Shutdown`] or every handle is dropped.
pub fn spawn_engine<S>(state: GameState, capacity: usize, sink: S) -> (EngineHandle, JoinHandle<GameState>)
where
    S: EventSink + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel(capacity.max(1));
    let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
    let join = tokio::spawn(run_engine(state, cmd_rx, snapshot_tx, sink));
    (EngineHandle { cmd_tx, snapshot_rx }, join)
}

/// The engine loop. Commands and gravity ticks never overlap.
pub async fn run_engine<S>(
    mut state: GameState,
    mut cmd_rx: mpsc::Receiver<EngineCommand>,
    snapshot_tx: watch::Sender<GameSnapshot>,
    mut sink: S,
) -> GameState
where
    S: EventSink,
{
    let mut clock = GravityClock::new();
    info!(phase = ?state.phase(), "engine loop started");

    loop {
        tokio::select! {
            biased;

            cmd = cmd_rx.recv() => {
                match cmd {
                    None | Some(EngineCommand::Shutdown) => break,
                    Some(EngineCommand::Action(action)) => {
                        let accepted = state.apply_action(action);
                        debug!(action = action.as_str(), accepted, "command");
                    }
                    Some(EngineCommand::StartWithBoard(board)) => {
                        state.start_with_board(board);
                    }
                    Some(EngineCommand::Reset) => {
                        state.reset();
                    }
                }
            }

            _ = clock.tick() => {
                state.tick();
            }
        }

        publish(&mut state, &mut sink, &mut clock, &snapshot_tx);
    }

    info!(score = state.score(), "engine loop stopped");
    state
}

/// Flush notifications, resync gravity and publish a snapshot.
fn publish<S: EventSink>(
    state: &mut GameState,
    sink: &mut S,
    clock: &mut GravityClock,
    snapshot_tx: &watch::Sender<GameSnapshot>,
) {
    let mut restart = false;
    for event in state.drain_events() {
        if matches!(event, GameEvent::Started | GameEvent::LinesCleared { .. }) {
            restart = true;
        }
        sink.notify(&event);
    }

    if clock.sync(state.is_playing(), state.drop_interval_ms(), restart) {
        debug!(period_ms = state.drop_interval_ms(), "gravity armed");
    }

    let snapshot = state.snapshot();
    snapshot_tx.send_if_modified(|current| {
        if *current == snapshot {
            return false;
        }
        *current = snapshot;
        true
    });
}

/// Engine loop hosted on its own tokio runtime, for synchronous front ends.
pub struct EngineRuntime {
    rt: Runtime,
    handle: EngineHandle,
    join: Option<JoinHandle<GameState>>,
}

impl EngineRuntime {
    pub fn start<S>(config: &EngineConfig, sink: S) -> anyhow::Result<Self>
    where
        S: EventSink + Send + 'static,
    {
        let rt = Runtime::new().context("creating engine runtime")?;
        let state = GameState::new(config.seed);
        let (handle, join) = {
            let _guard = rt.enter();
            spawn_engine(state, config.max_pending_commands, sink)
        };
        info!(seed = config.seed, "engine runtime started");

        Ok(Self {
            rt,
            handle,
            join: Some(join),
        })
    }

    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    pub fn send_action(&self, action: GameAction) -> bool {
        self.handle.send_action(action)
    }

    pub fn reset(&self) -> bool {
        self.handle.send(EngineCommand::Reset)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.handle.snapshot()
    }

    /// Stop the loop and return the final state.
    pub fn shutdown(mut self) -> anyhow::Result<GameState> {
        let join = self.join.take().context("engine already stopped")?;
        // Wait for a free slot; a full queue must not swallow the stop request.
        if self
            .rt
            .block_on(self.handle.cmd_tx.send(EngineCommand::Shutdown))
            .is_err()
        {
            debug!("engine loop already stopped");
        }
        let state = self.rt.block_on(join).context("engine loop panicked")?;
        info!("engine runtime stopped");
        Ok(state)
    }
}
