//! Engine loop tests on a paused tokio clock.

use std::time::Duration;

use ar_tetris::core::{Board, EventSink, FnSink, GameState, NullSink};
use ar_tetris::engine::{spawn_engine, ChannelSink, EngineCommand, EngineConfig, EngineRuntime, JsonLinesSink};
use ar_tetris::types::{GameAction, GameEvent, GamePhase, PieceKind};
use tokio::time::sleep;

fn full_bottom_row() -> Board {
    Board::from_rows(&["##########"])
}

fn blocked_spawn() -> Board {
    let mut board = Board::new();
    for x in 3..=6 {
        board.set(x, 0, Some(PieceKind::L));
        board.set(x, 1, Some(PieceKind::L));
    }
    board
}

#[tokio::test(start_paused = true)]
async fn gravity_follows_speed_after_line_clear() {
    let (sink, mut rx) = ChannelSink::channel();
    let (handle, join) = spawn_engine(GameState::new(3), 8, sink);

    // The preset bottom row is already full; the first lock clears it.
    assert!(handle.send(EngineCommand::StartWithBoard(full_bottom_row())));
    assert!(handle.send_action(GameAction::HardDrop));

    sleep(Duration::from_millis(10)).await;
    let snap = handle.snapshot();
    assert_eq!(snap.score, 100);
    assert_eq!(snap.drop_interval_ms, 780);
    assert_eq!(snap.active.unwrap().y, 0);

    // First tick at the new 780ms period, counted from the clear.
    sleep(Duration::from_millis(775)).await;
    assert_eq!(handle.snapshot().active.unwrap().y, 1);
    sleep(Duration::from_millis(780)).await;
    assert_eq!(handle.snapshot().active.unwrap().y, 2);

    let mut seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        seen.push(event);
    }
    assert_eq!(
        seen,
        vec![
            GameEvent::Started,
            GameEvent::HardDropped,
            GameEvent::LinesCleared { lines: 1, points: 100 },
        ]
    );

    handle.send(EngineCommand::Shutdown);
    let state = join.await.unwrap();
    assert_eq!(state.score(), 100);
}

#[tokio::test(start_paused = true)]
async fn game_over_stops_gravity() {
    let (sink, mut rx) = ChannelSink::channel();
    let (mut handle, join) = spawn_engine(GameState::new(3), 8, sink);

    assert!(handle.send(EngineCommand::StartWithBoard(blocked_spawn())));
    let snap = handle.changed().await.unwrap();
    assert_eq!(snap.phase, GamePhase::GameOver);

    sleep(Duration::from_secs(60)).await;
    assert_eq!(handle.snapshot(), snap);

    assert_eq!(rx.try_recv().ok(), Some(GameEvent::Started));
    assert_eq!(rx.try_recv().ok(), Some(GameEvent::GameOver { score: 0 }));
    assert!(rx.try_recv().is_err());

    drop(handle);
    join.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn reset_returns_to_idle_and_stops_gravity() {
    let (handle, join) = spawn_engine(GameState::new(3), 8, NullSink);

    handle.send_action(GameAction::Start);
    sleep(Duration::from_millis(1700)).await;
    assert_eq!(handle.snapshot().active.unwrap().y, 2);

    handle.send(EngineCommand::Reset);
    sleep(Duration::from_millis(10)).await;
    let snap = handle.snapshot();
    assert_eq!(snap.phase, GamePhase::Idle);
    assert!(snap.active.is_none());

    sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.snapshot(), snap);

    drop(handle);
    join.await.unwrap();
}

#[tokio::test]
async fn full_queue_drops_commands() {
    let (handle, join) = spawn_engine(GameState::new(3), 1, NullSink);

    // The loop has not been polled yet on this single-threaded runtime.
    assert!(handle.send_action(GameAction::Start));
    assert!(!handle.send_action(GameAction::HardDrop));

    drop(handle);
    let state = join.await.unwrap();
    assert!(state.is_playing());
    assert_eq!(state.pieces_spawned(), 1);
}

#[test]
fn engine_runtime_round_trip() {
    let config = EngineConfig {
        seed: 11,
        ..EngineConfig::default()
    };
    let engine = EngineRuntime::start(&config, NullSink).unwrap();
    assert!(engine.send_action(GameAction::Start));
    assert!(engine.send_action(GameAction::HardDrop));

    let mut waited = 0;
    while engine.snapshot().pieces_spawned < 2 {
        std::thread::sleep(Duration::from_millis(5));
        waited += 1;
        assert!(waited < 400, "engine never processed the commands");
    }

    let state = engine.shutdown().unwrap();
    assert!(state.is_playing());
    assert_eq!(state.board().occupied_count(), 4);
}

#[test]
fn shutdown_with_full_queue_returns() {
    let config = EngineConfig {
        seed: 5,
        max_pending_commands: 1,
        ..EngineConfig::default()
    };
    // A slow sink keeps the loop busy while the queue fills up.
    let sink = FnSink(|event: &GameEvent| {
        if *event == GameEvent::Started {
            std::thread::sleep(Duration::from_millis(300));
        }
    });
    let engine = EngineRuntime::start(&config, sink).unwrap();
    assert!(engine.send_action(GameAction::Start));
    std::thread::sleep(Duration::from_millis(50));
    assert!(engine.send_action(GameAction::MoveLeft));
    assert!(!engine.send_action(GameAction::MoveRight));

    let (done_tx, done_rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let _ = done_tx.send(engine.shutdown());
    });
    let state = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("shutdown blocked on a full queue")
        .unwrap();
    assert!(state.is_playing());
}

#[test]
fn event_log_lines_parse_back() {
    let mut state = GameState::new(3);
    state.start_with_board(full_bottom_row());
    state.hard_drop();

    let mut sink = JsonLinesSink::new(Vec::new());
    let emitted: Vec<GameEvent> = state.drain_events().collect();
    for event in &emitted {
        sink.notify(event);
    }

    let bytes = sink.into_inner().unwrap();
    let parsed: Vec<GameEvent> = String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(parsed, emitted);

    let value: serde_json::Value = serde_json::to_value(emitted[2]).unwrap();
    assert_eq!(value["type"], "linesCleared");
    assert_eq!(value["points"], 100);
}
