use simsearch::core::cmd::{Cmd, TuiCommand};
use simsearch::core::cmd_executor::CmdExecutor;
use simsearch::infrastructure::search_service::SearchOperation;
use tokio::sync::mpsc;

#[tokio::test]
async fn cmd_executor_sends_tui_command_when_sender_is_present() {
    let mut exec = CmdExecutor::new();
    let (tui_tx, mut tui_rx) = mpsc::unbounded_channel::<TuiCommand>();
    exec.set_tui_sender(tui_tx);

    exec.execute_command(&Cmd::Tui(TuiCommand::Resize {
        width: 80,
        height: 24,
    }))
    .expect("execute_command should succeed");

    match tui_rx.try_recv() {
        Ok(TuiCommand::Resize { width, height }) => {
            assert_eq!(width, 80);
            assert_eq!(height, 24);
        }
        other => panic!("expected a Resize command on tui_rx, got: {:?}", other),
    }
}

#[tokio::test]
async fn cmd_executor_without_senders_drops_host_commands() {
    let exec = CmdExecutor::new();

    let log = exec.execute_commands(&[
        Cmd::Tui(TuiCommand::Resize {
            width: 80,
            height: 24,
        }),
        Cmd::RequestRender,
        Cmd::CancelSearches,
        Cmd::LogInfo {
            message: "hello".to_string(),
        },
    ]);

    assert!(log.iter().all(|line| line.starts_with("✓")));
}

#[tokio::test]
async fn cmd_executor_keeps_search_order() {
    let (search_tx, mut search_rx) = mpsc::unbounded_channel();
    let mut exec = CmdExecutor::new();
    exec.set_search_sender(search_tx);

    exec.execute_commands(&[
        Cmd::Search {
            seq: 1,
            query: "first".to_string(),
        },
        Cmd::batch(vec![
            Cmd::Search {
                seq: 2,
                query: "second".to_string(),
            },
            Cmd::CancelSearches,
        ]),
    ]);

    let mut received = Vec::new();
    while let Ok(op) = search_rx.try_recv() {
        received.push(op);
    }
    assert_eq!(
        received,
        vec![
            SearchOperation::Search {
                seq: 1,
                query: "first".to_string()
            },
            SearchOperation::Search {
                seq: 2,
                query: "second".to_string()
            },
            SearchOperation::CancelAll,
        ]
    );
}
