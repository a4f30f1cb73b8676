//! Interactive session: socket reader, prompt thread and command loop.

use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, ExternalPrinter, error::ReadlineError};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use kanban_realtime_server::infrastructure::dto::websocket::ClientMessage;

use crate::{
    command::{Command, CommandError, HELP, parse_command},
    config::ClientConfig,
    error::ClientError,
    render::render_frame,
};

type Printer = Box<dyn ExternalPrinter + Send>;

/// Prints above the prompt when one is active, to stdout otherwise.
#[derive(Clone, Default)]
struct Output {
    printer: Arc<Mutex<Option<Printer>>>,
}

impl Output {
    fn line(&self, text: String) {
        if let Ok(mut guard) = self.printer.lock()
            && let Some(printer) = guard.as_mut()
        {
            if printer.print(text.clone()).is_ok() {
                return;
            }
        }
        println!("{text}");
    }
}

/// Connect to the hub and run the prompt until `/quit`, EOF or the server closes.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let (stream, _) = connect_async(config.url.as_str())
        .await
        .map_err(|source| ClientError::Connect {
            url: config.url.clone(),
            source,
        })?;
    tracing::info!("Connected to {}", config.url);

    let (mut write, mut read) = stream.split();

    // Prompt runs on its own thread; lines come back over a channel
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    let (printer_tx, printer_rx) = oneshot::channel::<Option<Printer>>();
    std::thread::spawn(move || prompt_loop(line_tx, printer_tx));

    let output = Output::default();
    if let Ok(Some(printer)) = printer_rx.await
        && let Ok(mut guard) = output.printer.lock()
    {
        *guard = Some(printer);
    }

    let reader_output = output.clone();
    let mut reader = tokio::spawn(async move {
        while let Some(frame) = read.next().await {
            match frame {
                Ok(Message::Text(text)) => reader_output.line(render_frame(&text)),
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    for message in startup_messages(&config) {
        send_message(&mut write, &message).await?;
    }

    loop {
        tokio::select! {
            line = line_rx.recv() => {
                let Some(line) = line else { break };
                match parse_command(&line) {
                    Ok(Command::Send(message)) => send_message(&mut write, &message).await?,
                    Ok(Command::Help) => output.line(HELP.to_string()),
                    Ok(Command::Quit) => break,
                    Err(CommandError::Empty) => {}
                    Err(e) => output.line(format!("! {e}")),
                }
            }
            _ = &mut reader => {
                output.line("* server closed the connection".to_string());
                break;
            }
        }
    }

    let _ = write.close().await;
    reader.abort();
    Ok(())
}

/// Frames implied by the command line: join each board, then announce the user
/// on the first one.
fn startup_messages(config: &ClientConfig) -> Vec<ClientMessage> {
    let mut messages: Vec<ClientMessage> = config
        .boards
        .iter()
        .map(|board_id| ClientMessage::JoinBoard {
            board_id: board_id.clone(),
        })
        .collect();
    if let (Some(user_id), Some(board_id)) = (&config.user, config.boards.first()) {
        messages.push(ClientMessage::UserOnline {
            user_id: user_id.clone(),
            board_id: board_id.clone(),
        });
    }
    messages
}

async fn send_message<S>(write: &mut S, message: &ClientMessage) -> Result<(), ClientError>
where
    S: SinkExt<Message, Error = tokio_tungstenite::tungstenite::Error> + Unpin,
{
    let json = serde_json::to_string(message)?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(ClientError::Send)
}

fn prompt_loop(
    line_tx: mpsc::UnboundedSender<String>,
    printer_tx: oneshot::Sender<Option<Printer>>,
) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            tracing::error!("Failed to start prompt: {}", e);
            let _ = printer_tx.send(None);
            return;
        }
    };
    let printer = editor
        .create_external_printer()
        .ok()
        .map(|p| Box::new(p) as Printer);
    let _ = printer_tx.send(printer);

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                if line_tx.send(line).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("Prompt error: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_startup_messages_join_then_announce() {
        // テスト項目: 起動時に全ボードへ参加し、最初のボードでオンライン通知する
        // given (前提条件):
        let config = ClientConfig::try_parse_from([
            "kanban-realtime-client",
            "-b",
            "alpha",
            "-b",
            "beta",
            "-u",
            "u1",
        ])
        .unwrap();

        // when (操作):
        let messages = startup_messages(&config);

        // then (期待する結果):
        assert_eq!(
            messages,
            vec![
                ClientMessage::JoinBoard {
                    board_id: "alpha".to_string()
                },
                ClientMessage::JoinBoard {
                    board_id: "beta".to_string()
                },
                ClientMessage::UserOnline {
                    user_id: "u1".to_string(),
                    board_id: "alpha".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_user_without_board_announces_nothing() {
        // テスト項目: ボード指定がなければオンライン通知はしない
        // given (前提条件):
        let config =
            ClientConfig::try_parse_from(["kanban-realtime-client", "-u", "u1"]).unwrap();

        // then (期待する結果):
        assert!(startup_messages(&config).is_empty());
    }
}
