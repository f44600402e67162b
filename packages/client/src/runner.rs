//! Client execution logic: one session per run, no reconnection.

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use codesync_shared::protocol::ClientEvent;

use crate::{
    command::{Command, HELP, parse_command},
    error::ClientError,
    executor::{Language, RemoteExecutor},
    formatter::MessageFormatter,
    room::RoomView,
    session::{Session, SessionEvent},
    ui::{print_with_prompt, prompt},
};

/// Shown whenever the transport fails
pub const CONNECTION_FAILED_MESSAGE: &str = "Socket connection failed, try again later.";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub url: String,
    pub room_id: String,
    pub username: String,
    pub exec_url: String,
    pub language: Language,
}

/// Whether the input loop keeps going after a command
enum Flow {
    Continue,
    Leave,
}

struct Client {
    session: Session,
    view: RoomView,
    executor: RemoteExecutor,
    language: Language,
    input: String,
    prompt: String,
}

/// Run one interactive session until the user leaves or the transport fails
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    tracing::info!(
        "Connecting to {} as '{}' (room '{}')",
        config.url,
        config.username,
        config.room_id
    );

    let session = match Session::connect(&config.url).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", CONNECTION_FAILED_MESSAGE);
            return Err(e);
        }
    };

    let view = RoomView::new(config.room_id.clone(), config.username.clone());
    let mut client = Client {
        session,
        prompt: prompt(view.username(), view.room_id()),
        view,
        executor: RemoteExecutor::new(config.exec_url),
        language: config.language,
        input: String::new(),
    };

    let join = client.view.join_event();
    if let Err(e) = client.session.emit(&join).await {
        eprintln!("{}", CONNECTION_FAILED_MESSAGE);
        return Err(e);
    }

    println!(
        "\nJoining room '{}' as '{}'. Type :help for commands.\n",
        client.view.room_id(),
        client.view.username()
    );

    let mut input_rx = spawn_readline(client.prompt.clone());

    let result = loop {
        tokio::select! {
            event = client.session.next_event() => {
                if let Err(e) = client.on_session_event(event) {
                    client.view.mark_disconnected();
                    eprintln!("\n{}", CONNECTION_FAILED_MESSAGE);
                    break Err(e);
                }
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // Ctrl+C / Ctrl+D
                    break Ok(());
                };
                match client.on_line(&line).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Leave) => break Ok(()),
                    Err(e) => {
                        eprintln!("\n{}", CONNECTION_FAILED_MESSAGE);
                        break Err(e);
                    }
                }
            }
        }
    };

    if result.is_ok() {
        client.view.mark_disconnected();
        if let Err(e) = client.session.close().await {
            tracing::warn!("Failed to close session: {}", e);
        }
        println!("Left room '{}'.", client.view.room_id());
    }
    result
}

/// Read lines on a blocking thread and forward them to the async loop
fn spawn_readline(prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim_end();
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if input_tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

impl Client {
    fn on_session_event(&mut self, event: Option<SessionEvent>) -> Result<(), ClientError> {
        match event {
            Some(SessionEvent::Event(event)) => {
                for notice in self.view.apply(event) {
                    if let Some(text) = MessageFormatter::format_notice(
                        &notice,
                        self.view.buffer(),
                        self.view.self_id(),
                    ) {
                        print_with_prompt(&text, &self.prompt);
                    }
                }
                Ok(())
            }
            Some(SessionEvent::Malformed(text)) => {
                tracing::warn!("Ignoring malformed frame: {}", text);
                Ok(())
            }
            Some(SessionEvent::Failed(reason)) => Err(ClientError::TransportError(reason)),
            Some(SessionEvent::Closed) | None => Err(ClientError::TransportError(
                "connection closed by relay".to_string(),
            )),
        }
    }

    async fn on_line(&mut self, line: &str) -> Result<Flow, ClientError> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(message) => {
                print_with_prompt(&MessageFormatter::format_error(&message), &self.prompt);
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Append(text) => {
                let event = self.view.append_line(&text);
                self.broadcast(event).await?;
            }
            Command::Clear => {
                let event = self.view.clear();
                self.broadcast(event).await?;
            }
            Command::Load(path) => match tokio::fs::read_to_string(&path).await {
                Ok(code) => {
                    let event = self.view.load(code);
                    self.broadcast(event).await?;
                }
                Err(e) => {
                    let message = format!("Failed to read {}: {}", path.display(), e);
                    print_with_prompt(&MessageFormatter::format_error(&message), &self.prompt);
                }
            },
            Command::Show => {
                print_with_prompt(
                    &MessageFormatter::format_buffer(self.view.buffer()),
                    &self.prompt,
                );
            }
            Command::Who => {
                print_with_prompt(
                    &MessageFormatter::format_participants(
                        self.view.presence().members(),
                        self.view.self_id(),
                    ),
                    &self.prompt,
                );
            }
            Command::Room => {
                print_with_prompt(&format!("\nRoom: {}\n", self.view.room_id()), &self.prompt);
            }
            Command::Lang(language) => {
                self.language = language;
                print_with_prompt(
                    &format!("\nLanguage set to {}\n", language.label()),
                    &self.prompt,
                );
            }
            Command::Input(input) => {
                self.input = input;
                print_with_prompt("\nInput set\n", &self.prompt);
            }
            Command::Run => self.run_buffer().await,
            Command::Leave => return Ok(Flow::Leave),
            Command::Help => print_with_prompt(&format!("\n{}", HELP), &self.prompt),
        }

        Ok(Flow::Continue)
    }

    async fn broadcast(&mut self, event: Option<ClientEvent>) -> Result<(), ClientError> {
        match event {
            Some(event) => self.session.emit(&event).await,
            None => {
                print_with_prompt(
                    &MessageFormatter::format_error("Not in the room yet"),
                    &self.prompt,
                );
                Ok(())
            }
        }
    }

    async fn run_buffer(&self) {
        let text = match self
            .executor
            .execute(self.view.buffer().as_str(), self.language, &self.input)
            .await
        {
            Ok(output) => MessageFormatter::format_execution_output(&output),
            Err(e) => {
                tracing::warn!("Execution failed: {}", e);
                MessageFormatter::format_error(&e.to_string())
            }
        };
        print_with_prompt(&text, &self.prompt);
    }
}
