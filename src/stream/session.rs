//! Lifecycle of one stream session: `Idle -> Open -> Closed`.

use crate::error::Result;
use crate::terminal::LineSink;

pub const ERROR_LINE: &str = "Error!";
pub const DONE_LINE: &str = "Done!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Open,
    Closed,
}

/// Events a session reacts to; the first three mirror the named server events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Message(String),
    Error,
    Done(String),
    Unload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Session stays open.
    Continue,
    /// Session just closed; the connection must be released.
    Close,
    /// Event arrived outside the open state and was dropped.
    Ignored,
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session already in `Open`, for a connection that exists from the start.
    pub fn opened() -> Self {
        Self {
            state: SessionState::Open,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Returns false if the session was already opened once.
    pub fn open(&mut self) -> bool {
        if self.state != SessionState::Idle {
            return false;
        }
        self.state = SessionState::Open;
        true
    }

    /// Closes without writing anything. Returns true if the session was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = SessionState::Closed;
        was_open
    }

    /// Routes `event` to `sink`.
    ///
    /// Terminal events move the session to `Closed` before any line is
    /// written, so a failing sink still leaves the session closed.
    pub fn handle<S>(&mut self, event: StreamEvent, sink: &mut S) -> Result<Outcome>
    where
        S: LineSink + ?Sized,
    {
        if !self.is_open() {
            return Ok(Outcome::Ignored);
        }
        match event {
            StreamEvent::Message(text) => {
                sink.append_line(&text)?;
                Ok(Outcome::Continue)
            }
            StreamEvent::Error => {
                self.close();
                sink.append_line(ERROR_LINE)?;
                Ok(Outcome::Close)
            }
            StreamEvent::Done(payload) => {
                self.close();
                sink.append_line(&payload)?;
                sink.append_line(DONE_LINE)?;
                Ok(Outcome::Close)
            }
            StreamEvent::Unload => {
                self.close();
                Ok(Outcome::Close)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::Transcript;
    use pretty_assertions::assert_eq;

    fn open_session() -> Session {
        let mut session = Session::new();
        assert!(session.open());
        session
    }

    fn feed(session: &mut Session, sink: &mut Transcript, events: Vec<StreamEvent>) -> Vec<Outcome> {
        events
            .into_iter()
            .map(|event| session.handle(event, sink).unwrap())
            .collect()
    }

    #[test]
    fn messages_then_done_show_payload_and_marker() {
        let mut session = open_session();
        let mut sink = Transcript::new();
        let outcomes = feed(
            &mut session,
            &mut sink,
            vec![
                StreamEvent::Message("foo".into()),
                StreamEvent::Message("bar".into()),
                StreamEvent::Done(String::new()),
            ],
        );
        assert_eq!(outcomes, vec![Outcome::Continue, Outcome::Continue, Outcome::Close]);
        assert_eq!(sink.rendered(), vec!["1: foo", "2: bar", "3: ", "4: Done!"]);
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn done_payload_from_server_is_displayed() {
        let mut session = open_session();
        let mut sink = Transcript::new();
        session
            .handle(StreamEvent::Done("Finished with return code: 0".into()), &mut sink)
            .unwrap();
        assert_eq!(sink.rendered(), vec!["1: Finished with return code: 0", "2: Done!"]);
    }

    #[test]
    fn error_without_messages_writes_single_line() {
        let mut session = open_session();
        let mut sink = Transcript::new();
        assert_eq!(session.handle(StreamEvent::Error, &mut sink).unwrap(), Outcome::Close);
        assert_eq!(sink.rendered(), vec!["1: Error!"]);
        assert!(session.is_closed());
    }

    #[test]
    fn nothing_is_written_after_close() {
        for terminal in [StreamEvent::Error, StreamEvent::Done("x".into()), StreamEvent::Unload] {
            let mut session = open_session();
            let mut sink = Transcript::new();
            session.handle(StreamEvent::Message("before".into()), &mut sink).unwrap();
            session.handle(terminal, &mut sink).unwrap();
            let written = sink.lines().len();

            let outcomes = feed(
                &mut session,
                &mut sink,
                vec![
                    StreamEvent::Message("late".into()),
                    StreamEvent::Error,
                    StreamEvent::Done("again".into()),
                ],
            );
            assert!(outcomes.iter().all(|o| *o == Outcome::Ignored));
            assert_eq!(sink.lines().len(), written);
        }
    }

    #[test]
    fn unload_closes_silently() {
        let mut session = open_session();
        let mut sink = Transcript::new();
        assert_eq!(session.handle(StreamEvent::Unload, &mut sink).unwrap(), Outcome::Close);
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn idle_session_ignores_events() {
        let mut session = Session::new();
        let mut sink = Transcript::new();
        let outcome = session.handle(StreamEvent::Message("early".into()), &mut sink).unwrap();
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn opened_session_routes_immediately() {
        let mut session = Session::opened();
        let mut sink = Transcript::new();
        assert!(session.is_open());
        assert!(!session.open());
        let outcome = session.handle(StreamEvent::Message("first".into()), &mut sink).unwrap();
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(sink.rendered(), vec!["1: first"]);
    }

    #[test]
    fn closed_is_terminal() {
        let mut session = open_session();
        assert!(session.close());
        assert!(!session.close());
        assert!(!session.open());
        assert_eq!(session.state(), SessionState::Closed);
    }
}
