//! Binds a form to a server-sent event stream rendered into a terminal.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, EventSource, EventTarget, HtmlFormElement, MessageEvent};

use super::session::{Session, SessionState, StreamEvent, ERROR_LINE};
use crate::dom;
use crate::error::{HubError, Result};
use crate::form::{read_form, stream_url};
use crate::terminal::{LineSink, Terminal};

pub type SharedTerminal = Rc<RefCell<Terminal>>;

/// Registers a submit handler on `form_id` that streams `endpoint` into `terminal_id`.
///
/// Each call adds another handler; registering the same form twice opens two
/// streams per submission.
pub fn register_event_source(form_id: &str, terminal_id: &str, endpoint: &str) -> Result<()> {
    let document = dom::document()?;
    let form = dom::element_by_id::<HtmlFormElement>(&document, form_id, "form")?;
    let terminal = Terminal::from_id(&document, terminal_id)?;
    StreamController::new(form, terminal, endpoint).register();
    log::debug!("registered `{form_id}` -> `{terminal_id}` at {endpoint}");
    Ok(())
}

pub struct StreamController {
    form: HtmlFormElement,
    terminal: SharedTerminal,
    endpoint: String,
    active: RefCell<Option<Rc<ActiveStream>>>,
}

impl StreamController {
    pub fn new(form: HtmlFormElement, terminal: Terminal, endpoint: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            form,
            terminal: Rc::new(RefCell::new(terminal)),
            endpoint: endpoint.into(),
            active: RefCell::new(None),
        })
    }

    /// Attaches the submit handler for the lifetime of the page.
    pub fn register(self: &Rc<Self>) {
        let controller = Rc::clone(self);
        EventListener::new_with_options(
            &self.form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                if let Err(err) = controller.submit() {
                    log::error!("submit of form `{}` failed: {err}", controller.form.id());
                }
            },
        )
        .forget();
    }

    /// Starts a new session from the current form state.
    ///
    /// A session still open from an earlier submission is closed first so the
    /// terminal only receives lines from the newest stream.
    pub fn submit(&self) -> Result<Rc<ActiveStream>> {
        let previous = self.active.borrow_mut().take();
        if let Some(previous) = previous {
            previous.close();
        }
        self.terminal.borrow_mut().clear();

        let fields = read_form(&self.form);
        log::debug!("formData: {}", serde_json::to_string(&fields).unwrap_or_default());
        let query = fields.to_query_string();
        log::debug!("queryParams: {query}");

        let url = stream_url(&self.endpoint, &query);
        let stream = match ActiveStream::open(&url, Rc::clone(&self.terminal)) {
            Ok(stream) => stream,
            Err(err) => {
                self.terminal.borrow_mut().append_line(ERROR_LINE)?;
                return Err(err);
            }
        };
        *self.active.borrow_mut() = Some(Rc::clone(&stream));
        Ok(stream)
    }

    pub fn active(&self) -> Option<Rc<ActiveStream>> {
        self.active.borrow().clone()
    }

    pub fn terminal(&self) -> &SharedTerminal {
        &self.terminal
    }
}

/// One open `EventSource` and the listeners routing its events.
pub struct ActiveStream {
    url: String,
    source: EventSource,
    session: RefCell<Session>,
    terminal: SharedTerminal,
    listeners: RefCell<Vec<EventListener>>,
}

impl ActiveStream {
    pub fn open(url: &str, terminal: SharedTerminal) -> Result<Rc<Self>> {
        let window = dom::window()?;
        let source = EventSource::new(url).map_err(|err| HubError::event_source(url, err))?;

        let stream = Rc::new(Self {
            url: url.to_owned(),
            source,
            session: RefCell::new(Session::opened()),
            terminal,
            listeners: RefCell::new(Vec::new()),
        });

        let listeners = vec![
            stream.listen(&stream.source, "message", |event| {
                StreamEvent::Message(event_data(event))
            }),
            stream.listen(&stream.source, "error", |_| StreamEvent::Error),
            stream.listen(&stream.source, "done", |event| {
                StreamEvent::Done(event_data(event))
            }),
            stream.listen(&window, "beforeunload", |_| StreamEvent::Unload),
        ];
        *stream.listeners.borrow_mut() = listeners;

        log::info!("opened event stream {url}");
        Ok(stream)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source(&self) -> &EventSource {
        &self.source
    }

    pub fn state(&self) -> SessionState {
        self.session.borrow().state()
    }

    /// `EventSource.readyState`; `EventSource::CLOSED` once released.
    pub fn ready_state(&self) -> u16 {
        self.source.ready_state()
    }

    /// Closes the stream without writing to the terminal.
    pub fn close(&self) {
        let was_open = self.session.borrow_mut().close();
        if was_open {
            self.release();
        }
    }

    fn listen(
        self: &Rc<Self>,
        target: &EventTarget,
        event_type: &'static str,
        to_event: fn(&Event) -> StreamEvent,
    ) -> EventListener {
        let stream = Rc::clone(self);
        EventListener::new(target, event_type, move |event| stream.dispatch(to_event(event)))
    }

    fn dispatch(&self, event: StreamEvent) {
        if event == StreamEvent::Error {
            log::warn!("event stream {} reported an error", self.url);
        }
        let result = {
            let mut terminal = self.terminal.borrow_mut();
            self.session.borrow_mut().handle(event, &mut *terminal)
        };
        if let Err(err) = result {
            log::error!("writing to terminal failed: {err}");
        }
        if self.session.borrow().is_closed() {
            self.release();
        }
    }

    fn release(&self) {
        self.source.close();
        let listeners = self.listeners.take();
        if listeners.is_empty() {
            return;
        }
        log::info!("closed event stream {}", self.url);
        // The listener currently dispatching is one of these.
        spawn_local(async move { drop(listeners) });
    }
}

fn event_data(event: &Event) -> String {
    event
        .dyn_ref::<MessageEvent>()
        .and_then(|message| message.data().as_string())
        .unwrap_or_default()
}
