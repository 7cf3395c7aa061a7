//! Incremental decoder for `text/event-stream` bodies.

use std::collections::VecDeque;

use futures::{Stream, StreamExt, stream::BoxStream};
use lsv_core::RequestError;

const DEFAULT_EVENT_TYPE: &str = "message";

/// A stream of decoded events, ending when the response body ends.
pub type EventStream = BoxStream<'static, Result<SseEvent, RequestError>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// `message` unless the server sent an `event:` field.
    pub event: String,
    pub data: String,
    /// The last event id seen on the stream, if any.
    pub id: Option<String>,
}

impl SseEvent {
    #[must_use]
    pub fn message(data: impl Into<String>) -> Self {
        Self {
            event: DEFAULT_EVENT_TYPE.to_owned(),
            data: data.into(),
            id: None,
        }
    }

    /// Whether a plain `onmessage` listener would see this event.
    #[must_use]
    pub fn is_message(&self) -> bool {
        self.event == DEFAULT_EVENT_TYPE
    }
}

/// Turns raw body chunks into [`SseEvent`]s.
///
/// Chunks may split lines (and even `\r\n` pairs or UTF-8 sequences)
/// anywhere; nothing is emitted until a blank line ends an event.
#[derive(Debug, Default)]
pub struct SseDecoder {
    line: Vec<u8>,
    // The previous chunk ended in `\r`, so a leading `\n` is part of it.
    skip_lf: bool,
    seen_first_line: bool,

    data: String,
    event_type: String,
    last_id: Option<String>,
}

impl SseDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        let mut events = Vec::new();
        for &byte in chunk {
            if std::mem::take(&mut self.skip_lf) && byte == b'\n' {
                continue;
            }
            match byte {
                b'\n' => self.end_line(&mut events),
                b'\r' => {
                    self.end_line(&mut events);
                    self.skip_lf = true;
                }
                _ => self.line.push(byte),
            }
        }
        events
    }

    fn end_line(&mut self, events: &mut Vec<SseEvent>) {
        let raw = std::mem::take(&mut self.line);
        let decoded = String::from_utf8_lossy(&raw);
        let mut line: &str = &decoded;
        if !self.seen_first_line {
            self.seen_first_line = true;
            line = line.strip_prefix('\u{feff}').unwrap_or(line);
        }
        if let Some(event) = self.process_line(line) {
            events.push(event);
        }
    }

    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "data" => {
                self.data.push_str(value);
                self.data.push('\n');
            }
            "event" => value.clone_into(&mut self.event_type),
            "id" if !value.contains('\0') => self.last_id = Some(value.to_owned()),
            // `retry` only matters for reconnecting, which never happens.
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event_type = std::mem::take(&mut self.event_type);
        if self.data.is_empty() {
            return None;
        }
        let mut data = std::mem::take(&mut self.data);
        if data.ends_with('\n') {
            data.pop();
        }
        Some(SseEvent {
            event: if event_type.is_empty() {
                DEFAULT_EVENT_TYPE.to_owned()
            } else {
                event_type
            },
            data,
            id: self.last_id.clone(),
        })
    }
}

/// Decodes a stream of body chunks into an [`EventStream`].
///
/// An event still being built when the body ends is dropped.
pub fn decode_stream<S, B, E>(body: S) -> EventStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<RequestError> + Send + 'static,
{
    let state = (Box::pin(body), SseDecoder::new(), VecDeque::new());
    futures::stream::unfold(state, |(mut body, mut decoder, mut pending)| async move {
        loop {
            if let Some(event) = pending.pop_front() {
                return Some((Ok(event), (body, decoder, pending)));
            }
            match body.next().await {
                Some(Ok(chunk)) => pending.extend(decoder.feed(chunk.as_ref())),
                Some(Err(err)) => return Some((Err(err.into()), (body, decoder, pending))),
                None => return None,
            }
        }
    })
    .boxed()
}
