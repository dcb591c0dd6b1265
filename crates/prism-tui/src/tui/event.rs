// ABOUTME: TUI event types and event stream.
// ABOUTME: Wraps crossterm events for cleaner handling.

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::Stream;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Paste(String),
    Resize,
    Tick,
}

pub struct EventStream {
    rx: UnboundedReceiverStream<TuiEvent>,
}

impl EventStream {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // crossterm polling blocks, so it gets its own thread
        tokio::task::spawn_blocking(move || loop {
            let tui_event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                        Some(TuiEvent::Key(key))
                    }
                    Ok(Event::Mouse(mouse)) => Some(TuiEvent::Mouse(mouse)),
                    Ok(Event::Paste(text)) => Some(TuiEvent::Paste(text)),
                    Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
                    _ => None,
                }
            } else {
                // Tick for animations
                Some(TuiEvent::Tick)
            };

            if let Some(e) = tui_event {
                if tx.send(e).is_err() {
                    break;
                }
            }
        });

        Self {
            rx: UnboundedReceiverStream::new(rx),
        }
    }
}

impl Stream for EventStream {
    type Item = TuiEvent;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        std::pin::Pin::new(&mut self.rx).poll_next(cx)
    }
}
