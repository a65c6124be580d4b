//! Native hub transport over tokio-tungstenite.
//!
//! The whole connection runs as one local task on the UI scheduler, so
//! signal updates and event application never leave the main thread.

use std::cell::Cell;
use std::rc::Rc;

use chatline_shared::{ClientInvocation, HubEvent};
use dioxus::prelude::*;
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::{ConnectionState, HubHandle, ReconnectConfig};

/// The managed hub connection (native implementation).
pub struct HubConnection {
    /// Current connection state
    pub state: Signal<ConnectionState>,
    /// Channel feeding the write side
    sender: UnboundedSender<ClientInvocation>,
    /// Set on drop so the reconnect loop winds down
    shutdown: Rc<Cell<bool>>,
}

impl HubConnection {
    /// Open the connection. `url_builder` is called on every (re)connect
    /// attempt so a refreshed token is always picked up; returning `None`
    /// (no token yet) parks the loop in the disconnected state.
    pub fn new(
        url_builder: impl Fn() -> Option<String> + 'static,
        on_event: impl Fn(HubEvent) + 'static,
    ) -> Self {
        let (sender, receiver) = unbounded();
        let state = Signal::new(ConnectionState::Disconnected);
        let shutdown = Rc::new(Cell::new(false));

        run_connection_loop(
            state,
            receiver,
            Rc::new(url_builder),
            Rc::new(on_event),
            ReconnectConfig::default(),
            shutdown.clone(),
        );

        Self {
            state,
            sender,
            shutdown,
        }
    }

    /// Get a handle for invoking hub methods
    pub fn handle(&self) -> HubHandle {
        HubHandle::new(self.sender.clone(), self.state)
    }
}

impl Drop for HubConnection {
    fn drop(&mut self) {
        self.shutdown.set(true);
    }
}

fn run_connection_loop(
    mut state: Signal<ConnectionState>,
    mut receiver: UnboundedReceiver<ClientInvocation>,
    url_builder: Rc<dyn Fn() -> Option<String>>,
    on_event: Rc<dyn Fn(HubEvent)>,
    reconnect: ReconnectConfig,
    shutdown: Rc<Cell<bool>>,
) {
    spawn(async move {
        let mut attempt = 0u32;

        loop {
            if shutdown.get() {
                state.set(ConnectionState::Disconnected);
                break;
            }

            let Some(url) = url_builder() else {
                // Not authenticated yet; poll until a token shows up
                state.set(ConnectionState::Disconnected);
                tokio::time::sleep(std::time::Duration::from_millis(1000)).await;
                continue;
            };

            if attempt == 0 {
                state.set(ConnectionState::Connecting);
            } else {
                state.set(ConnectionState::Reconnecting { attempt });
            }

            match connect_async(&url).await {
                Ok((mut ws_stream, _response)) => {
                    state.set(ConnectionState::Connected);
                    attempt = 0;
                    crate::log_info!("hub connected");

                    // Pump events in and invocations out until the socket
                    // closes or every handle is dropped.
                    loop {
                        tokio::select! {
                            inbound = ws_stream.next() => match inbound {
                                Some(Ok(Message::Text(text))) => {
                                    match serde_json::from_str::<HubEvent>(&text) {
                                        Ok(event) => on_event(event),
                                        Err(e) => {
                                            crate::log_error!("unparseable hub frame: {}", e)
                                        }
                                    }
                                }
                                Some(Ok(Message::Close(_))) | None => break,
                                Some(Ok(_)) => {
                                    // ping/pong handled by tungstenite, binary ignored
                                }
                                Some(Err(e)) => {
                                    crate::log_error!("hub read error: {}", e);
                                    break;
                                }
                            },
                            outbound = receiver.next() => match outbound {
                                Some(invocation) => match serde_json::to_string(&invocation) {
                                    Ok(json) => {
                                        if let Err(e) =
                                            ws_stream.send(Message::Text(json.into())).await
                                        {
                                            crate::log_error!("hub send failed: {}", e);
                                            break;
                                        }
                                    }
                                    Err(e) => {
                                        crate::log_error!("hub serialize failed: {}", e);
                                    }
                                },
                                None => {
                                    // All handles dropped; close the socket
                                    let _ = ws_stream.close(None).await;
                                    break;
                                }
                            },
                        }
                    }

                    crate::log_info!("hub connection closed");
                    state.set(ConnectionState::Disconnected);
                }
                Err(e) => {
                    crate::log_error!("hub connect failed: {}", e);

                    if reconnect.max_attempts > 0 && attempt >= reconnect.max_attempts {
                        state.set(ConnectionState::Failed {
                            reason: format!(
                                "max reconnect attempts ({}) exceeded",
                                reconnect.max_attempts
                            ),
                        });
                        break;
                    }

                    let delay = reconnect.delay_for_attempt(attempt);
                    crate::log_info!("reconnecting in {}ms (attempt {})", delay, attempt + 1);
                    tokio::time::sleep(std::time::Duration::from_millis(delay.into())).await;
                    attempt += 1;
                }
            }
        }
    });
}
