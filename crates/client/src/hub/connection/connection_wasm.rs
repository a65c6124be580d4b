//! Web hub transport over `web_sys::WebSocket`.

use std::cell::Cell;
use std::rc::Rc;

use chatline_shared::{ClientInvocation, HubEvent};
use dioxus::prelude::*;
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::StreamExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys;

use super::{ConnectionState, HubHandle, ReconnectConfig};

/// The managed hub connection (web implementation).
pub struct HubConnection {
    /// Current connection state
    pub state: Signal<ConnectionState>,
    /// Channel feeding the send task
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
    receiver: UnboundedReceiver<ClientInvocation>,
    url_builder: Rc<dyn Fn() -> Option<String>>,
    on_event: Rc<dyn Fn(HubEvent)>,
    reconnect: ReconnectConfig,
    shutdown: Rc<Cell<bool>>,
) {
    use std::cell::RefCell;

    // Shared with the send task across reconnects
    let receiver = Rc::new(RefCell::new(receiver));

    spawn_local(async move {
        let mut attempt = 0u32;

        loop {
            if shutdown.get() {
                state.set(ConnectionState::Disconnected);
                break;
            }

            let Some(url) = url_builder() else {
                // Not authenticated yet; poll until a token shows up
                state.set(ConnectionState::Disconnected);
                gloo_timers::future::TimeoutFuture::new(1000).await;
                continue;
            };

            if attempt == 0 {
                state.set(ConnectionState::Connecting);
            } else {
                state.set(ConnectionState::Reconnecting { attempt });
            }

            match open_websocket(&url, on_event.clone()).await {
                Ok(ws) => {
                    state.set(ConnectionState::Connected);
                    attempt = 0;
                    crate::log_info!("hub connected");

                    let (close_tx, mut close_rx) = unbounded::<()>();

                    let onclose_callback = Closure::wrap(Box::new(move |_: web_sys::CloseEvent| {
                        let _ = close_tx.unbounded_send(());
                    })
                        as Box<dyn FnMut(web_sys::CloseEvent)>);
                    ws.set_onclose(Some(onclose_callback.as_ref().unchecked_ref()));
                    onclose_callback.forget();

                    // Send task: drains queued invocations into the socket
                    let ws_for_send = ws.clone();
                    let receiver_for_send = receiver.clone();
                    spawn_local(async move {
                        loop {
                            let invocation = {
                                let mut rx = receiver_for_send.borrow_mut();
                                rx.next().await
                            };

                            match invocation {
                                Some(inv) => {
                                    // readyState 1 = OPEN
                                    if ws_for_send.ready_state() != 1 {
                                        break;
                                    }
                                    match serde_json::to_string(&inv) {
                                        Ok(json) => {
                                            if let Err(e) = ws_for_send.send_with_str(&json) {
                                                crate::log_error!("hub send failed: {:?}", e);
                                            }
                                        }
                                        Err(e) => {
                                            crate::log_error!("hub serialize failed: {}", e);
                                        }
                                    }
                                }
                                None => {
                                    // All handles dropped; close the socket
                                    let _ = ws_for_send.close();
                                    break;
                                }
                            }
                        }
                    });

                    close_rx.next().await;
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
                    gloo_timers::future::TimeoutFuture::new(delay).await;
                    attempt += 1;
                }
            }
        }
    });
}

/// Open a WebSocket and wire the event handlers. Resolves once the socket
/// reports open, or fails with the close/error reason.
async fn open_websocket(
    url: &str,
    on_event: Rc<dyn Fn(HubEvent)>,
) -> Result<web_sys::WebSocket, String> {
    use std::cell::RefCell;
    use web_sys::{CloseEvent, MessageEvent, WebSocket};

    let ws = WebSocket::new(url).map_err(|e| format!("failed to create WebSocket: {e:?}"))?;

    let is_open = Rc::new(Cell::new(false));
    let error_reason = Rc::new(RefCell::new(None::<String>));

    let is_open_for_open = is_open.clone();
    let onopen_callback = Closure::wrap(Box::new(move |_: web_sys::Event| {
        is_open_for_open.set(true);
    }) as Box<dyn FnMut(web_sys::Event)>);
    ws.set_onopen(Some(onopen_callback.as_ref().unchecked_ref()));
    onopen_callback.forget();

    let error_reason_for_close = error_reason.clone();
    let onclose_callback = Closure::wrap(Box::new(move |e: CloseEvent| {
        let reason = if e.reason().is_empty() {
            format!("code {}", e.code())
        } else {
            e.reason()
        };
        *error_reason_for_close.borrow_mut() = Some(reason);
    }) as Box<dyn FnMut(CloseEvent)>);
    ws.set_onclose(Some(onclose_callback.as_ref().unchecked_ref()));
    onclose_callback.forget();

    let error_reason_for_error = error_reason.clone();
    let onerror_callback = Closure::wrap(Box::new(move |_: web_sys::ErrorEvent| {
        *error_reason_for_error.borrow_mut() = Some("WebSocket error".to_string());
    }) as Box<dyn FnMut(web_sys::ErrorEvent)>);
    ws.set_onerror(Some(onerror_callback.as_ref().unchecked_ref()));
    onerror_callback.forget();

    let onmessage_callback = Closure::wrap(Box::new(move |e: MessageEvent| {
        if let Ok(text) = e.data().dyn_into::<js_sys::JsString>() {
            let text: String = text.into();
            match serde_json::from_str::<HubEvent>(&text) {
                Ok(event) => on_event(event),
                Err(e) => crate::log_error!("unparseable hub frame: {}", e),
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);
    ws.set_onmessage(Some(onmessage_callback.as_ref().unchecked_ref()));
    onmessage_callback.forget();

    // Poll until open, closed, or timed out (5s)
    for _ in 0..500 {
        if is_open.get() {
            return Ok(ws);
        }
        if let Some(reason) = error_reason.borrow().clone() {
            return Err(reason);
        }
        gloo_timers::future::TimeoutFuture::new(10).await;
    }

    Err("connection timeout".to_string())
}
