//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges winit (OS-level events) with the game loop thread via a
// crossbeam channel.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  GameLoop        │
//  │   ↓                      │    │   ↓              │
//  │  InputProcessor          │    │  EventCollector  │
//  │   ├─ Converts winit keys │    │   ↓              │
//  │   └─ Tracks modifiers    │    │  Keyboard        │
//  │   ↓                      │    │   ↓              │
//  │  InputBuffer             │    │  FrameHandler    │
//  │   ↓                      │    │                  │
//  │  RedrawRequested (flush) │    └──────────────────┘
//  │   ↓                      │             ↑
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// Frame boundary is `RedrawRequested`: all keyboard input buffered since
// the previous boundary is sent as one batch. Empty batches are not sent.
//
// The platform never blocks on the channel while the window is open. A
// full channel parks events in a backlog that is retried, in order, on
// the next send or frame boundary, so a key release is never lost. A
// disconnected channel (loop thread gone) is logged and the backlog is
// discarded; the window stays responsive so the user can close it.
//
// winit requires the event loop on the main thread (macOS/iOS), so this
// runs on the thread that called `Engine::run()`.
//
//=========================================================================

//=== Module Declarations =================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use crossbeam_channel::{Sender, TrySendError};
use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowConfig ========================================================

/// Window settings applied when the window is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,

    /// Inner size in logical pixels.
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Lumen Engine".to_owned(),
            width: 800,
            height: 600,
        }
    }
}

//=== Platform ============================================================

/// Window manager and keyboard event aggregator.
///
/// Not `Send`: it must stay on the main thread. Communication with the
/// loop thread happens only through the channel sender.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` is called).
    window: Option<Window>,
    config: WindowConfig,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    /// Events the loop had no room for yet, oldest first.
    backlog: VecDeque<PlatformEvent>,
    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates the platform. The window is created lazily in `resumed()`.
    pub(crate) fn new(event_sender: Sender<PlatformEvent>, config: WindowConfig) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            config,
            buffer: InputBuffer::new(),
            event_sender,
            backlog: VecDeque::new(),
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits with an error.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS winit requirement).
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered keyboard events to the loop thread as one batch.
    ///
    /// Runs every frame, so a backlog left by a full channel is retried
    /// even when no new input arrived.
    fn flush_input_buffer(&mut self) {
        match self.buffer.drain() {
            Some(batch) => {
                trace!(target: "platform::input", "Flushing {} key events", batch.len());
                self.send(PlatformEvent::Inputs(batch));
            }
            None => {
                self.pump();
            }
        }
    }

    /// Queues `event` behind any backlog and sends what fits without
    /// blocking. Returns `false` if anything is still waiting.
    fn send(&mut self, event: PlatformEvent) -> bool {
        self.backlog.push_back(event);
        self.pump()
    }

    fn pump(&mut self) -> bool {
        while let Some(event) = self.backlog.pop_front() {
            match self.event_sender.try_send(event) {
                Ok(()) => {}
                Err(TrySendError::Full(event)) => {
                    self.backlog.push_front(event);
                    warn!(target: "platform", "Loop channel full, {} events deferred", self.backlog.len());
                    return false;
                }
                Err(TrySendError::Disconnected(_)) => {
                    warn!(
                        target: "platform",
                        "Loop channel disconnected, {} events dropped",
                        self.backlog.len() + 1
                    );
                    self.backlog.clear();
                    return false;
                }
            }
        }
        true
    }

    /// Tells the loop thread the window is gone and leaves the event loop.
    ///
    /// Unlike frame sends this blocks until the backlog and `WindowClosed`
    /// are delivered, so the loop sees every release before it stops.
    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        // Input still buffered would otherwise be lost silently
        if let Some(batch) = self.buffer.drain() {
            self.backlog.push_back(PlatformEvent::Inputs(batch));
        }
        self.backlog.push_back(PlatformEvent::WindowClosed);
        self.deliver_backlog();
        event_loop.exit();
    }

    /// Blocking drain of the backlog. Gives up if the loop thread is gone.
    fn deliver_backlog(&mut self) {
        while let Some(event) = self.backlog.pop_front() {
            if self.event_sender.send(event).is_err() {
                warn!(target: "platform", "Loop channel disconnected during shutdown");
                self.backlog.clear();
                return;
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first activation (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.send(PlatformEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.shut_down(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.shut_down(event_loop);
            }

            WindowEvent::Resized(size) => {
                debug!(target: "platform", "Window resized to {}x{}", size.width, size.height);
                self.send(PlatformEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(key_event) {
                    Some(event) => self.buffer.push(event),
                    None => trace!(target: "platform::input", "Repeat or unmapped key ignored"),
                }
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered input
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{GameKeyboard, InputEvent, KeyCode, Keyboard, Modifiers};
    use crossbeam_channel::{bounded, unbounded};

    fn space_down() -> InputEvent {
        InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::NONE }
    }

    /// What the loop thread does with a received event, keyboard side only.
    fn feed(keyboard: &mut Keyboard, event: PlatformEvent) {
        if let PlatformEvent::Inputs(batch) = event {
            keyboard.process_events(&batch);
        }
    }

    //=====================================================================
    // WindowConfig Tests
    //=====================================================================

    #[test]
    fn window_config_defaults() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "Lumen Engine");
        assert_eq!((config.width, config.height), (800, 600));
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let (tx, _rx) = unbounded();
        let platform = Platform::new(tx, WindowConfig::default());
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, WindowConfig::default());

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_events() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, WindowConfig::default());

        platform.buffer.push(space_down());
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs(batch)) => assert_eq!(batch, [space_down()]),
            other => panic!("Expected Inputs event, got {:?}", other),
        }
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, WindowConfig::default());

        platform.buffer.push(space_down());
        drop(rx);

        platform.flush_input_buffer();
        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn full_channel_defers_instead_of_blocking() {
        let (tx, rx) = bounded(1);
        let mut platform = Platform::new(tx, WindowConfig::default());

        assert!(platform.send(PlatformEvent::Resized { width: 1, height: 1 }));
        assert!(!platform.send(PlatformEvent::Resized { width: 2, height: 2 }));
        assert_eq!(platform.backlog.len(), 1);

        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::Resized { width: 1, .. })));
        platform.flush_input_buffer();
        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::Resized { width: 2, .. })));
        assert!(platform.backlog.is_empty());
    }

    #[test]
    fn release_survives_full_channel() {
        let (tx, rx) = bounded(1);
        let mut platform = Platform::new(tx, WindowConfig::default());
        let mut keyboard = Keyboard::new();

        platform.buffer.push(InputEvent::KeyDown { key: KeyCode::KeyW, modifiers: Modifiers::NONE });
        platform.flush_input_buffer();
        feed(&mut keyboard, rx.try_recv().unwrap());
        assert!(keyboard.pressed_keys().contains(&KeyCode::KeyW));

        // Loop falls behind: the channel is full when the release arrives
        assert!(platform.send(PlatformEvent::Resized { width: 10, height: 10 }));
        platform.buffer.push(InputEvent::KeyUp { key: KeyCode::KeyW, modifiers: Modifiers::NONE });
        platform.flush_input_buffer();
        assert!(platform.buffer.is_empty());

        // Loop catches up over the next frames
        while let Ok(event) = rx.try_recv() {
            feed(&mut keyboard, event);
            platform.flush_input_buffer();
        }

        assert!(keyboard.pressed_keys().is_empty(), "W must not stay held after release");
        assert!(platform.backlog.is_empty());
    }

    #[test]
    fn backlog_keeps_send_order() {
        let (tx, rx) = bounded(1);
        let mut platform = Platform::new(tx, WindowConfig::default());

        platform.send(PlatformEvent::Resized { width: 1, height: 1 });
        platform.buffer.push(space_down());
        platform.flush_input_buffer();
        platform.send(PlatformEvent::Resized { width: 3, height: 3 });

        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::Resized { width: 1, .. })));
        platform.flush_input_buffer();
        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::Inputs(_))));
        platform.flush_input_buffer();
        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::Resized { width: 3, .. })));
    }

    #[test]
    fn shutdown_backlog_waits_for_room() {
        let (tx, rx) = bounded(1);
        let mut platform = Platform::new(tx, WindowConfig::default());

        assert!(platform.send(PlatformEvent::Resized { width: 1, height: 1 }));
        platform.backlog.push_back(PlatformEvent::WindowClosed);

        let reader = std::thread::spawn(move || rx.iter().collect::<Vec<_>>());
        platform.deliver_backlog();
        drop(platform);

        let received = reader.join().unwrap();
        assert!(matches!(received.as_slice(), [PlatformEvent::Resized { .. }, PlatformEvent::WindowClosed]));
    }

    #[test]
    fn disconnected_channel_discards_backlog() {
        let (tx, rx) = bounded(1);
        let mut platform = Platform::new(tx, WindowConfig::default());

        platform.send(PlatformEvent::Resized { width: 1, height: 1 });
        platform.send(PlatformEvent::Resized { width: 2, height: 2 });
        drop(rx);

        assert!(!platform.pump());
        assert!(platform.backlog.is_empty());
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, WindowConfig::default());

        platform.buffer.push(space_down());

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }
}
