//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: translation layer around the call session
//! - [`Driver`]: Platform-specific I/O

use huddle_core::RoomCredentials;

use crate::{App, AppAction, AppEvent, Bridge, Driver};

/// Generic runtime that orchestrates App, Bridge, and Driver.
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
    bridge: Bridge,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime with the given driver and room credentials.
    pub fn new(driver: D, credentials: RoomCredentials) -> Self {
        let app = App::new();
        let bridge = Bridge::new(credentials);
        Self { driver, app, bridge }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Joins the call on startup
    /// 2. Polls for input events from the driver
    /// 3. Receives SDK and backend events
    /// 4. Processes actions and events between App and Bridge
    /// 5. Executes outgoing session actions through the driver
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        // Entering the app means entering the call.
        let actions = self.app.join();
        if self.process_actions(actions).await? {
            self.driver.stop();
            return Ok(());
        }

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        if let Some(event) = self.driver.poll_event().await? {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        if let Some(event) = self.driver.recv_event().await {
            let events = self.bridge.handle_sdk_event(event);
            self.flush_outgoing().await?;
            if self.process_bridge_events(events).await? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::ExportTranscript { contents } => {
                        self.driver.save_transcript(&contents)?;
                    },

                    // Call operations go through the bridge
                    AppAction::JoinCall
                    | AppAction::ToggleCamera
                    | AppAction::ToggleMicrophone
                    | AppAction::ToggleScreenShare
                    | AppAction::ToggleCaptions
                    | AppAction::EndCall => {
                        let events = self.bridge.process_app_action(action);
                        for event in events {
                            let new_actions = self.app.handle(event);
                            pending_actions.extend(new_actions);
                        }
                        self.flush_outgoing().await?;
                    },
                }
            }
        }
        Ok(false)
    }

    /// Process events from Bridge back to App.
    async fn process_bridge_events(&mut self, events: Vec<AppEvent>) -> Result<bool, D::Error> {
        for event in events {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Execute all pending outgoing session actions through the driver.
    async fn flush_outgoing(&mut self) -> Result<(), D::Error> {
        let actions = self.bridge.take_outgoing();
        for action in actions {
            self.driver.execute(action).await?;
        }
        Ok(())
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
