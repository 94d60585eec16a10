// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform setup and cover lifecycle.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::cover::{Cover, Movement, PositionMode};
use crate::error::{ConfigError, Error};
use crate::event::{CoverEvent, EventBus};
use crate::protocol::{Stick, Transceiver};
use crate::types::Channel;

use super::config::PlatformConfig;
use super::host::{RestoreState, SignalBinder};

/// All covers of one stick, plus the stick itself.
///
/// # Examples
///
/// ```ignore
/// use centronic_lib::platform::{CoverPlatform, NoRestore, PlatformConfig};
///
/// # async fn example<T: centronic_lib::protocol::Transceiver + 'static>(
/// #     connect: impl FnOnce(&str, &std::path::Path) -> centronic_lib::Result<T>,
/// #     binder: impl centronic_lib::platform::SignalBinder,
/// # ) -> centronic_lib::Result<()> {
/// let config = PlatformConfig::from_json(r#"{"covers": {"kitchen": {"channel": 1}}}"#)?;
///
/// let mut platform = CoverPlatform::setup(&config, connect, &binder).await?;
/// let mut events = platform.subscribe();
/// platform.added_to_platform(&NoRestore);
/// platform.start_refresh();
///
/// platform.cover(&"1".parse()?).unwrap().open().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CoverPlatform<T> {
    stick: Arc<Stick<T>>,
    covers: Vec<Arc<Cover<T>>>,
    events: EventBus,
    scan_interval: Duration,
    refresh_tasks: Vec<JoinHandle<()>>,
}

impl<T: Transceiver + 'static> CoverPlatform<T> {
    /// Opens the stick, runs its warm-up and builds every valid cover.
    ///
    /// A failing warm-up is logged and does not stop setup. Invalid cover
    /// definitions are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns error only if the transceiver cannot be opened.
    pub async fn setup<F>(
        config: &PlatformConfig,
        connect: F,
        binder: &impl SignalBinder,
    ) -> Result<Self, Error>
    where
        F: FnOnce(&str, &Path) -> Result<T, Error>,
    {
        let stick = Arc::new(Stick::open(config.stick_config(), connect)?);

        if let Err(e) = stick.warm_up().await {
            tracing::error!(error = %e, "Transceiver warm-up failed");
        }

        Ok(Self::with_stick(config, stick, binder))
    }

    /// Builds the covers on an existing stick without touching it.
    #[must_use]
    pub fn with_stick(
        config: &PlatformConfig,
        stick: Arc<Stick<T>>,
        binder: &impl SignalBinder,
    ) -> Self {
        let events = EventBus::new();
        let covers = build_covers(config, &stick, binder, &events);

        Self {
            stick,
            covers,
            events,
            scan_interval: config.scan_interval(),
            refresh_tasks: Vec::new(),
        }
    }

    /// Returns the shared stick.
    #[must_use]
    pub fn stick(&self) -> &Arc<Stick<T>> {
        &self.stick
    }

    /// Returns the covers in configuration order.
    #[must_use]
    pub fn covers(&self) -> &[Arc<Cover<T>>] {
        &self.covers
    }

    /// Returns the cover on `channel`.
    #[must_use]
    pub fn cover(&self, channel: &Channel) -> Option<&Arc<Cover<T>>> {
        self.covers.iter().find(|c| c.channel() == channel)
    }

    /// Subscribes to events of every cover.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CoverEvent> {
        self.events.subscribe()
    }

    /// Runs `movement` on the cover bound to `channel`.
    ///
    /// # Errors
    ///
    /// Returns `Error::CoverNotFound` for unknown channels, or the RF error.
    pub async fn execute(&self, channel: &Channel, movement: Movement) -> Result<(), Error> {
        let cover = self
            .cover(channel)
            .ok_or_else(|| Error::CoverNotFound(channel.to_string()))?;

        match movement {
            Movement::Open => cover.open().await,
            Movement::Close => cover.close().await,
            Movement::Stop => cover.stop().await,
            Movement::OpenTilt => cover.open_tilt().await,
            Movement::CloseTilt => cover.close_tilt().await,
        }
    }

    /// Announces every cover and restores its last known state.
    ///
    /// Publishes one `CoverAdded` per cover, in configuration order, so
    /// subscribe before calling this.
    pub fn added_to_platform(&self, restore: &impl RestoreState) {
        for cover in &self.covers {
            self.events.publish(CoverEvent::cover_added(
                cover.channel().clone(),
                cover.name(),
            ));
            let last = restore.last_state(cover.unique_id());
            cover.restore(last.as_deref());
        }
    }

    /// Starts the periodic refresh of externally derived covers.
    ///
    /// Each cover gets its own task; the first evaluation happens right away.
    /// Calling this again restarts the tasks.
    pub fn start_refresh(&mut self) {
        self.stop_refresh();

        for cover in &self.covers {
            if cover.mode() != PositionMode::ExternallyDerived {
                continue;
            }

            let cover = Arc::clone(cover);
            let period = self.scan_interval;
            self.refresh_tasks.push(tokio::spawn(async move {
                let mut interval = tokio::time::interval(period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    interval.tick().await;
                    cover.update();
                }
            }));
        }

        tracing::debug!(tasks = self.refresh_tasks.len(), "Started cover refresh");
    }

    /// Stops the periodic refresh. No RF commands are sent.
    pub fn stop_refresh(&mut self) {
        for task in self.refresh_tasks.drain(..) {
            task.abort();
        }
    }
}

impl<T> Drop for CoverPlatform<T> {
    fn drop(&mut self) {
        for task in &self.refresh_tasks {
            task.abort();
        }
    }
}

fn build_covers<T: Transceiver>(
    config: &PlatformConfig,
    stick: &Arc<Stick<T>>,
    binder: &impl SignalBinder,
    events: &EventBus,
) -> Vec<Arc<Cover<T>>> {
    let mut covers = Vec::with_capacity(config.covers.len());
    let mut claimed: HashMap<Channel, &str> = HashMap::new();

    for (key, cover_config) in &config.covers {
        let resolved = match cover_config.resolve(key) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::error!(cover = %key, "{e}");
                continue;
            }
        };

        if let Some(existing) = claimed.get(&resolved.channel) {
            let e = ConfigError::DuplicateChannel {
                cover: key.clone(),
                channel: resolved.channel.to_string(),
                existing: (*existing).to_string(),
            };
            tracing::error!(cover = %key, "{e}");
            continue;
        }
        claimed.insert(resolved.channel.clone(), key);

        let stick = Arc::clone(stick);
        let cover = match &resolved.value_template {
            Some(expression) => Cover::externally_derived(
                resolved.name,
                resolved.channel,
                stick,
                binder.bind(expression),
            ),
            None => Cover::self_tracked(resolved.name, resolved.channel, stick),
        };

        covers.push(Arc::new(
            cover
                .with_tilt_positions(resolved.tilt)
                .with_event_bus(events.clone()),
        ));
    }

    covers
}
