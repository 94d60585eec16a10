// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exclusive owner of the transceiver driver.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::Mutex;

use crate::command::RfCommand;
use crate::error::{Error, ProtocolError};
use crate::response::{NumberedUnit, UnitRecord, number_units};
use crate::types::{Channel, PairingAddress};

use super::Transceiver;

/// Commands sent once when the stick is brought up.
///
/// Some sticks only respond reliably after receiving a couple of stop
/// commands. The default reproduces that: two stops on channel `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warmup {
    /// Skip the warm-up entirely.
    Disabled,
    /// Send `count` stop commands on `channel`.
    Stop {
        /// Channel the stops are sent on.
        channel: Channel,
        /// Number of stop commands.
        count: u8,
    },
}

impl Default for Warmup {
    fn default() -> Self {
        Self::Stop {
            channel: Channel::from(1),
            count: 2,
        }
    }
}

/// Configuration for a [`Stick`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use centronic_lib::protocol::{StickConfig, Warmup};
///
/// let config = StickConfig::new()
///     .with_transport_path("/dev/ttyACM0")
///     .with_command_timeout(Duration::from_secs(2))
///     .with_max_retries(0)
///     .with_warmup(Warmup::Disabled);
///
/// assert_eq!(config.transport_path(), "/dev/ttyACM0");
/// assert_eq!(StickConfig::new().transport_path(), StickConfig::DEFAULT_TRANSPORT_PATH);
/// ```
#[derive(Debug, Clone)]
pub struct StickConfig {
    transport_path: Option<String>,
    database_path: PathBuf,
    command_timeout: Duration,
    max_retries: u32,
    warmup: Warmup,
}

impl StickConfig {
    /// Device path of the Becker Centronic USB stick.
    pub const DEFAULT_TRANSPORT_PATH: &'static str =
        "/dev/serial/by-id/usb-BECKER-ANTRIEBE_GmbH_CDC_RS232_v125_Centronic-if00";
    /// Location of the unit database used by the driver.
    pub const DEFAULT_DATABASE_PATH: &'static str = "centronic-stick.db";
    /// Default bound on a single transport call.
    pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);
    /// Default number of extra attempts after a timed-out cover command.
    pub const DEFAULT_MAX_RETRIES: u32 = 1;

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transport_path: None,
            database_path: PathBuf::from(Self::DEFAULT_DATABASE_PATH),
            command_timeout: Self::DEFAULT_COMMAND_TIMEOUT,
            max_retries: Self::DEFAULT_MAX_RETRIES,
            warmup: Warmup::default(),
        }
    }

    /// Overrides the transport path.
    #[must_use]
    pub fn with_transport_path(mut self, path: impl Into<String>) -> Self {
        self.transport_path = Some(path.into());
        self
    }

    /// Sets the unit database location.
    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Sets the bound on a single transport call.
    #[must_use]
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Sets how many times a timed-out cover command is retried.
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the warm-up sequence.
    #[must_use]
    pub fn with_warmup(mut self, warmup: Warmup) -> Self {
        self.warmup = warmup;
        self
    }

    /// Returns the transport path, falling back to the default when unset or empty.
    #[must_use]
    pub fn transport_path(&self) -> &str {
        self.transport_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(Self::DEFAULT_TRANSPORT_PATH)
    }

    /// Returns the unit database location.
    #[must_use]
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Returns the per-call timeout.
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        self.command_timeout
    }

    /// Returns the retry budget for timed-out cover commands.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the warm-up sequence.
    #[must_use]
    pub fn warmup(&self) -> &Warmup {
        &self.warmup
    }
}

impl Default for StickConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive owner of a [`Transceiver`].
///
/// Share it between covers with an `Arc`. Calls are queued on a fair lock
/// and reach the driver one at a time in submission order; a call keeps the
/// lock for all of its attempts, so nothing can slip in between a timeout
/// and its retry.
#[derive(Debug)]
pub struct Stick<T> {
    driver: Mutex<T>,
    config: StickConfig,
}

impl<T: Transceiver> Stick<T> {
    /// Wraps an already connected driver.
    #[must_use]
    pub fn new(driver: T, config: StickConfig) -> Self {
        Self {
            driver: Mutex::new(driver),
            config,
        }
    }

    /// Connects a driver to the configured transport and database.
    ///
    /// `connect` receives the transport path (the default one when none is
    /// configured) and the database location.
    ///
    /// # Errors
    ///
    /// Returns whatever `connect` fails with.
    pub fn open<F>(config: StickConfig, connect: F) -> Result<Self, Error>
    where
        F: FnOnce(&str, &Path) -> Result<T, Error>,
    {
        tracing::debug!(
            transport = config.transport_path(),
            database = %config.database_path().display(),
            "Opening transceiver"
        );
        let driver = connect(config.transport_path(), config.database_path())?;
        Ok(Self::new(driver, config))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &StickConfig {
        &self.config
    }

    /// Transmits a cover command.
    ///
    /// A call that exceeds the command timeout is retried up to
    /// [`StickConfig::max_retries`] times. Rejections from the driver are
    /// returned immediately.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Timeout` when every attempt timed out, or the
    /// driver's error.
    pub async fn send(&self, command: &RfCommand) -> Result<(), Error> {
        let timeout = self.config.command_timeout;
        let mut driver = self.driver.lock().await;
        let mut attempt = 0;

        loop {
            tracing::debug!(command = %command, attempt, "Sending RF command");
            match bounded(timeout, driver.send(command)).await {
                Err(Error::Protocol(ProtocolError::Timeout(ms)))
                    if attempt < self.config.max_retries =>
                {
                    attempt += 1;
                    tracing::warn!(
                        command = %command,
                        timeout_ms = ms,
                        attempt,
                        "RF command timed out, retrying"
                    );
                }
                result => return result,
            }
        }
    }

    /// Pairs a receiver. Never retried.
    ///
    /// # Errors
    ///
    /// Returns a `DeviceError` if the stick rejects the address, or a
    /// `ProtocolError` if the transport fails or times out.
    pub async fn pair(&self, address: PairingAddress) -> Result<(), Error> {
        let mut driver = self.driver.lock().await;
        tracing::debug!(%address, "Pairing receiver");
        bounded(self.config.command_timeout, driver.pair(&address)).await
    }

    /// Lists units from the driver's database in the driver's order.
    ///
    /// # Errors
    ///
    /// Returns the driver's error, or a timeout.
    pub async fn list_units(&self) -> Result<Vec<UnitRecord>, Error> {
        let mut driver = self.driver.lock().await;
        bounded(self.config.command_timeout, driver.list_units()).await
    }

    /// Lists units and logs each one with a display-only sequence number.
    ///
    /// # Errors
    ///
    /// Returns the driver's error, or a timeout.
    pub async fn log_units(&self) -> Result<Vec<NumberedUnit>, Error> {
        let units = number_units(self.list_units().await?);

        tracing::info!("Configured Becker centronic units:");
        for unit in &units {
            tracing::info!(
                "Unit id {}, unit code {}, increment {}",
                unit.id,
                unit.record.unit_code,
                unit.record.increment
            );
        }

        Ok(units)
    }

    /// Runs the configured warm-up sequence.
    ///
    /// # Errors
    ///
    /// Returns the first failing stop command's error.
    pub async fn warm_up(&self) -> Result<(), Error> {
        let Warmup::Stop { channel, count } = &self.config.warmup else {
            tracing::debug!("Transceiver warm-up disabled");
            return Ok(());
        };

        let command = RfCommand::stop(channel.clone());
        for call in 0..*count {
            tracing::debug!(channel = %channel, call, "Warm-up stop");
            self.send(&command).await?;
        }
        Ok(())
    }
}

/// Runs a transport call with an upper time bound.
async fn bounded<R>(
    timeout: Duration,
    call: impl Future<Output = Result<R, Error>>,
) -> Result<R, Error> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => {
            let ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            Err(ProtocolError::Timeout(ms).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use super::*;
    use crate::error::DeviceError;

    /// What the fake driver does on each `send`.
    #[derive(Clone, Copy)]
    enum Step {
        Ok,
        Hang,
        Reject,
    }

    #[derive(Default)]
    struct FakeDriver {
        script: VecDeque<Step>,
        sent: Arc<parking_lot::Mutex<Vec<String>>>,
    }

    impl FakeDriver {
        fn scripted(steps: &[Step]) -> Self {
            Self {
                script: steps.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl Transceiver for FakeDriver {
        async fn send(&mut self, command: &RfCommand) -> Result<(), Error> {
            self.sent.lock().push(command.to_string());
            match self.script.pop_front().unwrap_or(Step::Ok) {
                Step::Ok => Ok(()),
                Step::Hang => std::future::pending().await,
                Step::Reject => Err(DeviceError::CommandRejected("nak".to_string()).into()),
            }
        }

        async fn pair(&mut self, address: &PairingAddress) -> Result<(), Error> {
            self.sent.lock().push(format!("pair {address}"));
            match self.script.pop_front().unwrap_or(Step::Ok) {
                Step::Ok => Ok(()),
                Step::Hang => std::future::pending().await,
                Step::Reject => Err(DeviceError::PairingRejected {
                    address: address.to_string(),
                    message: "nak".to_string(),
                }
                .into()),
            }
        }

        async fn list_units(&mut self) -> Result<Vec<UnitRecord>, Error> {
            Ok(vec![UnitRecord::new("1a2b3", 12), UnitRecord::new("00001", 4)])
        }
    }

    fn stick(driver: FakeDriver) -> (Stick<FakeDriver>, Arc<parking_lot::Mutex<Vec<String>>>) {
        let sent = Arc::clone(&driver.sent);
        let config = StickConfig::new().with_command_timeout(Duration::from_millis(100));
        (Stick::new(driver, config), sent)
    }

    #[test]
    fn empty_transport_path_uses_default() {
        let config = StickConfig::new().with_transport_path("");
        assert_eq!(config.transport_path(), StickConfig::DEFAULT_TRANSPORT_PATH);
    }

    #[test]
    fn open_passes_paths_to_connect() {
        let config = StickConfig::new().with_database_path("/var/lib/centronic.db");
        let stick = Stick::open(config, |transport, database| {
            assert_eq!(transport, StickConfig::DEFAULT_TRANSPORT_PATH);
            assert_eq!(database, Path::new("/var/lib/centronic.db"));
            Ok(FakeDriver::default())
        });
        assert!(stick.is_ok());
    }

    #[test]
    fn open_propagates_connect_failure() {
        let result = Stick::<FakeDriver>::open(StickConfig::new(), |transport, _| {
            Err(ProtocolError::TransportUnavailable(transport.to_string()).into())
        });
        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::TransportUnavailable(_)))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_command_is_retried_once() {
        let (stick, sent) = stick(FakeDriver::scripted(&[Step::Hang, Step::Ok]));

        stick.send(&RfCommand::move_up(Channel::from(3))).await.unwrap();

        assert_eq!(*sent.lock(), vec!["up 3", "up 3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_are_bounded() {
        let (stick, sent) = stick(FakeDriver::scripted(&[Step::Hang, Step::Hang, Step::Hang]));

        let result = stick.send(&RfCommand::stop(Channel::from(1))).await;

        assert!(matches!(result, Err(Error::Protocol(ProtocolError::Timeout(100)))));
        assert_eq!(sent.lock().len(), 2);
    }

    #[tokio::test]
    async fn rejection_is_not_retried() {
        let (stick, sent) = stick(FakeDriver::scripted(&[Step::Reject]));

        let result = stick.send(&RfCommand::move_down(Channel::from(2))).await;

        assert!(matches!(result, Err(Error::Device(DeviceError::CommandRejected(_)))));
        assert_eq!(sent.lock().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn pairing_times_out_without_retry() {
        let (stick, sent) = stick(FakeDriver::scripted(&[Step::Hang]));
        let address = PairingAddress::new(
            crate::types::PairingChannel::new(2).unwrap(),
            crate::types::UnitNumber::default(),
        );

        let result = stick.pair(address).await;

        assert!(matches!(result, Err(Error::Protocol(ProtocolError::Timeout(_)))));
        assert_eq!(*sent.lock(), vec!["pair 1:2"]);
    }

    #[tokio::test]
    async fn default_warm_up_sends_two_stops_on_channel_one() {
        let (stick, sent) = stick(FakeDriver::default());

        stick.warm_up().await.unwrap();

        assert_eq!(*sent.lock(), vec!["halt 1", "halt 1"]);
    }

    #[tokio::test]
    async fn disabled_warm_up_sends_nothing() {
        let driver = FakeDriver::default();
        let sent = Arc::clone(&driver.sent);
        let stick = Stick::new(driver, StickConfig::new().with_warmup(Warmup::Disabled));

        stick.warm_up().await.unwrap();

        assert!(sent.lock().is_empty());
    }

    #[tokio::test]
    async fn log_units_numbers_in_driver_order() {
        let (stick, _) = stick(FakeDriver::default());

        let units = stick.log_units().await.unwrap();

        assert_eq!(units[0].id, 1);
        assert_eq!(units[0].record.unit_code, "1a2b3");
        assert_eq!(units[1].id, 2);
        assert_eq!(units[1].record.unit_code, "00001");
    }
}
