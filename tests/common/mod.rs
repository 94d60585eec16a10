// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use centronic_lib::command::RfCommand;
use centronic_lib::error::{DeviceError, Error};
use centronic_lib::platform::{CoverPlatform, PlatformConfig, SignalBinder, WarmupConfig};
use centronic_lib::protocol::Transceiver;
use centronic_lib::response::UnitRecord;
use centronic_lib::signal::{SignalError, SignalSource, SignalValue};
use centronic_lib::types::PairingAddress;
use parking_lot::Mutex;

/// Records the start and end of every call, yielding in between so that any
/// overlap between concurrent calls shows up in the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    pub log: Arc<Mutex<Vec<String>>>,
    pub units: Vec<UnitRecord>,
    pub reject_pairing: bool,
}

impl RecordingDriver {
    pub fn with_units(units: Vec<UnitRecord>) -> Self {
        Self {
            units,
            ..Self::default()
        }
    }

    async fn record(&self, call: String) {
        self.log.lock().push(format!("begin {call}"));
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        self.log.lock().push(format!("end {call}"));
    }
}

impl Transceiver for RecordingDriver {
    async fn send(&mut self, command: &RfCommand) -> Result<(), Error> {
        self.record(command.to_string()).await;
        Ok(())
    }

    async fn pair(&mut self, address: &PairingAddress) -> Result<(), Error> {
        self.record(format!("pair {address}")).await;
        if self.reject_pairing {
            return Err(DeviceError::PairingRejected {
                address: address.to_string(),
                message: "no receiver in pairing mode".to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn list_units(&mut self) -> Result<Vec<UnitRecord>, Error> {
        self.record("list".to_string()).await;
        Ok(self.units.clone())
    }
}

/// Binds every expression to a shared, test-controlled value.
pub fn shared_binder(value: Arc<Mutex<SignalValue>>) -> impl SignalBinder {
    move |_expression: &str| -> Arc<dyn SignalSource> {
        let value = Arc::clone(&value);
        Arc::new(move || -> Result<SignalValue, SignalError> { Ok(value.lock().clone()) })
    }
}

pub fn no_signals() -> impl SignalBinder {
    shared_binder(Arc::new(Mutex::new(SignalValue::Boolean(false))))
}

pub fn quiet_config() -> PlatformConfig {
    PlatformConfig::default().with_warmup(WarmupConfig::disabled())
}

pub async fn setup(
    config: &PlatformConfig,
    driver: RecordingDriver,
    binder: &impl SignalBinder,
) -> CoverPlatform<RecordingDriver> {
    CoverPlatform::setup(config, |_: &str, _: &Path| Ok(driver), binder)
        .await
        .unwrap()
}

pub fn assert_not_interleaved(log: &[String]) {
    assert_eq!(log.len() % 2, 0, "unbalanced log: {log:?}");
    for pair in log.chunks(2) {
        let begin = pair[0].strip_prefix("begin ").unwrap();
        let end = pair[1].strip_prefix("end ").unwrap();
        assert_eq!(begin, end, "interleaved calls: {log:?}");
    }
}
