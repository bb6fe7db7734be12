//! BDD world running the full daemon over real TCP connections.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::dispatch::CommandDispatcher;
use crate::health::HealthReporter;
use crate::process::LaunchError;
use crate::process::launch::{LaunchPlan, run_daemon_with};

use super::config_loader::TestConfigLoader;
use super::reporter::RecordingHealthReporter;
use super::shutdown::TestShutdownSignal;

pub const WAIT_TIMEOUT: Duration = Duration::from_secs(2);

pub type StepResult = Result<(), String>;

/// Scenario world owning a daemon thread and named client connections.
pub struct ServiceWorld {
    loader: TestConfigLoader,
    reporter: Arc<RecordingHealthReporter>,
    shutdown: TestShutdownSignal,
    handle: Option<thread::JoinHandle<Result<(), LaunchError>>>,
    address: Option<SocketAddr>,
    clients: HashMap<String, TcpStream>,
    result: Option<Result<(), LaunchError>>,
}

impl ServiceWorld {
    #[must_use]
    pub fn new() -> Self {
        Self {
            loader: TestConfigLoader::new(),
            reporter: Arc::new(RecordingHealthReporter::default()),
            shutdown: TestShutdownSignal::default(),
            handle: None,
            address: None,
            clients: HashMap::new(),
            result: None,
        }
    }

    /// Runs the daemon on a background thread and waits for its listener.
    pub fn start(&mut self, workers: usize) -> StepResult {
        if self.handle.is_some() {
            return Err("daemon already running".to_owned());
        }
        let loader = self
            .loader
            .clone()
            .with(|config| config.worker_threads = workers);
        let reporter = self.reporter.clone() as Arc<dyn HealthReporter>;
        let shutdown = self.shutdown.clone();
        self.handle = Some(thread::spawn(move || {
            run_daemon_with(LaunchPlan {
                loader,
                reporter,
                dispatcher: Arc::new(CommandDispatcher::new()),
                shutdown,
            })
        }));
        self.address = self.reporter.wait_for_listener(WAIT_TIMEOUT);
        if self.address.is_none() {
            return Err(format!(
                "listener never became ready: {:?}",
                self.reporter.events()
            ));
        }
        Ok(())
    }

    pub fn connect(&mut self, name: &str) -> StepResult {
        let address = self.address.ok_or("daemon not started")?;
        let stream = TcpStream::connect(address).map_err(|error| error.to_string())?;
        stream
            .set_read_timeout(Some(WAIT_TIMEOUT))
            .map_err(|error| error.to_string())?;
        self.clients.insert(name.to_owned(), stream);
        Ok(())
    }

    /// Writes raw bytes on a named client's connection.
    pub fn send(&mut self, name: &str, bytes: &[u8]) -> StepResult {
        let stream = self.client(name)?;
        stream.write_all(bytes).map_err(|error| error.to_string())
    }

    /// Reads exactly `expected.len()` bytes and compares them.
    pub fn expect(&mut self, name: &str, expected: &str) -> StepResult {
        let stream = self.client(name)?;
        let mut buf = vec![0_u8; expected.len()];
        stream
            .read_exact(&mut buf)
            .map_err(|error| format!("reading response for {name}: {error}"))?;
        let received = String::from_utf8_lossy(&buf);
        if received == expected {
            Ok(())
        } else {
            Err(format!("expected {expected:?}, received {received:?}"))
        }
    }

    /// Triggers shutdown and joins the daemon thread.
    pub fn stop(&mut self) -> StepResult {
        self.shutdown.trigger();
        let handle = self.handle.take().ok_or("daemon not started")?;
        let result = handle
            .join()
            .map_err(|_| "daemon thread panicked".to_owned())?;
        self.result = Some(result);
        Ok(())
    }

    #[must_use]
    pub fn result(&self) -> Option<&Result<(), LaunchError>> {
        self.result.as_ref()
    }

    fn client(&mut self, name: &str) -> Result<&mut TcpStream, String> {
        self.clients
            .get_mut(name)
            .ok_or_else(|| format!("unknown client '{name}'"))
    }
}

impl Default for ServiceWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ServiceWorld {
    fn drop(&mut self) {
        self.clients.clear();
        if let Some(handle) = self.handle.take() {
            self.shutdown.trigger();
            let _ = handle.join();
        }
    }
}
