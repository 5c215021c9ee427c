//! Passive mDNS listener
//!
//! Joins the mDNS multicast group, decodes every datagram that arrives with
//! [`dns_parser`] and prints the header, questions and records of each.
//! Datagrams that fail to decode are printed as a hex dump instead of
//! stopping the listener.

use futures_util::future::{self, TryFutureExt};
use log::{trace, warn};
use std::future::Future;
use std::io;
use std::pin::Pin;
use tokio::sync::mpsc;

mod address_family;
pub mod display;
pub mod dns_parser;
mod listener;

use crate::address_family::{AddressFamily, Inet, Inet6};
use crate::display::Printer;
use crate::listener::{Command, Listener};

pub const MDNS_PORT: u16 = 5353;

type Task = Pin<Box<dyn Future<Output = io::Result<()>>>>;

/// Which IP families to listen on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Inet,
    Inet6,
    Both,
}

impl Family {
    fn has_inet(self) -> bool {
        self != Family::Inet6
    }

    fn has_inet6(self) -> bool {
        self != Family::Inet
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub family: Family,
    /// Colour output lines with ANSI escapes
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: MDNS_PORT,
            family: Family::Inet,
            color: true,
        }
    }
}

/// Handle to the running listeners. Dropping it shuts them down.
pub struct Logger {
    commands: Vec<mpsc::UnboundedSender<Command>>,
}

impl Logger {
    /// Binds the listeners on the current tokio runtime
    ///
    /// Returns the handle and a future that drives all listeners. It
    /// completes once they have shut down, or with the first receive error.
    /// A family that fails to bind is skipped as long as another one works.
    ///
    /// Must be called from within a tokio runtime with IO enabled.
    pub fn with_default_handle(
        config: Config,
    ) -> io::Result<(Logger, impl Future<Output = io::Result<()>>)> {
        let printer = Printer::new(config.color);
        let mut commands = Vec::with_capacity(2);
        let mut tasks: Vec<Task> = Vec::with_capacity(2);
        let mut last_err = None;

        if config.family.has_inet() {
            if let Err(err) = start::<Inet>(config.port, printer, &mut commands, &mut tasks) {
                last_err = Some(err);
            }
        }
        if config.family.has_inet6() {
            if let Err(err) = start::<Inet6>(config.port, printer, &mut commands, &mut tasks) {
                last_err = Some(err);
            }
        }

        if tasks.is_empty() {
            return Err(last_err
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "no listener started")));
        }

        let task = future::try_join_all(tasks).map_ok(|_| ());
        Ok((Logger { commands }, task))
    }

    /// Asks every listener to stop
    pub fn shutdown(&self) {
        for tx in self.commands.iter() {
            if tx.send(Command::Shutdown).is_err() {
                trace!("listener already stopped");
            }
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn start<AF: AddressFamily + Unpin + 'static>(
    port: u16,
    printer: Printer,
    commands: &mut Vec<mpsc::UnboundedSender<Command>>,
    tasks: &mut Vec<Task>,
) -> io::Result<()> {
    match Listener::<AF>::new(port, printer) {
        Ok((listener, tx)) => {
            commands.push(tx);
            tasks.push(Box::pin(listener));
            Ok(())
        }
        Err(err) => {
            warn!(
                "couldn't listen on {} {:?} port {}: {}",
                AF::NAME,
                AF::MDNS_GROUP,
                port,
                err
            );
            Err(err)
        }
    }
}
