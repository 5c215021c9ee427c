use log::{debug, trace, warn};
use std::io;
use std::io::Write;
use std::marker::PhantomData;
use std::net::SocketAddr;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::{net::UdpSocket, sync::mpsc};

use crate::address_family::AddressFamily;
use crate::display::Printer;
use crate::dns_parser::{Decoded, Packet};

#[derive(Clone, Debug)]
pub enum Command {
    Shutdown,
}

/// Receive loop for one address family
///
/// Resolves with `Ok(())` on shutdown and with the error if receiving fails.
pub struct Listener<AF: AddressFamily> {
    socket: UdpSocket,
    commands: mpsc::UnboundedReceiver<Command>,
    printer: Printer,
    _af: PhantomData<AF>,
}

impl<AF: AddressFamily> Listener<AF> {
    // Will panic if called from outside the context of a runtime
    pub fn new(
        port: u16,
        printer: Printer,
    ) -> io::Result<(Listener<AF>, mpsc::UnboundedSender<Command>)> {
        let std_socket = AF::bind(port)?;
        let socket = UdpSocket::from_std(std_socket)?;

        let (tx, rx) = mpsc::unbounded_channel();

        let listener = Listener {
            socket,
            commands: rx,
            printer,
            _af: PhantomData,
        };

        Ok((listener, tx))
    }

    fn recv_packets(&mut self, cx: &mut Context) -> io::Result<()> {
        let mut recv_buf = [0u8; 65536];
        loop {
            let mut buf = tokio::io::ReadBuf::new(&mut recv_buf);
            let addr = match self.socket.poll_recv_from(cx, &mut buf) {
                Poll::Ready(Ok(addr)) => addr,
                Poll::Ready(Err(err)) => return Err(err),
                Poll::Pending => break,
            };
            self.handle_packet(buf.filled(), addr);
        }

        Ok(())
    }

    fn handle_packet(&self, buffer: &[u8], addr: SocketAddr) {
        trace!("received {} bytes from {:?}", buffer.len(), addr);

        let decoded = Packet::decode(buffer);
        if let Decoded::Failed { error, at, .. } = &decoded {
            debug!("couldn't parse packet from {:?} at {}: {}", addr, at, error);
        }

        let report = self.printer.render(buffer, &decoded);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(err) = out.write_all(report.as_bytes()).and_then(|_| out.flush()) {
            warn!("failed to write report: {}", err);
        }
    }
}

impl<AF: Unpin + AddressFamily> Future for Listener<AF> {
    type Output = io::Result<()>;
    fn poll(self: Pin<&mut Self>, cx: &mut Context) -> Poll<io::Result<()>> {
        let pinned = Pin::get_mut(self);
        while let Poll::Ready(cmd) = Pin::new(&mut pinned.commands).poll_recv(cx) {
            match cmd {
                Some(Command::Shutdown) => {
                    debug!("{} listener shutting down", AF::NAME);
                    return Poll::Ready(Ok(()));
                }
                None => {
                    warn!("logger dropped without shutdown");
                    return Poll::Ready(Ok(()));
                }
            }
        }

        if let Err(err) = pinned.recv_packets(cx) {
            return Poll::Ready(Err(err));
        }

        Poll::Pending
    }
}
