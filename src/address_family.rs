use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::fmt::Debug;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

#[derive(Debug)]
pub enum Inet {}

#[derive(Debug)]
pub enum Inet6 {}

pub trait AddressFamily {
    type Addr: Into<IpAddr> + Copy + Debug;

    const ANY_ADDR: Self::Addr;
    const MDNS_GROUP: Self::Addr;

    const DOMAIN: Domain;
    const NAME: &'static str;

    fn join_multicast(socket: &Socket, multiaddr: &Self::Addr) -> io::Result<()>;

    fn udp_socket() -> io::Result<Socket> {
        Socket::new(Self::DOMAIN, Type::DGRAM, Some(Protocol::UDP))
    }

    /// Binds a non-blocking socket on `port` that receives the mDNS group
    fn bind(port: u16) -> io::Result<UdpSocket> {
        let addr: SockAddr = SocketAddr::new(Self::ANY_ADDR.into(), port).into();
        let socket = Self::udp_socket()?;
        socket.set_reuse_address(true)?;
        socket.set_nonblocking(true)?;

        #[cfg(all(unix, not(any(target_os = "illumos", target_os = "solaris"))))]
        socket.set_reuse_port(true)?;

        socket.bind(&addr)?;
        Self::join_multicast(&socket, &Self::MDNS_GROUP)?;
        Ok(socket.into())
    }
}

impl AddressFamily for Inet {
    type Addr = Ipv4Addr;

    const ANY_ADDR: Self::Addr = Ipv4Addr::UNSPECIFIED;
    const MDNS_GROUP: Self::Addr = Ipv4Addr::new(224, 0, 0, 251);

    const DOMAIN: Domain = Domain::IPV4;
    const NAME: &'static str = "inet";

    fn join_multicast(socket: &Socket, multiaddr: &Self::Addr) -> io::Result<()> {
        socket.join_multicast_v4(multiaddr, &Ipv4Addr::UNSPECIFIED)
    }
}

impl AddressFamily for Inet6 {
    type Addr = Ipv6Addr;

    const ANY_ADDR: Self::Addr = Ipv6Addr::UNSPECIFIED;
    const MDNS_GROUP: Self::Addr = Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 0xfb);

    const DOMAIN: Domain = Domain::IPV6;
    const NAME: &'static str = "inet6";

    fn udp_socket() -> io::Result<Socket> {
        let socket = Socket::new(Self::DOMAIN, Type::DGRAM, Some(Protocol::UDP))?;
        // keep v4-mapped traffic on the Inet listener
        socket.set_only_v6(true)?;
        Ok(socket)
    }

    fn join_multicast(socket: &Socket, multiaddr: &Self::Addr) -> io::Result<()> {
        socket.join_multicast_v6(multiaddr, 0)
    }
}
