use std::any::Any;
use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use chrono::Local;
use logbridge_core::net::Facility;

use super::{Appender, AppenderSkeleton};
use crate::{Error, LoggingEvent};

pub const DEFAULT_SYSLOG_PORT: u16 = 514;

/// Transport used to reach the syslog daemon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Protocol {
    #[default]
    Udp,
    Tcp,
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UDP" => Ok(Protocol::Udp),
            "TCP" => Ok(Protocol::Tcp),
            other => Err(format!("unknown syslog protocol '{}'", other)),
        }
    }
}

enum Transport {
    Udp(UdpSocket),
    Tcp(TcpStream),
}

/// Sends events to a remote syslog daemon.
///
/// Each message is `<PRI>` followed by an optional `MMM dd HH:mm:ss host `
/// header, an optional `facility:` prefix and the rendered event. TCP
/// messages are newline terminated. A daemon that cannot be reached at
/// activation, or a write that fails, is retried on the next event.
pub struct SyslogAppender {
    skeleton: AppenderSkeleton,
    syslog_host: String,
    facility: Facility,
    facility_printing: bool,
    header: bool,
    protocol: Protocol,
    transport: Mutex<Option<Transport>>,
}

impl SyslogAppender {
    pub fn new(skeleton: AppenderSkeleton, syslog_host: impl Into<String>) -> Self {
        Self {
            skeleton,
            syslog_host: syslog_host.into(),
            facility: Facility::User,
            facility_printing: false,
            header: false,
            protocol: Protocol::Udp,
            transport: Mutex::new(None),
        }
    }

    pub fn with_facility(mut self, facility: Facility) -> Self {
        self.facility = facility;
        self
    }

    pub fn with_facility_printing(mut self, facility_printing: bool) -> Self {
        self.facility_printing = facility_printing;
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn syslog_host(&self) -> &str {
        &self.syslog_host
    }

    pub fn facility(&self) -> Facility {
        self.facility
    }

    pub fn facility_printing(&self) -> bool {
        self.facility_printing
    }

    pub fn header(&self) -> bool {
        self.header
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// The full message sent for `event`, without transport framing.
    pub fn packet(&self, event: &LoggingEvent) -> String {
        let priority = self.facility.priority_of(event.level.syslog_equivalent());
        let mut packet = format!("<{}>", priority);
        if self.header {
            packet.push_str(&Local::now().format("%b %e %H:%M:%S ").to_string());
            packet.push_str(&local_hostname());
            packet.push(' ');
        }
        if self.facility_printing {
            packet.push_str(&self.facility.name().to_ascii_lowercase());
            packet.push(':');
        }
        packet.push_str(&self.skeleton.render(event));
        packet
    }

    fn address(&self) -> Result<SocketAddr, Error> {
        let host = self.syslog_host.trim();
        let with_port = if has_port(host) {
            host.to_string()
        } else if host.contains(':') {
            format!("[{}]:{}", host, DEFAULT_SYSLOG_PORT)
        } else {
            format!("{}:{}", host, DEFAULT_SYSLOG_PORT)
        };
        let connect_error = |source| Error::Connect {
            appender: self.name().to_string(),
            address: with_port.clone(),
            source,
        };
        with_port
            .to_socket_addrs()
            .map_err(connect_error)?
            .next()
            .ok_or_else(|| {
                connect_error(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "host did not resolve",
                ))
            })
    }

    fn connect(&self) -> Result<Transport, Error> {
        let address = self.address()?;
        let connect_error = |source| Error::Connect {
            appender: self.name().to_string(),
            address: address.to_string(),
            source,
        };
        match self.protocol {
            Protocol::Udp => {
                let local: SocketAddr = if address.is_ipv4() {
                    ([0u8; 4], 0).into()
                } else {
                    ([0u16; 8], 0).into()
                };
                let socket = UdpSocket::bind(local).map_err(connect_error)?;
                socket.connect(address).map_err(connect_error)?;
                Ok(Transport::Udp(socket))
            }
            Protocol::Tcp => TcpStream::connect(address)
                .map(Transport::Tcp)
                .map_err(connect_error),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Transport>> {
        self.transport
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Appender for SyslogAppender {
    fn skeleton(&self) -> &AppenderSkeleton {
        &self.skeleton
    }

    fn append(&self, event: &LoggingEvent) {
        let packet = self.packet(event);
        let mut guard = self.lock();
        if guard.is_none() {
            match self.connect() {
                Ok(transport) => *guard = Some(transport),
                Err(err) => {
                    log::warn!("{}", err);
                    return;
                }
            }
        }
        let result = match guard.as_mut() {
            Some(Transport::Udp(socket)) => socket
                .send(packet.trim_end_matches('\n').as_bytes())
                .map(|_| ()),
            Some(Transport::Tcp(stream)) => {
                let mut framed = packet;
                if !framed.ends_with('\n') {
                    framed.push('\n');
                }
                stream
                    .write_all(framed.as_bytes())
                    .and_then(|()| stream.flush())
            }
            None => Ok(()),
        };
        if let Err(err) = result {
            log::warn!(
                "Syslog appender [{}] failed to send to {}: {}",
                self.name(),
                self.syslog_host,
                err
            );
            *guard = None;
        }
    }

    fn activate_options(&self) -> Result<(), Error> {
        if self.syslog_host.trim().is_empty() {
            return Err(Error::InvalidOption {
                appender: self.name().to_string(),
                message: "SyslogHost is not set".to_string(),
            });
        }
        match self.connect() {
            Ok(transport) => *self.lock() = Some(transport),
            Err(err) => log::warn!("{}", err),
        }
        self.skeleton.activate();
        Ok(())
    }

    fn close(&self) {
        if self.skeleton.close() {
            self.lock().take();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn has_port(host: &str) -> bool {
    if let Some(rest) = host.strip_prefix('[') {
        return rest.contains("]:");
    }
    host.matches(':').count() == 1
}

fn local_hostname() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}
