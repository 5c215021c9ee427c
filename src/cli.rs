use clap::{Parser, ValueEnum};
use mdns_logger::{Config, Family, MDNS_PORT};

/// Listens on the mDNS multicast group and prints every message it sees.
#[derive(Parser, Debug, Clone)]
#[command(name = "mdns-logger", version, about, long_about = None)]
pub struct Cli {
    /// UDP port to bind.
    #[arg(short = 'p', long = "port", value_name = "PORT", default_value_t = MDNS_PORT)]
    pub port: u16,

    /// IP family to listen on.
    #[arg(short = 'f', long = "family", value_enum, default_value_t = FamilyArg::Inet)]
    pub family: FamilyArg,

    /// Print without ANSI colours.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyArg {
    Inet,
    Inet6,
    Both,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            port: self.port,
            family: match self.family {
                FamilyArg::Inet => Family::Inet,
                FamilyArg::Inet6 => Family::Inet6,
                FamilyArg::Both => Family::Both,
            },
            color: !self.no_color,
        }
    }
}
