//! Plain struct with leaves, a nested struct and an untagged field.

use kvmarshal::{unmarshal, Decode, MapKv};

#[derive(Default, Decode)]
pub struct Logger {
    #[decode(kv = "level")]
    pub level: String,
}

#[derive(Default, Decode)]
pub struct Config {
    #[decode(kv = "host", consul = "service/host")]
    pub host: String,
    #[decode(kv = "port")]
    pub port: u16,
    #[decode(kv = "logger")]
    pub logger: Option<Logger>,
    // No tag, so no `AsTarget` impl is needed.
    pub cache: std::collections::HashSet<u8>,
}

fn main() {
    let mut cfg = Config::default();
    let _ = unmarshal(MapKv::new(), &mut cfg);
}
