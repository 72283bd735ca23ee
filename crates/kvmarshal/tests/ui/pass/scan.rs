//! Scan hooks via `ScanTarget` and the struct-level `scan` attribute.

use kvmarshal::{BoxError, Decode, Scan, ScanTarget};

#[derive(Default, ScanTarget)]
pub struct Csv(pub Vec<u32>);

impl Scan for Csv {
    fn scan(&mut self, raw: &str) -> Result<(), BoxError> {
        self.0 = raw
            .split(',')
            .map(str::parse)
            .collect::<Result<_, _>>()?;
        Ok(())
    }
}

#[derive(Default, Decode)]
#[decode(scan)]
pub struct Pair {
    #[decode(kv = "left")]
    pub left: String,
}

impl Scan for Pair {
    fn scan(&mut self, raw: &str) -> Result<(), BoxError> {
        raw.clone_into(&mut self.left);
        Ok(())
    }
}

#[derive(Default, Decode)]
pub struct Holder {
    #[decode(kv = "csv")]
    pub csv: Csv,
    #[decode(kv = "pair")]
    pub pair: Box<Pair>,
}

fn main() {
    let mut holder = Holder::default();
    let _ = kvmarshal::unmarshal(kvmarshal::MapKv::new(), &mut holder);
}
