//! Generic struct: tagged field types become where-bounds.

use kvmarshal::{Decode, Decoder, MapKv};

#[derive(Default, Decode)]
pub struct Wrapped<T> {
    #[decode(kv = "value")]
    pub value: T,
    pub marker: std::marker::PhantomData<T>,
}

fn main() {
    let decoder = Decoder::new(MapKv::new());
    let mut wrapped = Wrapped::<u64>::default();
    let _ = decoder.decode(&mut wrapped);
}
