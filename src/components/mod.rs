pub mod compressed;
pub mod extensions;
pub mod lonlat;
pub mod position;
