pub mod nominatim;
pub mod openroute;
