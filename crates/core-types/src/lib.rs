pub mod enums;
pub mod error;
pub mod structs;
pub mod window;

// Re-export the core types to provide a clean public API.
pub use enums::Period;
pub use error::CoreError;
pub use structs::{Instrument, InstrumentUpdate, NewInstrument, PriceBar, SymbolBar};
pub use window::{parse_date, DateWindow};
