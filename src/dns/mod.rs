pub mod enums;
pub mod name;
pub mod question;
pub mod resource;

pub use enums::{RecordClass, RecordType, ResponseCode};
pub use question::Question;
pub use resource::{SoaData, WireRdata, WireRecord};
