mod envelope;
pub use self::envelope::{Envelope, Payload, ResultSet};

mod format;
pub use self::format::ResponseFormat;
