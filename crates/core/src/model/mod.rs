mod ids;
mod session;
mod table;

pub use ids::{ParseIdError, SessionId};
pub use session::{Selection, SessionState};
pub use table::{CellValue, Row, Table, TableError};
