mod request_id;
mod text_field;

pub use request_id::{LatestOnly, RequestId};
pub use text_field::TextField;
