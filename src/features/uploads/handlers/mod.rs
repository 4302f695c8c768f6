mod upload_handler;

pub use upload_handler::{__path_upload_file, upload_file};
