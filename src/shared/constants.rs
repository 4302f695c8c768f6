/// Default number of prompts returned by the public listing
pub const DEFAULT_PUBLIC_LIMIT: i64 = 50;

/// Largest `limit` accepted by the public listing
pub const MAX_PUBLIC_LIMIT: i64 = 500;

/// Fixed cap of the admin dashboard listing
pub const ADMIN_LIST_LIMIT: i64 = 100;

/// Author stored for admin-created prompts submitted without one
pub const DEFAULT_AUTHOR: &str = "Prompt Center";

/// Public path prefix under which uploaded files are served
pub const UPLOADS_PATH: &str = "/uploads";
