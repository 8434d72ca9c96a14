//! Fixed upload policy shared by the client pipeline and the server.

/// The only media type accepted for project files.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Maximum accepted project file size (30 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 30 * 1024 * 1024;

/// Bytes per MiB, used when reporting sizes to users.
pub const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Number of leading bytes inspected by the content sniffer.
pub const SNIFF_PREFIX_LEN: usize = 4096;

/// Public path prefix under which stored uploads are served.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Multipart field carrying the project file.
pub const FILE_FIELD_NAME: &str = "pdfFile";

/// Donations at or above this amount (in dollars) earn the studio discount.
pub const DISCOUNT_THRESHOLD: f64 = 100.0;
