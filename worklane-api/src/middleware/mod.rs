/// API middleware
///
/// - `security`: Security-related HTTP response headers

pub mod security;
