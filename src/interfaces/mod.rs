// Interfaces exposed to external callers (currently the HTTP adapter).

pub mod http;
