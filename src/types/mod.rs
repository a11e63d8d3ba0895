//! Wire types shared by the services and the HTTP layer.

pub mod endpoint;
pub mod response;

pub use endpoint::Endpoint;

/// Local wall-clock time in ISO-8601 with microseconds, the format every JSON body carries.
pub fn timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
