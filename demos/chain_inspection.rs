use coded_errors::{StructuredError, chain, definitions, with_code};
use std::error::Error;
use std::fmt;
use std::io;

/// A wrapper from some other library, linked only through `source()`.
#[derive(Debug)]
struct PoolError {
    inner: StructuredError,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection pool: {}", self.inner)
    }
}

impl Error for PoolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.inner)
    }
}

fn query() -> Result<(), PoolError> {
    let io_err = io::Error::new(io::ErrorKind::TimedOut, "socket timed out");
    let inner = StructuredError::wrap_with(
        io_err,
        "run query",
        [with_code(definitions::SERVICE_UNAVAILABLE)],
    );
    Err(PoolError { inner })
}

fn main() {
    println!("--- Chain Inspection Example ---\n");

    let Err(pool_err) = query() else {
        return;
    };

    // Inherits SERVICE_UNAVAILABLE through the foreign layer.
    let err = StructuredError::wrap(pool_err, "load dashboard");
    println!("1. [RENDERED]\n   {err}\n");

    println!("2. [CHAIN]");
    for (depth, node) in err.chain().enumerate() {
        let code = chain::find_code(node).map_or("-", |code| code.as_str());
        println!("   {depth}: {node}  (nearest code: {code})");
    }

    println!("\n3. [MATCHING]");
    let escalated =
        StructuredError::wrap_with(err, "render page", [with_code(definitions::INTERNAL_ERROR)]);
    println!(
        "   is SERVICE_UNAVAILABLE (single hop): {}",
        escalated.has_code(&definitions::SERVICE_UNAVAILABLE)
    );
    println!(
        "   chain contains SERVICE_UNAVAILABLE:  {}",
        chain::contains_code(&escalated, &definitions::SERVICE_UNAVAILABLE)
    );
    println!("   root cause: {}", chain::root_cause(&escalated));

    println!("\n4. [LOG RECORD]");
    escalated.with_log_entry(|log| println!("   {log}"));
}
