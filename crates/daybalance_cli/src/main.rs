//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `daybalance_core` linkage.
//! - Resolve a relative-date expression from the command line against the
//!   production clock, for quick local checks.

use daybalance_core::{format_date, resolve, Clock, FixedOffsetClock};

fn main() {
    println!("daybalance_core version={}", daybalance_core::core_version());

    let expression = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if expression.is_empty() {
        return;
    }

    let today = FixedOffsetClock::default().today();
    println!(
        "{} -> {}",
        expression.trim(),
        format_date(resolve(&expression, today))
    );
}
