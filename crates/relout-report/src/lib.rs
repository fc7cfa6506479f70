pub mod diagnostic;
pub mod range;
pub mod violation;

pub use diagnostic::{Diagnostic, Severity, assemble_diagnostics};
pub use range::{DiagnosticRange, Position, offset_ranges};
pub use violation::{IcViolation, assemble_ic_violations};
