pub mod runner;

pub use runner::{Invocation, ProcessError, ProcessOutput, ProcessRunner, TokioProcessRunner, ToolCommand};
