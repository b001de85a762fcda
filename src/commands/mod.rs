mod session;
mod window;

pub use session::*;
pub use window::*;

use crate::error::CogniError;
use crate::ipc::IpcResponse;

/// Async commands borrow managed state, so Tauri needs a `Result` here.
/// Failures travel inside the response; the outer error is never produced.
pub type CommandResult<T = crate::ipc::Empty> = Result<IpcResponse<T>, CogniError>;
