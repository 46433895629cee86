//! Win32 and Direct3D 11 side of the template.

pub mod app;
pub mod device;
pub mod message_pump;
pub mod pipeline;
pub mod renderer;
pub mod shader;
pub mod targets;
pub mod window;

use crate::error::MyResult;

/// D3D11 `Create*` calls report success and hand the object back through an
/// out parameter; a success with nothing written is still an error here.
pub(crate) fn created<T>(value: Option<T>, what: &str) -> MyResult<T> {
    value.ok_or_else(|| eyre::eyre!("{} was reported created but is null", what))
}
