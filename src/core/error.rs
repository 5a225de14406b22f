//=========================================================================
// Engine Errors
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::gfx::GfxError;
use crate::core::input::ConfigError;
use crate::core::platform_bridge::PlatformError;

//=== EngineError =========================================================

/// Top-level error for engine setup and runtime.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gfx(#[from] GfxError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("core thread panicked")]
    CorePanicked,
}
