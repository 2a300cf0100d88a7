//! Error types shared by the core crate and the client.

use std::fmt;

/// Which programmable stage a shader belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The matching GL shader type constant.
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Whether a missing shader input was an attribute or a uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Attribute,
    Uniform,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Attribute => f.write_str("attribute"),
            BindingKind::Uniform => f.write_str("uniform"),
        }
    }
}

/// Everything that can go wrong while bringing a scene up.
///
/// All of these are fatal for the run: the frame loop never starts.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("could not acquire a rendering surface: {0}")]
    SurfaceAcquisitionFailed(String),

    #[error("failed to allocate {what} buffer for `{geometry}`: {reason}")]
    BufferAllocationFailed {
        geometry: &'static str,
        what: &'static str,
        reason: String,
    },

    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompileFailed { stage: ShaderStage, log: String },

    #[error("failed to link shader program: {0}")]
    ShaderLinkFailed(String),

    #[error("shader program has no {kind} named `{name}`")]
    AttributeOrUniformNotFound {
        kind: BindingKind,
        name: &'static str,
    },

    #[error("failed to create vertex array for `{geometry}`: {reason}")]
    VaoCreationFailed {
        geometry: &'static str,
        reason: String,
    },
}

/// Errors from loading a [`crate::config::DemoConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_piece() {
        let err = RenderError::AttributeOrUniformNotFound {
            kind: BindingKind::Uniform,
            name: "matWorld",
        };
        assert_eq!(err.to_string(), "shader program has no uniform named `matWorld`");

        let err = RenderError::ShaderCompileFailed {
            stage: ShaderStage::Fragment,
            log: "0:1: syntax error".to_string(),
        };
        assert_eq!(err.to_string(), "failed to compile fragment shader: 0:1: syntax error");
    }
}
