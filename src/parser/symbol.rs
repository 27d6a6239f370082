//! Symbol key resolution.
//!
//! Every call-frame in a trace carries an identity that the trace producer
//! has already resolved (module path, source file, function name). This
//! module folds that identity into the string key used as a node id.

use serde::{Deserialize, Serialize};

/// Identity of a callable unit as emitted by the trace producer
///
/// In JSON a bare string is a built-in, an object is a code unit:
/// `"<built-in method len>"` or
/// `{"filename": "app/views.py", "module": "app.views", "function": "index"}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameIdentity {
    /// Opaque runtime built-in, used verbatim
    Builtin(String),

    /// Code unit with a source location
    Code {
        /// Source file the function was defined in
        filename: String,

        /// Defining module/namespace, when the producer could resolve it
        #[serde(default, skip_serializing_if = "Option::is_none")]
        module: Option<String>,

        /// Local function name
        function: String,
    },
}

impl FrameIdentity {
    /// Convenience constructor for a code unit with a known module
    pub fn code(filename: impl Into<String>, module: impl Into<String>, function: impl Into<String>) -> Self {
        Self::Code {
            filename: filename.into(),
            module: Some(module.into()),
            function: function.into(),
        }
    }

    /// Resolve this identity to its symbol key
    pub fn key(&self) -> String {
        resolve_key(self)
    }
}

/// Resolve a frame identity to a stable, human-readable key
///
/// Tiers, first match wins:
/// 1. built-in: the name itself
/// 2. resolvable module: `module.function`
/// 3. anything else: `filename.function`
///
/// Never fails; an empty module name counts as unresolved.
pub fn resolve_key(identity: &FrameIdentity) -> String {
    match identity {
        FrameIdentity::Builtin(name) => name.clone(),
        FrameIdentity::Code {
            filename,
            module,
            function,
        } => match module.as_deref().filter(|m| !m.is_empty()) {
            Some(module) => format!("{}.{}", module, function),
            None => format!("{}.{}", filename, function),
        },
    }
}
