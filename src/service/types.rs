/// Path the wrapper script is mounted at inside every rewritten container.
pub const WRAPPER_PATH: &str = "/draky-entrypoint.sh";

/// Environment variable naming the host project-config root. Left unexpanded
/// in the generated mount string; compose resolves it downstream.
pub const PROJECT_CONFIG_ROOT_VAR: &str = "DRAKY_PROJECT_CONFIG_ROOT";

const WRAPPER_FILE: &str = "draky-entrypoint.sh";

/// Host-supplied addon metadata. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonContext {
    /// Addon directory, relative to the project-config root.
    pub dirpath: String,
}

impl AddonContext {
    pub fn new(dirpath: impl Into<String>) -> Self {
        Self {
            dirpath: dirpath.into(),
        }
    }

    /// Bind-mount entry that places the addon's wrapper script at [`WRAPPER_PATH`].
    pub fn wrapper_volume(&self) -> String {
        format!(
            "${{{PROJECT_CONFIG_ROOT_VAR}}}/{}/{WRAPPER_FILE}:{WRAPPER_PATH}:cached",
            self.dirpath
        )
    }
}
