use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Error returned by [`ShaderManager`] lookups and loads.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("no shader registered under `{0}`")]
    Missing(String),

    #[error("failed to read shader `{name}` from {path}: {source}")]
    Io {
        name: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("shader `{name}` is not valid WGSL:\n{message}")]
    Parse { name: String, message: String },
}

/// A named WGSL program.
///
/// Cloning is cheap; the source is shared. Renderers compile it into a
/// `wgpu::ShaderModule` when their pipeline is first built.
#[derive(Debug, Clone)]
pub struct Shader {
    name: Arc<str>,
    source: Arc<str>,
}

impl Shader {
    pub fn new(name: &str, source: &str) -> Self {
        Self {
            name: Arc::from(name),
            source: Arc::from(source),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        let label = format!("dvd {} shader", self.name);
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(self.source().into()),
        })
    }
}

/// Owns the shader programs used by the renderers, keyed by name.
///
/// The built-in programs are registered under [`ShaderManager::SHAPE`] and
/// [`ShaderManager::TEXT`]. Loading a file under an existing name replaces it.
#[derive(Debug, Default)]
pub struct ShaderManager {
    shaders: HashMap<String, Shader>,
}

impl ShaderManager {
    /// Program used by `RectRenderer`.
    pub const SHAPE: &'static str = "shape";
    /// Program used by `TextRenderer`.
    pub const TEXT: &'static str = "text";

    pub fn new() -> Self {
        Self::default()
    }

    /// A manager pre-populated with the shaders embedded in this crate.
    pub fn with_builtins() -> Self {
        let mut manager = Self::new();
        manager.insert(Self::SHAPE, include_str!("wgsl/shape.wgsl"));
        manager.insert(Self::TEXT, include_str!("wgsl/text.wgsl"));
        manager
    }

    /// Registers (or replaces) a program from source.
    pub fn insert(&mut self, name: &str, source: &str) {
        self.shaders.insert(name.to_string(), Shader::new(name, source));
    }

    /// Reads a WGSL file and registers it under `name`.
    ///
    /// The source is parsed before it replaces anything, so a broken file
    /// fails here instead of at pipeline creation.
    pub fn load_file(&mut self, name: &str, path: impl AsRef<Path>) -> Result<(), ShaderError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            name: name.to_string(),
            path: path.display().to_string(),
            source,
        })?;
        validate_wgsl(name, &source)?;
        self.insert(name, &source);
        log::info!("loaded shader `{name}` from {}", path.display());
        Ok(())
    }

    /// Loads every `<name>.wgsl` file in `dir`, keyed by file stem.
    ///
    /// Returns the number of programs loaded.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, ShaderError> {
        let dir = dir.as_ref();
        let io_err = |source| ShaderError::Io {
            name: "*".to_string(),
            path: dir.display().to_string(),
            source,
        };

        let mut loaded = 0;
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("wgsl") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else { continue };
            let name = name.to_string();
            self.load_file(&name, &path)?;
            loaded += 1;
        }
        Ok(loaded)
    }

    pub fn get(&self, name: &str) -> Result<&Shader, ShaderError> {
        self.shaders
            .get(name)
            .ok_or_else(|| ShaderError::Missing(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }
}

fn validate_wgsl(name: &str, source: &str) -> Result<(), ShaderError> {
    naga::front::wgsl::parse_str(source)
        .map(drop)
        .map_err(|e| ShaderError::Parse {
            name: name.to_string(),
            message: e.emit_to_string(source),
        })
}
