//! Font asset used for toolbar captions.
//!
//! Fonts load off the UI thread. The UI polls a [`FontLoader`] once per
//! frame; anything that needs text before the font arrives skips its text.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Errors from font loading.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported font format in {0}")]
    Unsupported(PathBuf),
    #[error("font loader thread exited without a result")]
    LoaderGone,
}

/// A loaded TrueType/OpenType font.
#[derive(Debug, Clone)]
pub struct Font {
    pub name: String,
    pub data: Arc<Vec<u8>>,
}

impl Font {
    /// Read a font file and check that it parses.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "font".to_string());
        Self::from_bytes(name, data).ok_or_else(|| FontError::Unsupported(path.to_path_buf()))
    }

    /// Wrap raw bytes if they parse as a TrueType/OpenType face.
    /// Same face parser egui uses when the font is installed.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Option<Self> {
        if let Err(err) = ab_glyph::FontRef::try_from_slice(&data) {
            tracing::debug!("font rejected: {err}");
            return None;
        }
        Some(Self {
            name: name.into(),
            data: Arc::new(data),
        })
    }
}

/// Background font load.
pub struct FontLoader {
    rx: Option<Receiver<Result<Font, FontError>>>,
}

impl FontLoader {
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            tracing::debug!(path = %path.display(), "loading font");
            // The receiver may be gone if the app exits first.
            let _ = tx.send(Font::load(&path));
        });
        Self { rx: Some(rx) }
    }

    /// Returns the result once, the first time it is available.
    pub fn poll(&mut self) -> Option<Result<Font, FontError>> {
        let rx = self.rx.as_ref()?;
        match rx.try_recv() {
            Ok(result) => {
                self.rx = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.rx = None;
                Some(Err(FontError::LoaderGone))
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.rx.is_some()
    }
}
