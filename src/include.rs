use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::lexer::Lexer;

/// Default nesting limit for included source files.
pub const MAX_INCLUDE_DEPTH: usize = 48;

#[derive(thiserror::Error, Debug)]
pub enum IncludeError {
    #[error("Exceeded max include limit of {max}")]
    DepthExceeded { max: usize },
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Bounded stack of lexers, one per open source file.
///
/// Each frame owns its file name and source buffer; popping a frame drops
/// both.
#[derive(Debug)]
pub struct IncludeStack {
    frames: Vec<Lexer>,
    max_depth: usize,
}

impl Default for IncludeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl IncludeStack {
    pub fn new() -> Self {
        Self::with_max_depth(MAX_INCLUDE_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { frames: Vec::with_capacity(max_depth.min(MAX_INCLUDE_DEPTH)), max_depth }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn current(&mut self) -> Option<&mut Lexer> {
        self.frames.last_mut()
    }

    /// Read `path` and push a fresh lexer over its contents.
    ///
    /// On failure the stack is left untouched.
    pub fn push(&mut self, path: impl AsRef<Path>) -> Result<&mut Lexer, IncludeError> {
        let path = path.as_ref();
        self.check_depth()?;
        let src = fs::read_to_string(path)
            .map_err(|source| IncludeError::Read { path: path.to_path_buf(), source })?;
        self.push_source(path.display().to_string(), src)
    }

    /// Push a lexer over an in-memory buffer under the same depth limit.
    pub fn push_source(
        &mut self,
        name: impl Into<String>,
        src: impl Into<String>,
    ) -> Result<&mut Lexer, IncludeError> {
        self.check_depth()?;
        let lexer = Lexer::new(name, src);
        debug!(file = lexer.file(), depth = self.frames.len() + 1, "push source frame");
        let idx = self.frames.len();
        self.frames.push(lexer);
        Ok(&mut self.frames[idx])
    }

    /// Drop the top frame and return the one below it, if any.
    pub fn pop(&mut self) -> Option<&mut Lexer> {
        let popped = self.frames.pop()?;
        debug!(file = popped.file(), depth = self.frames.len(), "pop source frame");
        drop(popped);
        self.frames.last_mut()
    }

    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    fn check_depth(&self) -> Result<(), IncludeError> {
        if self.frames.len() >= self.max_depth {
            warn!(max = self.max_depth, "include depth exceeded");
            return Err(IncludeError::DepthExceeded { max: self.max_depth });
        }
        Ok(())
    }
}
