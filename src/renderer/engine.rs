//! Image engines: the collaborator that touches pixels
//!
//! The layout engine never decodes images. Measuring, cropping, resizing and
//! appending are delegated to an [`ImageEngine`]; [`MagickEngine`] does so by
//! running ImageMagick.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tempfile::TempDir;
use thiserror::Error;
use tracing::debug;

use crate::layout::{ImageSize, PixelRect};

use super::config::MagickConfig;

/// Errors reported by an image engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("unexpected output from '{program}': {output:?}")]
    UnexpectedOutput { program: String, output: String },

    #[error("cannot crop an empty area {crop}")]
    EmptyCrop { crop: PixelRect },
}

/// Operations the render driver needs from an image library
///
/// Handles refer to intermediate images owned by the engine. Every handle
/// produced is eventually passed to [`ImageEngine::release`].
pub trait ImageEngine {
    type Handle;

    /// Pixel dimensions of the image at `path`
    fn measure(&mut self, path: &Path) -> Result<ImageSize, EngineError>;

    /// Cut `crop` out of the source and scale it to exactly `target`
    fn crop_and_resize(
        &mut self,
        source: &Path,
        crop: PixelRect,
        target: ImageSize,
    ) -> Result<Self::Handle, EngineError>;

    /// Place images side by side, left to right in the given order
    fn compose_horizontal(&mut self, parts: &[Self::Handle]) -> Result<Self::Handle, EngineError>;

    /// Write an image to its final location
    fn save(&mut self, image: &Self::Handle, path: &Path) -> Result<(), EngineError>;

    /// Discard an intermediate image
    fn release(&mut self, image: Self::Handle) -> Result<(), EngineError>;
}

/// Engine running the ImageMagick command line tools
///
/// Intermediate images are files in a private scratch directory which is
/// removed when the engine is dropped.
pub struct MagickEngine {
    config: MagickConfig,
    scratch: TempDir,
    next_id: usize,
}

impl MagickEngine {
    pub fn new(config: MagickConfig) -> Result<Self, EngineError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("wallsplit-");
        let scratch = match &config.scratch_parent {
            Some(dir) => builder.tempdir_in(dir)?,
            None => builder.tempdir()?,
        };
        debug!("scratch directory {}", scratch.path().display());
        Ok(Self {
            config,
            scratch,
            next_id: 0,
        })
    }

    fn scratch_file(&mut self) -> PathBuf {
        self.next_id += 1;
        self.scratch.path().join(format!("part-{}.miff", self.next_id))
    }

    /// Run a program to completion, returning its standard output
    fn invoke(&self, program: &str, args: &[OsString]) -> Result<String, EngineError> {
        debug!("{} {}", program, display_args(args));
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| EngineError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(EngineError::CommandFailed {
                program: program.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn display_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse `identify -format "%w %h"` output
fn parse_dimensions(output: &str) -> Option<ImageSize> {
    let mut parts = output.split_whitespace();
    let width = parts.next()?.parse().ok()?;
    let height = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(ImageSize::new(width, height))
}

/// First frame only, so multi-frame inputs report one size
fn first_frame(path: &Path) -> OsString {
    let mut arg = path.as_os_str().to_os_string();
    arg.push("[0]");
    arg
}

impl ImageEngine for MagickEngine {
    type Handle = PathBuf;

    fn measure(&mut self, path: &Path) -> Result<ImageSize, EngineError> {
        let args: Vec<OsString> = vec!["-format".into(), "%w %h".into(), first_frame(path)];
        let output = self.invoke(&self.config.identify, &args)?;
        parse_dimensions(&output).ok_or_else(|| EngineError::UnexpectedOutput {
            program: self.config.identify.clone(),
            output,
        })
    }

    fn crop_and_resize(
        &mut self,
        source: &Path,
        crop: PixelRect,
        target: ImageSize,
    ) -> Result<PathBuf, EngineError> {
        // ImageMagick reads a zero extent as "the whole image"
        if crop.width == 0 || crop.height == 0 {
            return Err(EngineError::EmptyCrop { crop });
        }
        let out = self.scratch_file();
        let args: Vec<OsString> = vec![
            source.into(),
            "-crop".into(),
            crop.to_string().into(),
            "+repage".into(),
            "-resize".into(),
            format!("{}!", target).into(),
            out.clone().into(),
        ];
        self.invoke(&self.config.convert, &args)?;
        Ok(out)
    }

    fn compose_horizontal(&mut self, parts: &[PathBuf]) -> Result<PathBuf, EngineError> {
        let out = self.scratch_file();
        let mut args: Vec<OsString> = parts.iter().map(|p| p.clone().into()).collect();
        args.push("+append".into());
        args.push(out.clone().into());
        self.invoke(&self.config.convert, &args)?;
        Ok(out)
    }

    fn save(&mut self, image: &PathBuf, path: &Path) -> Result<(), EngineError> {
        // Converting rather than copying picks the format from the extension
        let args: Vec<OsString> = vec![image.into(), path.into()];
        self.invoke(&self.config.convert, &args)?;
        Ok(())
    }

    fn release(&mut self, image: PathBuf) -> Result<(), EngineError> {
        std::fs::remove_file(&image)?;
        Ok(())
    }
}
