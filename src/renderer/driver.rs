//! Render driver: turns computed panel crops into wallpaper files

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::layout::{ImageSize, PanelCrop};

use super::engine::{EngineError, ImageEngine};

/// One output wallpaper: the panels to cut, in left to right order
#[derive(Debug, Clone, PartialEq)]
pub struct GroupJob {
    /// 1-based group number
    pub index: usize,
    pub output: PathBuf,
    pub panels: Vec<PanelCrop>,
}

/// Everything needed to produce the wallpapers, without touching pixels yet
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub source: PathBuf,
    pub image: ImageSize,
    pub jobs: Vec<GroupJob>,
}

impl RenderPlan {
    /// Assign an output file to each group of panels
    pub fn new(
        source: impl Into<PathBuf>,
        image: ImageSize,
        output: &Path,
        groups: Vec<Vec<PanelCrop>>,
    ) -> Self {
        let count = groups.len();
        let jobs = groups
            .into_iter()
            .enumerate()
            .map(|(i, panels)| GroupJob {
                index: i + 1,
                output: output_path(output, i + 1, count),
                panels,
            })
            .collect();
        Self {
            source: source.into(),
            image,
            jobs,
        }
    }

    /// Files this plan writes, in order
    pub fn outputs(&self) -> impl Iterator<Item = &Path> {
        self.jobs.iter().map(|j| j.output.as_path())
    }
}

/// Output file of a group.
///
/// A single group writes to `output` itself. With several groups, each file
/// is named `{index}_{file name}` in the directory of `output`.
pub fn output_path(output: &Path, index: usize, group_count: usize) -> PathBuf {
    if group_count <= 1 {
        return output.to_path_buf();
    }
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{}_{}", index, name))
}

/// The pretend report
impl fmt::Display for RenderPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "source {} ({})", self.source.display(), self.image)?;
        for job in &self.jobs {
            writeln!(f, "{}:", job.output.display())?;
            for panel in &job.panels {
                writeln!(f, "  crop {} -> {}", panel.crop, panel.target)?;
            }
        }
        Ok(())
    }
}

/// Produce every output file of the plan.
///
/// Groups and panels are processed strictly in order. Intermediate images of
/// a group are released once the group has been saved. The first failure
/// aborts the run; intermediates of the failing group are left to the engine.
pub fn execute<E: ImageEngine>(plan: &RenderPlan, engine: &mut E) -> Result<(), EngineError> {
    for job in &plan.jobs {
        debug!(group = job.index, "cropping {} panels", job.panels.len());
        let mut parts = Vec::with_capacity(job.panels.len());
        for panel in &job.panels {
            parts.push(engine.crop_and_resize(&plan.source, panel.crop, panel.target)?);
        }

        let composed = engine.compose_horizontal(&parts)?;
        engine.save(&composed, &job.output)?;
        info!("wrote {}", job.output.display());

        for part in parts {
            engine.release(part)?;
        }
        engine.release(composed)?;
    }
    Ok(())
}
