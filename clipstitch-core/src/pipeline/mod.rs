// ============================================================================
// clipstitch-core/src/pipeline/mod.rs
// ============================================================================
//
// PIPELINE: Run Orchestration
//
// Sequences one merge run as an explicit stage machine:
//
//   Scanning -> Normalizing(0..n) -> Manifesting -> Concatenating -> CleaningUp -> Done
//
// Any stage after Scanning may fail; the run then jumps straight to
// CleaningUp, so temporary files never outlive the run, and the first error
// is returned afterwards. A scan that finds nothing goes Scanning -> Done
// without touching ffmpeg or the filesystem.
//
// KEY COMPONENTS:
// - PipelineStage: the stages and their legal transitions
// - Pipeline: one run over a RunConfig, generic over the tool seams
// - RunSummary: what a finished run reports back to the caller
// - run_pipeline: convenience entry point with the default dependency check

// ---- Internal crate imports ----
use crate::config::{NormalizeSettings, RunConfig};
use crate::discovery::{ClipSource, find_clips};
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegSpawner, FfprobeExecutor, check_dependency};
use crate::processing::{cleanup, concatenate, detect_rotation, normalize_clip, write_manifest};
use crate::temp_files::{artifact_path, create_run_dir, manifest_path};

// ---- Standard library imports ----
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};


// ============================================================================
// STAGES
// ============================================================================

/// Stage of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Scanning,
    /// Normalizing the clip at this index in scan order
    Normalizing(usize),
    Manifesting,
    Concatenating,
    CleaningUp,
    Done,
}

impl PipelineStage {
    /// Whether the machine may move from `self` to `next`.
    #[must_use]
    pub fn can_advance_to(self, next: PipelineStage) -> bool {
        use PipelineStage::*;
        match (self, next) {
            (Scanning, Normalizing(0) | CleaningUp | Done) => true,
            (Normalizing(i), Normalizing(j)) => j == i + 1,
            (Normalizing(_), Manifesting | CleaningUp) => true,
            (Manifesting, Concatenating | CleaningUp) => true,
            (Concatenating, CleaningUp) => true,
            (CleaningUp, Done) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Scanning => write!(f, "scanning"),
            PipelineStage::Normalizing(i) => write!(f, "normalizing clip {}", i + 1),
            PipelineStage::Manifesting => write!(f, "writing manifest"),
            PipelineStage::Concatenating => write!(f, "concatenating"),
            PipelineStage::CleaningUp => write!(f, "cleaning up"),
            PipelineStage::Done => write!(f, "done"),
        }
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of clips merged
    pub clips: usize,
    /// Output written, `None` when there was nothing to merge
    pub output: Option<PathBuf>,
    pub output_size: u64,
    pub elapsed: Duration,
    /// Temporary files that could not be removed
    pub cleanup_failures: usize,
}

impl RunSummary {
    fn nothing_to_do(elapsed: Duration) -> Self {
        Self {
            clips: 0,
            output: None,
            output_size: 0,
            elapsed,
            cleanup_failures: 0,
        }
    }
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

/// Checks that an external tool is usable before work starts.
pub type DependencyCheck = fn(&str) -> CoreResult<()>;

/// A single merge run.
///
/// Generic over the ffmpeg and ffprobe seams so tests can drive it with the
/// mock implementations.
pub struct Pipeline<'a, S: FfmpegSpawner, P: FfprobeExecutor> {
    spawner: &'a S,
    ffprobe: &'a P,
    config: &'a RunConfig,
    settings: &'a NormalizeSettings,
    dependency_check: DependencyCheck,
    stage: PipelineStage,
}

impl<'a, S: FfmpegSpawner, P: FfprobeExecutor> Pipeline<'a, S, P> {
    pub fn new(
        spawner: &'a S,
        ffprobe: &'a P,
        config: &'a RunConfig,
        settings: &'a NormalizeSettings,
    ) -> Self {
        Self {
            spawner,
            ffprobe,
            config,
            settings,
            dependency_check: check_dependency,
            stage: PipelineStage::Scanning,
        }
    }

    /// Replaces the `ffmpeg -version` check run before the first clip.
    #[must_use]
    pub fn with_dependency_check(mut self, check: DependencyCheck) -> Self {
        self.dependency_check = check;
        self
    }

    #[must_use]
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    fn advance(&mut self, next: PipelineStage) -> CoreResult<()> {
        if !self.stage.can_advance_to(next) {
            return Err(CoreError::OperationFailed(format!(
                "illegal pipeline transition from {} to {}",
                self.stage, next
            )));
        }
        log::debug!("Pipeline stage: {} -> {}", self.stage, next);
        self.stage = next;
        Ok(())
    }

    /// Executes the run to completion.
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` - the output was written, or there was nothing to merge
    /// * `Err(CoreError)` - the first failure; temporary files are already gone
    pub fn run(mut self) -> CoreResult<RunSummary> {
        let start_time = Instant::now();

        log::info!("Scanning {}", self.config.input_directory.display());
        let clips = find_clips(&self.config.input_directory, &self.config.allowed_extensions)?;

        if clips.is_empty() {
            log::warn!(
                "No clips matching {:?} in {}; nothing to merge",
                self.config.allowed_extensions,
                self.config.input_directory.display()
            );
            self.advance(PipelineStage::Done)?;
            return Ok(RunSummary::nothing_to_do(start_time.elapsed()));
        }

        (self.dependency_check)("ffmpeg")?;

        let run_dir = create_run_dir(&self.config.temp_base())?;
        log::debug!("Working directory: {}", run_dir.path().display());

        let mut temp_files: Vec<PathBuf> = Vec::with_capacity(clips.len() + 1);
        let outcome = self.process(&clips, run_dir.path(), &mut temp_files);

        if let Err(e) = &outcome {
            log::error!("Run aborted while {}: {}", self.stage, e);
        }

        self.advance(PipelineStage::CleaningUp)?;
        let report = cleanup(&temp_files);
        if let Err(e) = run_dir.close() {
            log::warn!("Failed to remove working directory: {}", e);
        }
        self.advance(PipelineStage::Done)?;

        let output_size = outcome?;
        let summary = RunSummary {
            clips: clips.len(),
            output: Some(self.config.output_file.clone()),
            output_size,
            elapsed: start_time.elapsed(),
            cleanup_failures: report.failed.len(),
        };
        log::info!(
            "Merged {} clips into {}",
            summary.clips,
            self.config.output_file.display()
        );
        Ok(summary)
    }

    /// Normalize, manifest and concatenate. Every file this may create is
    /// recorded in `temp_files` before the step that creates it.
    fn process(
        &mut self,
        clips: &[ClipSource],
        run_dir: &Path,
        temp_files: &mut Vec<PathBuf>,
    ) -> CoreResult<u64> {
        let total = clips.len();
        let mut artifacts = Vec::with_capacity(total);

        for (index, clip) in clips.iter().enumerate() {
            self.advance(PipelineStage::Normalizing(index))?;

            let output = artifact_path(run_dir, index);
            temp_files.push(output.clone());

            let rotation = detect_rotation(self.ffprobe, &clip.path);
            log::info!(
                "[{}/{}] Normalizing {} (rotation {})",
                index + 1,
                total,
                clip.display_name(),
                rotation
            );

            let normalized =
                normalize_clip(self.spawner, clip, index, &output, rotation, self.settings)?;
            artifacts.push(normalized.path);
        }

        self.advance(PipelineStage::Manifesting)?;

        let manifest = manifest_path(run_dir);
        temp_files.push(manifest.clone());
        write_manifest(&manifest, &artifacts)?;

        self.advance(PipelineStage::Concatenating)?;
        concatenate(self.spawner, &manifest, &self.config.output_file)
    }
}

/// Runs one merge with the default `ffmpeg -version` dependency check.
pub fn run_pipeline<S: FfmpegSpawner, P: FfprobeExecutor>(
    spawner: &S,
    ffprobe: &P,
    config: &RunConfig,
    settings: &NormalizeSettings,
) -> CoreResult<RunSummary> {
    Pipeline::new(spawner, ffprobe, config, settings).run()
}
