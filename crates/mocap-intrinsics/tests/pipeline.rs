//! End-to-end pipeline runs against synthetic video collaborators.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use approx::assert_relative_eq;
use nalgebra::Point2;

use mocap_intrinsics::core::load_parameters;
use mocap_intrinsics::{
    run_calibration, CalibrateError, CheckerboardSpec, CornerDetector, CornerView,
    DeploymentConfig, FrameSource, IntrinsicsSolver, PipelineError, ResolveError, RunConfig,
    SolveError, SolvedIntrinsics, TrialId, VideoProvider,
};

const CAMERA_MODEL: &str = "iPadMini6th_720_60FPS";

/// One synthetic frame; `seed` shifts the corner grid so the solver can tell
/// trials apart.
struct StubFrame {
    seed: f64,
}

struct StubSource {
    seed: f64,
    frame_count: usize,
    cursor: usize,
}

impl FrameSource for StubSource {
    type Frame = StubFrame;
    type Error = io::Error;

    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn resolution(&self) -> (u32, u32) {
        (1280, 720)
    }

    fn camera_model(&self) -> &str {
        CAMERA_MODEL
    }

    fn next_frame(&mut self) -> Result<Option<StubFrame>, io::Error> {
        if self.cursor >= self.frame_count {
            return Ok(None);
        }
        self.cursor += 1;
        Ok(Some(StubFrame { seed: self.seed }))
    }
}

/// Maps trial ids to synthetic videos: (corner-grid seed, frame count).
struct StubProvider {
    videos: HashMap<TrialId, (f64, usize)>,
}

impl VideoProvider for StubProvider {
    type Source = StubSource;

    fn open(&self, trial: &TrialId) -> Result<StubSource, io::Error> {
        let &(seed, frame_count) = self.videos.get(trial).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no video for {trial}"))
        })?;
        Ok(StubSource {
            seed,
            frame_count,
            cursor: 0,
        })
    }
}

struct StubDetector;

impl CornerDetector for StubDetector {
    type Frame = StubFrame;

    fn detect(&self, frame: &StubFrame, board: &CheckerboardSpec) -> Option<Vec<Point2<f64>>> {
        let mut corners = Vec::with_capacity(board.corner_count());
        for row in 0..board.corners_high {
            for col in 0..board.corners_wide {
                corners.push(Point2::new(frame.seed + col as f64, row as f64));
            }
        }
        Some(corners)
    }
}

/// Reads the grid seed back out of the views and derives intrinsics from it,
/// so each synthetic trial solves to a known parameter set.
struct StubSolver;

impl IntrinsicsSolver for StubSolver {
    fn solve(
        &self,
        views: &[CornerView],
        _board: &CheckerboardSpec,
        _resolution: (u32, u32),
    ) -> Result<SolvedIntrinsics, SolveError> {
        let seed = views
            .first()
            .and_then(|v| v.first())
            .map(|p| p.x)
            .ok_or(SolveError::TooFewViews { needed: 1, got: 0 })?;
        Ok(SolvedIntrinsics {
            focal: [1000.0 + seed, 1000.0 + seed / 2.0],
            principal_point: [640.0, 360.0],
            distortion: vec![0.1, -0.2, 0.0, 0.0, 0.05],
            per_frame_reproj_error: vec![0.5; views.len()],
        })
    }
}

fn provider() -> StubProvider {
    StubProvider {
        videos: HashMap::from([
            (TrialId::new("trial-a"), (0.0, 120)),
            (TrialId::new("trial-b"), (20.0, 80)),
            (TrialId::new("trial-short"), (0.0, 5)),
        ]),
    }
}

fn base_config(session_dir: &Path) -> RunConfig {
    RunConfig::new(
        session_dir,
        CheckerboardSpec::new(11, 8, 60.0).unwrap(),
        vec![TrialId::from("trial-a"), TrialId::from("trial-b")],
    )
}

#[test]
fn full_run_averages_persists_and_deploys() {
    let session = tempfile::tempdir().unwrap();
    let deploy_root = tempfile::tempdir().unwrap();

    let mut config = base_config(session.path());
    config.deployment = Some(DeploymentConfig {
        root: deploy_root.path().to_path_buf(),
        variants: vec!["Deployed_720_60fps".to_owned(), "Deployed".to_owned()],
    });

    let summary = run_calibration(&config, &provider(), &StubDetector, &StubSolver).unwrap();

    // trial-a solves to focal (1000, 1000), trial-b to (1020, 1010).
    assert_relative_eq!(summary.average.focal[0], 1010.0);
    assert_relative_eq!(summary.average.focal[1], 1005.0);
    assert_relative_eq!(summary.average.principal_point[0], 640.0);
    assert_relative_eq!(summary.average.principal_point[1], 360.0);
    assert_eq!(summary.average.camera_model, CAMERA_MODEL);
    assert_eq!(summary.config_source, "explicit configuration");
    assert_eq!(summary.per_trial.len(), 2);
    assert_eq!(summary.per_trial[0].frames_used, 50);

    assert_relative_eq!(summary.comparison.trials[0].fx.absolute, -10.0);
    assert_relative_eq!(summary.comparison.trials[1].fx.absolute, 10.0);

    // Both deployment slots hold a loadable copy of the averaged profile.
    assert_eq!(summary.deployed_to.len(), 2);
    for path in &summary.deployed_to {
        assert_eq!(load_parameters(path).unwrap(), summary.average);
    }

    // Session-side artifacts were rewritten.
    assert!(session.path().join("trialInfo.json").exists());
    assert!(session.path().join("intrinsicComparison.json").exists());
}

#[test]
fn a_rerun_can_reuse_the_cached_trial_record() {
    let session = tempfile::tempdir().unwrap();

    let config = base_config(session.path());
    run_calibration(&config, &provider(), &StubDetector, &StubSolver).unwrap();

    // Second run: opt into the cache and give deliberately wrong fallbacks.
    let mut rerun = RunConfig::new(
        session.path(),
        CheckerboardSpec::new(4, 3, 25.0).unwrap(),
        vec![TrialId::from("trial-short")],
    );
    rerun.use_cached_record = true;

    let summary = run_calibration(&rerun, &provider(), &StubDetector, &StubSolver).unwrap();
    assert_eq!(summary.config_source, "cached trial record");
    assert_eq!(summary.per_trial.len(), 2);
    assert_relative_eq!(summary.average.focal[0], 1010.0);
}

#[test]
fn requesting_the_cache_on_a_fresh_session_fails() {
    let session = tempfile::tempdir().unwrap();

    let mut config = base_config(session.path());
    config.use_cached_record = true;

    let err = run_calibration(&config, &provider(), &StubDetector, &StubSolver).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Resolve(ResolveError::MissingRecord { .. })
    ));
}

#[test]
fn a_failing_trial_aborts_the_run_before_anything_is_written() {
    let session = tempfile::tempdir().unwrap();

    let mut config = base_config(session.path());
    // 5 frames total can never reach the 10-detection threshold.
    config.trials = vec![TrialId::from("trial-a"), TrialId::from("trial-short")];

    let err = run_calibration(&config, &provider(), &StubDetector, &StubSolver).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Calibrate(CalibrateError::InsufficientDetections { .. })
    ));
    assert!(!session.path().join("trialInfo.json").exists());
    assert!(!session.path().join("intrinsicComparison.json").exists());
}

#[test]
fn an_unknown_trial_surfaces_as_an_open_error() {
    let session = tempfile::tempdir().unwrap();

    let mut config = base_config(session.path());
    config.trials = vec![TrialId::from("no-such-video")];

    let err = run_calibration(&config, &provider(), &StubDetector, &StubSolver).unwrap_err();
    assert!(matches!(err, PipelineError::OpenTrial { .. }));
}
