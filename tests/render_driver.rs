//! Render driver tests against a recording image engine

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use wallsplit::{
    parse_groups, run, EngineError, ImageEngine, ImageSize, LayoutConfig, LayoutError,
    PixelRect, RenderConfig, SplitError,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Measure(PathBuf),
    Crop(PixelRect, ImageSize, usize),
    Compose(Vec<usize>, usize),
    Save(usize, PathBuf),
    Release(usize),
}

/// Records every call; handles are sequence numbers
struct Recorder {
    size: ImageSize,
    calls: Vec<Call>,
    next: usize,
    fail_save: bool,
}

impl Recorder {
    fn new(width: u32, height: u32) -> Self {
        Self {
            size: ImageSize::new(width, height),
            calls: Vec::new(),
            next: 0,
            fail_save: false,
        }
    }

    fn handle(&mut self) -> usize {
        self.next += 1;
        self.next
    }

    fn pixel_ops(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| !matches!(c, Call::Measure(_)))
            .count()
    }
}

impl ImageEngine for Recorder {
    type Handle = usize;

    fn measure(&mut self, path: &Path) -> Result<ImageSize, EngineError> {
        self.calls.push(Call::Measure(path.to_path_buf()));
        Ok(self.size)
    }

    fn crop_and_resize(
        &mut self,
        _source: &Path,
        crop: PixelRect,
        target: ImageSize,
    ) -> Result<usize, EngineError> {
        let h = self.handle();
        self.calls.push(Call::Crop(crop, target, h));
        Ok(h)
    }

    fn compose_horizontal(&mut self, parts: &[usize]) -> Result<usize, EngineError> {
        let h = self.handle();
        self.calls.push(Call::Compose(parts.to_vec(), h));
        Ok(h)
    }

    fn save(&mut self, image: &usize, path: &Path) -> Result<(), EngineError> {
        if self.fail_save {
            return Err(EngineError::UnexpectedOutput {
                program: "recorder".to_string(),
                output: "disk full".to_string(),
            });
        }
        self.calls.push(Call::Save(*image, path.to_path_buf()));
        Ok(())
    }

    fn release(&mut self, image: usize) -> Result<(), EngineError> {
        self.calls.push(Call::Release(image));
        Ok(())
    }
}

fn groups() -> Vec<Vec<wallsplit::ScreenSpec>> {
    parse_groups(&[
        vec!["1000x500/1000", "1000x500/1000"],
        vec!["500x500/1000"],
    ])
    .expect("Should parse")
}

#[test]
fn test_calls_in_order() {
    let mut engine = Recorder::new(2000, 1000);
    let plan = run(
        Path::new("photo.jpg"),
        Path::new("out/wall.png"),
        &groups(),
        &RenderConfig::default(),
        &mut engine,
    )
    .expect("Should run");

    assert_eq!(plan.jobs.len(), 2);
    assert_eq!(
        engine.calls,
        vec![
            Call::Measure(PathBuf::from("photo.jpg")),
            Call::Crop(
                PixelRect::new(0, 250, 1000, 500),
                ImageSize::new(1000, 500),
                1
            ),
            Call::Crop(
                PixelRect::new(1000, 250, 1000, 500),
                ImageSize::new(1000, 500),
                2
            ),
            Call::Compose(vec![1, 2], 3),
            Call::Save(3, PathBuf::from("out/1_wall.png")),
            Call::Release(1),
            Call::Release(2),
            Call::Release(3),
            Call::Crop(PixelRect::new(0, 250, 500, 500), ImageSize::new(500, 500), 4),
            Call::Compose(vec![4], 5),
            Call::Save(5, PathBuf::from("out/2_wall.png")),
            Call::Release(4),
            Call::Release(5),
        ]
    );
}

#[test]
fn test_every_handle_released() {
    let mut engine = Recorder::new(4096, 2160);
    let groups = parse_groups(&[
        vec!["2560x1440/59.8cm", "1680x1050/46.4cm"],
        vec!["1920x1080/92dpi"],
    ])
    .unwrap();
    run(
        Path::new("photo.jpg"),
        Path::new("wall.png"),
        &groups,
        &RenderConfig::default(),
        &mut engine,
    )
    .expect("Should run");

    let released: Vec<usize> = engine
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Release(h) => Some(*h),
            _ => None,
        })
        .collect();
    let mut sorted = released.clone();
    sorted.sort();
    assert_eq!(sorted, (1..=engine.next).collect::<Vec<_>>());
}

#[test]
fn test_pretend_touches_no_pixels() {
    let mut engine = Recorder::new(2000, 1000);
    let config = RenderConfig::new().with_pretend(true);
    let plan = run(
        Path::new("photo.jpg"),
        Path::new("wall.png"),
        &groups(),
        &config,
        &mut engine,
    )
    .expect("Should run");

    assert_eq!(engine.calls, vec![Call::Measure(PathBuf::from("photo.jpg"))]);
    assert_eq!(engine.pixel_ops(), 0);
    assert_eq!(plan.jobs[1].output, PathBuf::from("2_wall.png"));
}

#[test]
fn test_bad_scale_fails_before_measuring() {
    let mut engine = Recorder::new(2000, 1000);
    let config = RenderConfig::new().with_layout(LayoutConfig::new().with_scale(0.9));
    let result = run(
        Path::new("photo.jpg"),
        Path::new("wall.png"),
        &groups(),
        &config,
        &mut engine,
    );

    assert!(matches!(
        result,
        Err(SplitError::Layout(LayoutError::ScaleTooSmall { .. }))
    ));
    assert!(engine.calls.is_empty());
}

#[test]
fn test_no_screens_fails_before_measuring() {
    let mut engine = Recorder::new(2000, 1000);
    let result = run(
        Path::new("photo.jpg"),
        Path::new("wall.png"),
        &[],
        &RenderConfig::default(),
        &mut engine,
    );
    assert!(matches!(
        result,
        Err(SplitError::Layout(LayoutError::NoScreens))
    ));
    assert!(engine.calls.is_empty());
}

#[test]
fn test_engine_failure_aborts_run() {
    let mut engine = Recorder::new(2000, 1000);
    engine.fail_save = true;
    let result = run(
        Path::new("photo.jpg"),
        Path::new("wall.png"),
        &groups(),
        &RenderConfig::default(),
        &mut engine,
    );

    assert!(matches!(result, Err(SplitError::Engine(_))));
    // The first group was cropped and composed, the second never started
    assert_eq!(engine.pixel_ops(), 3);
}
