use clap::{Parser, ValueEnum};
use log::LevelFilter;
use orb_core::Camera;
use std::path::PathBuf;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "orb")]
#[command(about = "Render a sphere scene with a pinhole ray caster")]
pub struct Args {
    /// Scene description (.xml or .json)
    pub scene: PathBuf,

    #[arg(short, long, default_value = "test.ppm", help = "Output file path (.ppm or .png)")]
    pub output: PathBuf,

    #[arg(long, help = "Write to the image name declared by the scene's camera, if any")]
    pub use_scene_name: bool,

    #[arg(long, help = "Override the camera's image width in pixels")]
    pub width: Option<u32>,

    #[arg(long, help = "Override the camera's image height in pixels")]
    pub height: Option<u32>,

    #[arg(long, help = "Render rows in parallel")]
    pub parallel: bool,

    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply `--width` and `--height` to the rendered camera.
    pub fn apply_resolution(&self, camera: &mut Camera) {
        if let Some(width) = self.width {
            camera.image_width = width;
        }
        if let Some(height) = self.height {
            camera.image_height = height;
        }
    }

    /// Pick the output path, preferring the scene's image name when asked.
    pub fn output_path(&self, image_name: &str) -> PathBuf {
        if self.use_scene_name && !image_name.is_empty() {
            PathBuf::from(image_name)
        } else {
            self.output.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_core::NearPlane;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["orb", "scene.xml"]);

        assert_eq!(args.scene, PathBuf::from("scene.xml"));
        assert_eq!(args.output, PathBuf::from("test.ppm"));
        assert!(!args.parallel);
        assert!(args.width.is_none() && args.height.is_none());
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "orb",
            "scene.json",
            "-o",
            "out.png",
            "--width",
            "320",
            "--height",
            "240",
            "--parallel",
            "--log-level",
            "trace",
        ]);

        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(args.width, Some(320));
        assert_eq!(args.height, Some(240));
        assert!(args.parallel);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Trace);
    }

    #[test]
    fn test_scene_name_output() {
        let args = Args::parse_from(["orb", "scene.xml", "--use-scene-name"]);
        assert_eq!(args.output_path("simple.ppm"), PathBuf::from("simple.ppm"));
        assert_eq!(args.output_path(""), PathBuf::from("test.ppm"));

        let args = Args::parse_from(["orb", "scene.xml"]);
        assert_eq!(args.output_path("simple.ppm"), PathBuf::from("test.ppm"));
    }

    #[test]
    fn test_scene_is_required() {
        assert!(Args::try_parse_from(["orb"]).is_err());
    }

    #[test]
    fn test_resolution_override() {
        let declared = || {
            Camera::new(
                Default::default(),
                Default::default(),
                Default::default(),
                NearPlane::new(-1.0, 1.0, -1.0, 1.0),
                1.0,
                800,
                600,
            )
        };

        let mut camera = declared();
        Args::parse_from(["orb", "scene.xml"]).apply_resolution(&mut camera);
        assert_eq!((camera.image_width, camera.image_height), (800, 600));

        let mut camera = declared();
        Args::parse_from(["orb", "scene.xml", "--width", "64"]).apply_resolution(&mut camera);
        assert_eq!((camera.image_width, camera.image_height), (64, 600));

        let mut camera = declared();
        Args::parse_from(["orb", "scene.xml", "--width", "64", "--height", "48"])
            .apply_resolution(&mut camera);
        assert_eq!((camera.image_width, camera.image_height), (64, 48));
    }
}
